//! Genesis block construction and verification.
//!
//! The genesis block is rebuilt from literal inputs at every start and its
//! hash and merkle root compared with the expected values. A mismatch means
//! the binary would fork from every honest peer, so it is fatal.

use crate::core::params::NetworkKind;
use crate::core::script::{self, Script};
use crate::core::types::*;
use crate::error::ParamsError;

/// Message carried by every genesis coinbase input.
pub const GENESIS_COINBASE_MESSAGE: &str = "Bitzec";

/// Uncompressed public key paid (zero) by every genesis coinbase.
pub const GENESIS_OUTPUT_PUBKEY: &str = concat!(
    "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb6",
    "49f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f",
);

pub const GENESIS_TIME: u32 = 1_536_721_921;
pub const GENESIS_VERSION: i32 = 4;
pub const GENESIS_REWARD: Amount = 0;

/// First push of the coinbase script: the mainnet genesis bits as a number.
const COINBASE_BITS_PUSH: i64 = 520_617_983;

/// Coinbase input script: <520617983> <04> <message>
pub fn genesis_script_sig(message: &[u8]) -> Script {
    let mut s = Vec::with_capacity(message.len() + 8);
    script::push_int(&mut s, COINBASE_BITS_PUSH);
    script::push_data(&mut s, &script::script_num_bytes(4));
    script::push_data(&mut s, message);
    s
}

/// Build a genesis block: one coinbase paying `reward` to `output_script`,
/// null previous hash, merkle root over the single transaction.
#[allow(clippy::too_many_arguments)]
pub fn build_genesis(
    time: u32,
    nonce: Hash256,
    solution: Vec<u8>,
    bits: u32,
    version: i32,
    coinbase_message: &[u8],
    output_script: Script,
    reward: Amount,
) -> Block {
    let coinbase = Transaction::new_coinbase(genesis_script_sig(coinbase_message), reward, output_script);
    let mut block = Block {
        header: BlockHeader {
            version,
            prev_hash: NULL_HASH,
            merkle_root: NULL_HASH,
            reserved: NULL_HASH,
            time,
            bits,
            nonce,
            solution,
        },
        transactions: vec![coinbase],
    };
    block.header.merkle_root = block.compute_merkle_root();
    block
}

/// Literal genesis inputs of one network plus the values they must hash to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisSpec {
    pub time: u32,
    pub nonce: Hash256,
    pub solution: Vec<u8>,
    pub bits: u32,
    pub version: i32,
    pub coinbase_message: Vec<u8>,
    pub output_script: Script,
    pub reward: Amount,
    pub expected_hash: Hash256,
    pub expected_merkle_root: Hash256,
}

const EXPECTED_MERKLE_ROOT: &str = "0x51d02c5b0782c1166d49ae4293d3461f2923ce5fecdcb3f7c5d1f47618479bfd";

impl GenesisSpec {
    fn with_shared_inputs(
        nonce: &str,
        solution: &str,
        bits: u32,
        expected_hash: &str,
    ) -> Result<Self, ParamsError> {
        let pubkey = hex::decode(GENESIS_OUTPUT_PUBKEY)
            .map_err(|_| ParamsError::InvalidHex(GENESIS_OUTPUT_PUBKEY.to_string()))?;
        Ok(GenesisSpec {
            time: GENESIS_TIME,
            nonce: hash256_from_hex(nonce)?,
            solution: hex::decode(solution).map_err(|_| ParamsError::InvalidHex(solution.to_string()))?,
            bits,
            version: GENESIS_VERSION,
            coinbase_message: GENESIS_COINBASE_MESSAGE.as_bytes().to_vec(),
            output_script: script::script_p2pk(&pubkey),
            reward: GENESIS_REWARD,
            expected_hash: hash256_from_hex(expected_hash)?,
            expected_merkle_root: hash256_from_hex(EXPECTED_MERKLE_ROOT)?,
        })
    }

    pub fn for_network(kind: NetworkKind) -> Result<Self, ParamsError> {
        match kind {
            NetworkKind::Main => Self::with_shared_inputs(
                "0x0000000000000000000000000000000000000000000000000000000000000c94",
                MAIN_GENESIS_SOLUTION,
                0x1f07ffff,
                "0x00027f370c78f3866b3f90794c4daf6770fa62a6e1cd93ea4f160bcb3e7cc88c",
            ),
            NetworkKind::Test => Self::with_shared_inputs(
                "0x0000000000000000000000000000000000000000000000000000000000000004",
                TEST_GENESIS_SOLUTION,
                0x2007ffff,
                "0x02d8377b5ae8870c318f19b8c6be8ca7fd32fa2b9306dbcf13098be69e6600e8",
            ),
            NetworkKind::Regtest => Self::with_shared_inputs(
                "0x0000000000000000000000000000000000000000000000000000000000000000",
                REGTEST_GENESIS_SOLUTION,
                0x200f0f0f,
                "0x0be024573a7bf8665bafe6e69efd52cefa68eafd3c13957335186889bc80f48e",
            ),
        }
    }

    pub fn build(&self) -> Block {
        build_genesis(
            self.time,
            self.nonce,
            self.solution.clone(),
            self.bits,
            self.version,
            &self.coinbase_message,
            self.output_script.clone(),
            self.reward,
        )
    }

    /// Build the block and check it against the expected hash and merkle root.
    pub fn build_verified(&self, network: NetworkKind) -> Result<Block, ParamsError> {
        let block = self.build();

        let merkle_root = block.header.merkle_root;
        if merkle_root != self.expected_merkle_root {
            tracing::error!("❌ {} genesis merkle root mismatch", network);
            return Err(ParamsError::MerkleRootMismatch {
                network,
                expected: hash256_to_hex(&self.expected_merkle_root),
                computed: hash256_to_hex(&merkle_root),
            });
        }

        let hash = block.hash();
        if hash != self.expected_hash {
            tracing::error!("❌ {} genesis hash mismatch", network);
            return Err(ParamsError::GenesisHashMismatch {
                network,
                expected: hash256_to_hex(&self.expected_hash),
                computed: hash256_to_hex(&hash),
            });
        }

        tracing::debug!("✅ {} genesis verified: {}", network, hash256_to_hex(&hash));
        Ok(block)
    }
}


// ─── Genesis Equihash solutions ──────────────────────────────────────

const MAIN_GENESIS_SOLUTION: &str = concat!(
    "00e92dbc6a43824326a1919ebc43d4b09be655a9342239dd0f79d0d74dfd63c3066d6d840d46543ed84c2fbde79e190d",
    "216c8b0078b50d6923f6c876b70e3350dd04f3ddf1eb6df9c50613333596c6dae9ff7003034ca2415dc439899318683a",
    "8e7013c330d11f20db40f4d67d3a9499d31510a4976369f94e60f6133a3a128edc99ed9c6db9caa9c44996dd5e6da5be",
    "bc2fc01d575fd6e68a588db3eeb36c89efee810e7c898120014b83e2a5c33a9bc184e3a275a231fa36343acd1a3722a3",
    "6f85d894dd4e81b8445fd4e47a363e522d1e0293b1daa90c5c5dc022a08ec33d7ca8ef34686e3506d966eb51d1602570",
    "41c14661e700e954cbf380331742ea45f85ae6db16e516d26decb00dc6c58eafd52795628704145d0d793a560961c026",
    "0618195ba6042cfe01e521a79b3b74ff3549b0596c4a34723242262da97b27c01505a1c7bed8c35b467e6384a2bd79e8",
    "072f245fea5ed1fd7e5d030b5db9ba25a8e77d08310c31b75aa7c358f504c335c2416b6a8e80affe8f7e091691a0b403",
    "0741c67054e723ec91396af011a7a727f3a619b0a565cf5822f33456537238e96b4e8b0323a9c4f9c614a0a0c1cc13b0",
    "2e363e2547b15d9594284c341c45537ea9068028a979d4cd4311e859c06125aced9ab4eeee4b825fa27696d61c85ba7f",
    "5e9c6a2cfb6cf0d5e339dd26cdb63187bca2fe0be97c979b08568941aa5bbe3d00fc57f8a76cf25e5a293b47cd146cea",
    "1da5136c05d8cd2957cf5a1fb682e91927491531c4b4f70eed3ad8a453381043580b321abf1999189e2e5aae4c624deb",
    "5802e4eb52e5d54a54583b83144d4ce46b08c51cd08f7178bfcc6a3d98b17eb00e284cdbf99d357b55b65412c2fbf6d8",
    "fccdc6f04bb219e57389dd2d52857e8e4277c8d5b312c93b5f492020330c002bd3e56d7cb3d4abe6ac7ea13f1e5f87ed",
    "02043cecc9adaa1576486475956b72225c3dd346c417c390e138cf51dcc2c5d5496166da874130fac28b0c8e169da216",
    "2bb9c928f307709ab29a7fe31dfd1a228862b6e3d358453bf74cbeae76d8cfaa76df5a0703e735dac3c85c1263685043",
    "db272fcc9727b35901059ca7c8cf81dbef8e2fd067f4dce2964ca4bb53bc0a8706235d570be3f709e15bc6da4cb0ae1c",
    "f5751e1f2074daf6a67b71b2fa345a1c41bcbd7e22d3d14c03ca2a26fb0d67b6760ba49e274cbec52b3d335a0e1eb6f7",
    "89cf5bba953672036f3b639f9654703cd7640839a2aa49c396dea8a0452e503461155dc959ff8f15bcc8e31b8bda6ab7",
    "c0f3395c724160daecd3a8142a8cf9aea79b5ad9d0c9f8280758514e75c7347710350689f3a5d3de22bd09f458d5dd90",
    "5e7fc2b63b192f1b8f74c61c76899345d56ff7afb29624f47ad78546b62720ab2119ddbad0b767b05fe503a627dde2a8",
    "0237c07e5565c1333cf082044896fb3efdcc7f306e14c4f7c2219014d74e6cf1dba6479e2623829166e3078a3636bcd7",
    "cbc7fcb633c5d8d8f0f9f58bd7d01020c172080d5bbe13b8e952545be7c3dcc6215617900ac922041246522fc8ef07a0",
    "0dd4a5cb38f73fcef61f4d172577988f8be05364b7e3dcdd42e9627d401611e3f09b1ee7f1e3efa28330ac29938557a4",
    "5e9785135fcf1e15e97ff9d7b6762c2fd6cb9e8ce99abf00092322f89f6b9123c9701a017af47573f7081fe6a327a657",
    "7f5d541d98cc0ee407d538f1597532d12efc10db27d871317d7fbab2e22a3ddb632dc9a71fbea012e2a5db298f8b24ab",
    "6d44528e44190db33ab9526b0d0fb2d8e4c9527258db51774f7c9a58aea153ba7b127963e57b483985912f43928efc9f",
    "090959989ef818fe58dc308ae5f9141056d9f5d35f720cb015102f21928b948b5c4dd139f642398c55eb089c791438a0",
);

const TEST_GENESIS_SOLUTION: &str = concat!(
    "01a9b6d750a8051d900f533a0e9ffdcd7894d3a9621e97e4f25464f75fd15186ac706d8c4eafdab84fba2579ba933416",
    "4c5d87c8f61d6836cf49c33ffb95d25ad5a31d7465ff31a92d55cf60b1020a432755cf4510ddd715e122dacf6836e4f4",
    "90cbd0de5457de84ed1bf15998cb87285b8a4dc31eb7d16db8eeff2bad8c364eda32ba5200b30e6046635de24e360744",
    "da3ad74c77ae9908d69959893065f5f65840ce2080bbc3b30277bc820db87ca9ee45c2f171fc02dcc61c50e8d5028c9f",
    "70486da0cbf0320151c4de71fc94f654f46d1b27e5341b9ff3198e6056029dfe24fb027c5a2b5728d9cafe3e52040ab8",
    "47254de24ba71a13da52272112c4f3a2818e08efcaf8e739dec0e2a65727189f3f1d734d98125781193a0ba77dc348f8",
    "5e5e68b93b6d1f065425482cbdd7bdc2c7e38decdad774f37d70cc2c89e531aa31d083dd2e381d53d1cc770db2df36f4",
    "02811711e507c17fe60db09df605332066c913ac961a42edbd8ea4390b891701e183afe748ba8f9fa29405d15571ec25",
    "79b16dab02074a9ff3f89b4d3fab1f122ade01b1114e2591b475498879d1ca4aac9d3c04067e276910242b6f370c1169",
    "cafa3af8b49f5f525825976fa5363c765dfc4314eb9463ba56ad211636ed1636270af1490a9ee7b28166aa0bd1f0af70",
    "7ca6d0829b369175e70cd1e687c9d04ff754fe9aff9704bf04926ed922241f595f7911c796f9a9c60815f2d9250e250b",
    "2824077812d4c190ed6d57b37dc148d19d4c0929a1909235fa5fc9f472d541e0f05508edf8636f298c83f95827abcba2",
    "013324c6c088156b262dc2011286221843561555949162dc9bc9d7892140576cfd4463628729e8a9d14ba785f17c4bb3",
    "edb194ee52bf22787d1d9ce64579a63b63ab245cf69237fadb8c643e53c7be7e6051f5b40817542ebd50765b7959fc6d",
    "01bdc96eb682e0d9525a90cc587f62c284429c71d907042797a9dc08f96c4cb36a267eb7d527c2787e9a131423a81d4a",
    "4bb67a81d1a4491de8f5b56adf1b733473cf3d7dadfb97974ca39611f706f93edf5397320731b937b60b57a538df1181",
    "e4cb5f8d028cf631cf1598b0f2a4b20c85f024e7078c72fe89c89c7b7fd114ce6f557b05432be6a042133619a7a1c29a",
    "8e3906314569b2545aca63b554d5d59d6f0275b7aaf584280564f82f49472f1cfc5953eb8d238d936e16bd3443072351",
    "c679d9e1854e9723f18ebe77e186c8971b230cf2ebc31b91b6954a9ac182d547c2e59162bd0de13d4fbd4a36df2febc4",
    "766727bbdb20827903f863bd0d3056e95fe01601c93222de17e637e0bd0e28e1101983f4da6f1b18a33b9b57c14a5a76",
    "5e675cfb0e8c3494fa3948d9864d96cbb74075de9072a60895fe5744b836df65db7c696340a899df5c2feb3048faffe3",
    "02caa27d2c2bd53ffffde3abf0a4955a4374d9e8c01475cb0e068c91247c1b098bdacdb34f68b81e98b51049b4eba289",
    "1f26adcb659e8b7a3cd1ad8fb987441a41750e0a48700d1249a3ea0b37086bcfe81f372c185ddc1f4c327fe59ca724ab",
    "ab56782db38ad3ad171977fbbb1ea6872d9159f4f437e975add749387d66203e42e6178b655f8112723599fa3320bd21",
    "0fc8aea19057e3567876a3d9a1ea935b7f28f35f743d5251071e36d49dc7f0377fb03264ec47ebc7d2863f3b4e08d03b",
    "0ed5df252920fc6270a29981d56076b35c9b1abcf7d9fb4c6f5ee43032e93e7d30e210de957eb2264a63b68be024a196",
    "a2e573c7433f11f02c5fada50ee1b53979c815c8d777a2a5086ea6ed699fb3153d3dac8f786dab0d35f754f50f0b32be",
    "e763829c6d0f20bd86e10dd25941e2807792be67a64251313f7b1f2590fed9f6897233764af37b3e63d4d729281c39c6",
);

const REGTEST_GENESIS_SOLUTION: &str = concat!(
    "08a983bf9263def7cb2ca7d35c94dd5d934f0b8b8cc9917974deee1593c90904bf0969c7",
);
