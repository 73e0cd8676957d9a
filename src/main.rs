use clap::{Parser, Subcommand};

use bitzec_params::core::types::hash256_to_hex;
use bitzec_params::core::upgrades::{Activation, UpgradeIndex, UpgradeState};
use bitzec_params::pow::DifficultyAlgorithm;
use bitzec_params::{select_params, NetworkKind, NetworkProfile, ParamsError, SelectOptions};

#[derive(Parser)]
#[command(name = "bitzec-params", version = "1.0.6")]
#[command(about = "Bitzec consensus parameters - inspect and verify network profiles")]
struct Cli {
    /// Network profile: main, test or regtest
    #[arg(long, global = true, default_value = "main", value_parser = parse_network)]
    network: NetworkKind,
    /// Require coinbase outputs to be shielded on regtest
    #[arg(long, global = true)]
    regtest_protect_coinbase: bool,
    /// Override an upgrade activation height (regtest only), e.g. sapling:200
    #[arg(long = "nuparams", global = true, value_parser = parse_upgrade_override)]
    nuparams: Vec<(UpgradeIndex, Activation)>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of the selected network
    Info {
        #[arg(long)]
        json: bool,
    },
    /// Rebuild and verify the genesis block
    Genesis,
    /// Founders reward address and script at a height
    Founders { height: u64 },
    /// Equihash parameters valid at a height
    Epochs { height: u64 },
    /// Difficulty algorithm governing a height
    Difficulty { height: u64 },
    /// Network upgrade schedule, optionally evaluated at a height
    Upgrades { height: Option<u64> },
    /// Checkpoint list and sync hints
    Checkpoints,
}

fn parse_network(s: &str) -> Result<NetworkKind, String> {
    s.parse().map_err(|e: ParamsError| e.to_string())
}

fn parse_upgrade_override(s: &str) -> Result<(UpgradeIndex, Activation), String> {
    let (name, height) = s.split_once(':').ok_or_else(|| format!("expected <upgrade>:<height>, got '{}'", s))?;
    let idx: UpgradeIndex = name.parse().map_err(|e: ParamsError| e.to_string())?;
    let activation = match height {
        "never" => Activation::never(),
        h => Activation::at(h.parse().map_err(|_| format!("invalid height '{}'", h))?),
    };
    Ok((idx, activation))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bitzec_params=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let options = SelectOptions {
        regtest_protect_coinbase: cli.regtest_protect_coinbase,
        upgrade_overrides: cli.nuparams,
    };

    // Must happen before anything touches params
    let profile = match select_params(cli.network, &options) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Info { json } => {
            if json {
                match serde_json::to_string_pretty(&profile.summary()) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("❌ {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_info(profile);
            }
        }

        Commands::Genesis => {
            let header = &profile.genesis.header;
            println!("🧱 {} genesis", profile.kind);
            println!("  Hash:     {}", hash256_to_hex(&profile.genesis_hash()));
            println!("  Merkle:   {}", hash256_to_hex(&header.merkle_root));
            println!("  Time:     {}", header.time);
            println!("  Bits:     {:#010x}", header.bits);
            println!("  Nonce:    {}", hash256_to_hex(&header.nonce));
            println!("  Solution: {} bytes", header.solution.len());
            println!("  Coinbase: {}", hash256_to_hex(&profile.genesis.transactions[0].txid()));
        }

        Commands::Founders { height } => {
            let fr = &profile.founders_reward;
            if height == 0 || height > fr.last_height() {
                eprintln!("❌ No founders reward at height {} (period 1..={})", height, fr.last_height());
                std::process::exit(1);
            }
            println!("💰 Founders reward at height {}", height);
            println!("  Index:    {} of {}", fr.index_at_height(height), fr.len());
            println!("  Address:  {}", profile.founders_reward_address_at_height(height));
            println!("  Script:   {}", hex::encode(profile.founders_reward_script_at_height(height)));
            println!("  Interval: {} blocks", fr.address_change_interval());
        }

        Commands::Epochs { height } => {
            let preferred = profile.equihash.preferred(height);
            println!("🧩 Equihash at height {}", height);
            for p in profile.equihash_params_at(height) {
                println!(
                    "  {}({}, {}) solution {} bytes",
                    if p == preferred { "* " } else { "  " },
                    p.n,
                    p.k,
                    p.solution_size()
                );
            }
        }

        Commands::Difficulty { height } => {
            let c = &profile.consensus;
            let algo = profile.difficulty_algorithm(height);
            println!("⛏️  Difficulty at height {}", height);
            println!("  Algorithm: {:?}", algo);
            println!("  Spacing:   {}s", c.target_spacing_at(height));
            match algo {
                DifficultyAlgorithm::Legacy => {
                    println!("  Window:    {}", c.legacy.averaging_window);
                    println!(
                        "  Timespan:  {}..={}",
                        c.legacy.min_actual_timespan(),
                        c.legacy.max_actual_timespan()
                    );
                }
                DifficultyAlgorithm::Lwma => {
                    println!("  Window:    {}", c.lwma.averaging_window);
                    println!("  Weight:    {}", c.lwma.adjusted_weight);
                }
            }
            println!("  Pow limit: {:#010x}", c.pow_limit_compact());
            if c.pow_no_retargeting {
                println!("  Retargeting disabled");
            }
        }

        Commands::Upgrades { height } => {
            let table = profile.consensus.upgrades();
            println!("🔀 {} network upgrades", profile.kind);
            for (idx, nu) in table.iter() {
                let state = height.map(|h| match table.state(h, idx) {
                    UpgradeState::Active => " active",
                    UpgradeState::Pending => " pending",
                    UpgradeState::Disabled => " disabled",
                });
                println!(
                    "  {:<11} v{} branch {:08x} at {}{}",
                    idx.name(),
                    nu.protocol_version,
                    idx.branch_id(),
                    nu.activation,
                    state.unwrap_or("")
                );
            }
            if let Some(h) = height {
                println!("  Epoch at {}: {}", h, table.current_epoch(h));
                if let Some(next) = table.next_activation_height(h) {
                    println!("  Next activation: {}", next);
                }
            }
        }

        Commands::Checkpoints => {
            let data = &profile.checkpoints;
            println!("📌 {} checkpoints", profile.kind);
            for cp in &data.checkpoints {
                println!("  {:>8} {}", cp.height, hash256_to_hex(&cp.hash));
            }
            println!("  Last time:    {}", data.last_checkpoint_time);
            println!("  Transactions: {}", data.total_transactions);
            println!("  Tx/day:       {}", data.transactions_per_day);
        }
    }
}

fn print_info(profile: &NetworkProfile) {
    let c = &profile.consensus;
    println!("📊 Bitzec {} ({})", profile.kind, profile.currency_units);
    println!("  Magic:      {}", hex::encode(profile.message_start));
    println!("  Port:       {}", profile.default_port);
    println!("  Genesis:    {}", hash256_to_hex(&profile.genesis_hash()));
    println!("  Pow limit:  {:#010x}", c.pow_limit_compact());
    println!("  LWMA from:  {}", c.lwma.activation_height);
    println!(
        "  Equihash:   ({}, {}) -> ({}, {}) at {}",
        profile.equihash.epoch_1.n,
        profile.equihash.epoch_1.k,
        profile.equihash.epoch_2.n,
        profile.equihash.epoch_2.k,
        profile.equihash.epoch_2_start
    );
    println!(
        "  Founders:   {} addresses until {}",
        profile.founders_reward.len(),
        profile.founders_reward.last_height()
    );
    println!("  Protected coinbase: {}", c.coinbase_must_be_protected);
    if profile.allows_upgrade_overrides() {
        println!("  ⚠️  Upgrade heights may be overridden");
    }
}
