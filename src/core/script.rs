// src/core/script.rs
//! Script construction for the handful of templates chain parameters need.
//!
//! genesis coinbase: <520617983> <04> <message>
//! genesis output:   <pubkey65> OP_CHECKSIG
//! founders reward:  OP_HASH160 <script_id20> OP_EQUAL

/// Raw script bytes.
pub type Script = Vec<u8>;

/// Opcodes (minimal subset).
pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Append a minimal data push.
pub fn push_data(script: &mut Script, data: &[u8]) {
    let len = data.len();
    if len < OP_PUSHDATA1 as usize {
        script.push(len as u8);
    } else if len <= 0xff {
        script.push(OP_PUSHDATA1);
        script.push(len as u8);
    } else if len <= 0xffff {
        script.push(OP_PUSHDATA2);
        script.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        script.push(OP_PUSHDATA4);
        script.extend_from_slice(&(len as u32).to_le_bytes());
    }
    script.extend_from_slice(data);
}

/// Minimal little-endian sign-magnitude encoding of a script number.
pub fn script_num_bytes(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    // The top bit carries the sign, so add a byte when it is already taken.
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

/// Append an integer the way scripts push integers: small values become
/// OP_0 / OP_1NEGATE / OP_1..OP_16, everything else a script-number push.
pub fn push_int(script: &mut Script, value: i64) {
    match value {
        0 => script.push(OP_0),
        -1 => script.push(OP_1NEGATE),
        1..=16 => script.push(OP_1 + (value as u8 - 1)),
        _ => push_data(script, &script_num_bytes(value)),
    }
}

/// Pay-to-pubkey: <pubkey> OP_CHECKSIG
pub fn script_p2pk(pubkey: &[u8]) -> Script {
    let mut s = Vec::with_capacity(pubkey.len() + 2);
    push_data(&mut s, pubkey);
    s.push(OP_CHECKSIG);
    s
}

/// Pay-to-pubkey-hash: OP_DUP OP_HASH160 <key_id20> OP_EQUALVERIFY OP_CHECKSIG
pub fn script_p2pkh(key_id: &[u8; 20]) -> Script {
    let mut s = Vec::with_capacity(25);
    s.push(OP_DUP);
    s.push(OP_HASH160);
    push_data(&mut s, key_id);
    s.push(OP_EQUALVERIFY);
    s.push(OP_CHECKSIG);
    s
}

/// Pay-to-script-hash: OP_HASH160 <script_id20> OP_EQUAL
pub fn script_p2sh(script_id: &[u8; 20]) -> Script {
    let mut s = Vec::with_capacity(23);
    s.push(OP_HASH160);
    push_data(&mut s, script_id);
    s.push(OP_EQUAL);
    s
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_num_bytes() {
        assert!(script_num_bytes(0).is_empty());
        assert_eq!(script_num_bytes(4), vec![0x04]);
        assert_eq!(script_num_bytes(-1), vec![0x81]);
        assert_eq!(script_num_bytes(127), vec![0x7f]);
        assert_eq!(script_num_bytes(128), vec![0x80, 0x00]);
        assert_eq!(script_num_bytes(-128), vec![0x80, 0x80]);
        // 0x1f07ffff, the mainnet genesis bits
        assert_eq!(script_num_bytes(520617983), vec![0xff, 0xff, 0x07, 0x1f]);
    }

    #[test]
    fn test_push_int_small_values_use_opcodes() {
        let mut s = Vec::new();
        push_int(&mut s, 0);
        push_int(&mut s, -1);
        push_int(&mut s, 1);
        push_int(&mut s, 16);
        push_int(&mut s, 17);
        assert_eq!(s, vec![OP_0, OP_1NEGATE, 0x51, 0x60, 0x01, 0x11]);
    }

    #[test]
    fn test_push_data_lengths() {
        let mut s = Vec::new();
        push_data(&mut s, &[0xaa; 75]);
        assert_eq!(s[0], 75);
        assert_eq!(s.len(), 76);

        let mut s = Vec::new();
        push_data(&mut s, &[0xaa; 76]);
        assert_eq!(&s[..2], &[OP_PUSHDATA1, 76]);

        let mut s = Vec::new();
        push_data(&mut s, &[0xaa; 300]);
        assert_eq!(&s[..3], &[OP_PUSHDATA2, 0x2c, 0x01]);
    }

    #[test]
    fn test_p2sh_layout() {
        let id = [7u8; 20];
        let script = script_p2sh(&id);
        assert_eq!(script.len(), 23);
        assert_eq!(&script[..2], &[OP_HASH160, 20]);
        assert_eq!(&script[2..22], &id);
        assert_eq!(script[22], OP_EQUAL);
    }

    #[test]
    fn test_p2pk_uncompressed_key() {
        let script = script_p2pk(&[0x04; 65]);
        assert_eq!(script.len(), 67);
        assert_eq!(script[0], 65);
        assert_eq!(script[66], OP_CHECKSIG);
    }
}
