//! Stable block ID generation.
//!
//! IDs must be deterministic across parses and across runs, so the content
//! hash is a fixed FNV-1a 64 rather than `std`'s randomly seeded hasher.
//! Because the positional index participates, inserting a block earlier in
//! the document shifts later IDs; the system assumes append-only streams, so
//! that churn only touches the actively streaming tail.

use super::model::{BlockData, BlockKind};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit hash.
pub const fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Render a u64 in base 36 (digits then lowercase letters).
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_owned();
    }
    let mut buf = [0u8; 13];
    let mut i = buf.len();
    while value > 0 {
        i -= 1;
        buf[i] = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8_lossy(&buf[i..]).into_owned()
}

/// Derive a block's stable ID.
///
/// `{kind}_{index}_{base36(fnv1a64(content))}` for every kind except tables,
/// which are keyed `{kind}_{index}_{row_count}` so that identity only changes
/// when a complete new row appears, not while a row's cells are still
/// streaming.
pub fn block_id(kind: BlockKind, index: usize, content: &str, data: &BlockData) -> String {
    if let BlockData::Table { rows, .. } = data {
        return format!("{}_{}_{}", kind.name(), index, rows.len());
    }
    format!(
        "{}_{}_{}",
        kind.name(),
        index,
        to_base36(fnv1a64(content.as_bytes()))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_vectors() {
        // Reference vectors for FNV-1a 64
        assert_eq!(fnv1a64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a64(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a64(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_block_id_shape() {
        let id = block_id(BlockKind::Header, 3, "Hello", &BlockData::Header { level: 1 });
        assert!(id.starts_with("header_3_"));
    }

    #[test]
    fn test_block_id_deterministic() {
        let a = block_id(BlockKind::Paragraph, 0, "x", &BlockData::None);
        let b = block_id(BlockKind::Paragraph, 0, "x", &BlockData::None);
        assert_eq!(a, b);
    }
}
