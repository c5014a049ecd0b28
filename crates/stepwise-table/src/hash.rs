//! The slot function shared by every table variant.

/// djb2 over the key's UTF-16 code units, reduced to a slot index.
///
/// `hash = hash * 33 + code` from a seed of 5381, accumulated in a
/// wrapping `u64` and taken `mod capacity` at the end. The code-unit
/// (not byte, not scalar-value) iteration is deliberate: it pins slot
/// placement for non-ASCII keys to one reproducible answer.
pub fn djb2(key: &str, capacity: usize) -> usize {
    let mut h: u64 = 5381;
    for code in key.encode_utf16() {
        h = h.wrapping_mul(33).wrapping_add(u64::from(code));
    }
    (h % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        // seed alone
        assert_eq!(djb2("", 1_000_000), 5381);
        // 5381 * 33 + 'a'
        assert_eq!(djb2("a", 1_000_000), 177_670);
        // (5381 * 33 + 'a') * 33 + 'b'
        assert_eq!(djb2("ab", 10_000_000), 5_863_208);
    }

    #[test]
    fn reduction_is_by_modulo() {
        assert_eq!(djb2("", 100), 81);
        assert_eq!(djb2("a", 7), 177_670 % 7);
    }

    #[test]
    fn slot_is_always_in_range() {
        for cap in [1, 2, 7, 16, 97] {
            for key in ["", "a", "key", "Ω", "🦀", "longer key with spaces"] {
                assert!(djb2(key, cap) < cap);
            }
        }
    }

    #[test]
    fn non_ascii_hashes_by_code_unit() {
        // U+03A9 is one code unit; U+1F980 is a surrogate pair, so the
        // crab contributes two multiply-add rounds
        assert_ne!(djb2("Ω", 1 << 20), djb2("O", 1 << 20));
        assert_eq!(
            djb2("🦀", 1 << 30),
            {
                let mut h: u64 = 5381;
                h = h.wrapping_mul(33).wrapping_add(0xD83E);
                h = h.wrapping_mul(33).wrapping_add(0xDD80);
                (h % (1u64 << 30)) as usize
            }
        );
    }
}
