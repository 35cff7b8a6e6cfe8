//! Collection types used across Scribe.
//!
//! Glyph caches are hit once per character per layout pass, so every map in
//! the workspace goes through this AHash alias instead of the SipHash
//! defaults.

pub use ahash::AHashMap as HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert(('a', 20u32, false), 10.0f32);
        assert_eq!(map.get(&('a', 20, false)), Some(&10.0));
        assert_eq!(map.get(&('a', 20, true)), None);
    }
}
