//! # Common Types

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WTHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WTHashMap<K, V> {
            WTHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WTHashMap<K, V> {
            WTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WTHashSet<V> = ahash::AHashSet<V>;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type WTHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> WTHashMap<K, V> {
            WTHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WTHashMap<K, V> {
            WTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type WTHashSet<V> = std::collections::HashSet<V>;
    }
}
