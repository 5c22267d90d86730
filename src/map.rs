//! Bulk insertion into maps.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::error::{Result, SeqError};

/// Adds a batch of entries to a map, all or nothing.
pub trait MapExt<K, V> {
    /// Insert every entry of `entries`.
    ///
    /// The map is left untouched when any key is already present or occurs
    /// twice in `entries`.
    ///
    /// # Errors
    ///
    /// - [`SeqError::InvalidArgument`] naming the position of the first
    ///   duplicate key.
    /// - [`SeqError::Overflow`] when the map cannot grow to hold the batch.
    fn add_range<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>;
}

fn duplicate_at(position: usize) -> SeqError {
    SeqError::invalid("entries", format!("duplicate key at entry {position}"))
}

impl<K, V, S> MapExt<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn add_range<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut seen = HashSet::with_capacity(entries.len());
        for (position, (key, _)) in entries.iter().enumerate() {
            if self.contains_key(key) || !seen.insert(key) {
                return Err(duplicate_at(position));
            }
        }
        self.try_reserve(entries.len())
            .map_err(|_| SeqError::Overflow {
                requested: entries.len(),
            })?;
        self.extend(entries);
        Ok(())
    }
}

impl<K: Ord, V> MapExt<K, V> for BTreeMap<K, V> {
    fn add_range<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut seen = BTreeSet::new();
        for (position, (key, _)) in entries.iter().enumerate() {
            if self.contains_key(key) || !seen.insert(key) {
                return Err(duplicate_at(position));
            }
        }
        self.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_every_entry() {
        let mut map = HashMap::from([(1, "one")]);
        map.add_range([(2, "two"), (3, "three")]).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&3], "three");
    }

    #[test]
    fn existing_key_leaves_map_untouched() {
        let mut map = HashMap::from([(1, "one")]);
        let err = map.add_range([(2, "two"), (1, "uno")]).unwrap_err();
        assert!(matches!(err, SeqError::InvalidArgument { name: "entries", .. }));
        assert_eq!(map.len(), 1);
        assert_eq!(map[&1], "one");
    }

    #[test]
    fn duplicate_within_batch_is_rejected() {
        let mut map = BTreeMap::new();
        let err = map.add_range([("a", 1), ("b", 2), ("a", 3)]).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument `entries`: duplicate key at entry 2");
        assert!(map.is_empty());
    }

    #[test]
    fn ordered_map_keeps_key_order() {
        let mut map = BTreeMap::from([(5, 'e')]);
        map.add_range([(1, 'a'), (3, 'c')]).unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }
}
