//! Grouping elements by a key.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::{Operator, Step};

/// A key and the elements that produced it, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grouping<K, T> {
    key: K,
    items: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    /// Build a grouping from its parts.
    pub fn new(key: K, items: Vec<T>) -> Self {
        Self { key, items }
    }

    /// Shared key of every element.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Elements in source order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the grouping holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into key and elements.
    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.items)
    }
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, K, T> IntoIterator for &'a Grouping<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Buckets every element by key; groups come out in order of first key
/// occurrence.
///
/// The whole source is consumed before the first group is produced.
pub struct Grouper<T, F> {
    key: F,
    _item: PhantomData<fn(&T)>,
}

impl<T, K, F> Grouper<T, F>
where
    F: FnMut(&T) -> K,
{
    /// Group by `key`.
    pub fn new(key: F) -> Self {
        Self {
            key,
            _item: PhantomData,
        }
    }
}

impl<T, F: Clone> Clone for Grouper<T, F> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for Grouper<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouper").finish_non_exhaustive()
    }
}

impl<T, K, F> Operator for Grouper<T, F>
where
    F: FnMut(&T) -> K,
    K: Hash + Eq + Clone,
{
    type Item = T;
    type Output = Grouping<K, T>;
    type Step = GroupStep<T, K, F>;

    fn name(&self) -> &'static str {
        "group_by"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        GroupStep {
            key: self.key,
            slots: HashMap::new(),
            groups: Vec::new(),
            ready: None,
        }
    }
}

/// Traversal state of [`Grouper`].
pub struct GroupStep<T, K, F> {
    key: F,
    slots: HashMap<K, usize>,
    groups: Vec<Grouping<K, T>>,
    ready: Option<vec::IntoIter<Grouping<K, T>>>,
}

impl<T, K, F> Step for GroupStep<T, K, F>
where
    F: FnMut(&T) -> K,
    K: Hash + Eq + Clone,
{
    type Item = T;
    type Output = Grouping<K, T>;

    fn accept(&mut self, _index: usize, item: T) -> Option<Grouping<K, T>> {
        let key = (self.key)(&item);
        match self.slots.get(&key) {
            Some(&slot) => self.groups[slot].items.push(item),
            None => {
                self.slots.insert(key.clone(), self.groups.len());
                self.groups.push(Grouping::new(key, vec![item]));
            }
        }
        None
    }

    fn finish(&mut self) -> Option<Grouping<K, T>> {
        if self.ready.is_none() {
            self.slots.clear();
            self.ready = Some(std::mem::take(&mut self.groups).into_iter());
        }
        self.ready.as_mut().and_then(Iterator::next)
    }
}

impl<T, K, F> fmt::Debug for GroupStep<T, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupStep")
            .field("groups", &self.groups.len())
            .field("draining", &self.ready.is_some())
            .finish_non_exhaustive()
    }
}

/// Groups runs of consecutive elements with equal keys.
///
/// Each run is produced as soon as the key changes, so the source is never
/// buffered beyond the current run. Equivalent to [`Grouper`] only when equal
/// keys are already adjacent.
pub struct RunGrouper<T, F> {
    key: F,
    _item: PhantomData<fn(&T)>,
}

impl<T, K, F> RunGrouper<T, F>
where
    F: FnMut(&T) -> K,
{
    /// Group runs by `key`.
    pub fn new(key: F) -> Self {
        Self {
            key,
            _item: PhantomData,
        }
    }
}

impl<T, F: Clone> Clone for RunGrouper<T, F> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for RunGrouper<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunGrouper").finish_non_exhaustive()
    }
}

impl<T, K, F> Operator for RunGrouper<T, F>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = T;
    type Output = Grouping<K, T>;
    type Step = RunStep<T, K, F>;

    fn name(&self) -> &'static str {
        "group_runs_by"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        RunStep {
            key: self.key,
            run: None,
        }
    }
}

/// Traversal state of [`RunGrouper`].
pub struct RunStep<T, K, F> {
    key: F,
    run: Option<Grouping<K, T>>,
}

impl<T, K, F> Step for RunStep<T, K, F>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = T;
    type Output = Grouping<K, T>;

    fn accept(&mut self, _index: usize, item: T) -> Option<Grouping<K, T>> {
        let key = (self.key)(&item);
        if let Some(run) = self.run.as_mut() {
            if run.key == key {
                run.items.push(item);
                return None;
            }
        }
        self.run.replace(Grouping::new(key, vec![item]))
    }

    fn finish(&mut self) -> Option<Grouping<K, T>> {
        self.run.take()
    }
}

impl<T, K, F> fmt::Debug for RunStep<T, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunStep")
            .field("run_len", &self.run.as_ref().map_or(0, Grouping::len))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::collect;

    fn render(groups: Vec<Grouping<char, char>>) -> Vec<(char, String)> {
        groups
            .into_iter()
            .map(|g| {
                let (key, items) = g.into_parts();
                (key, items.into_iter().collect())
            })
            .collect()
    }

    #[test]
    fn groups_follow_first_occurrence() {
        let groups = collect("aabbaa".chars(), Grouper::new(|c: &char| *c));
        assert_eq!(
            render(groups),
            vec![('a', "aaaa".to_string()), ('b', "bb".to_string())]
        );
    }

    #[test]
    fn items_keep_source_order_within_a_group() {
        let groups = collect(1..=10, Grouper::new(|x: &i32| x % 3));
        let keys: Vec<i32> = groups.iter().map(|g| *g.key()).collect();
        assert_eq!(keys, vec![1, 2, 0]);
        assert_eq!(groups[0].items(), &[1, 4, 7, 10]);
        assert_eq!(groups[2].items(), &[3, 6, 9]);
    }

    #[test]
    fn runs_split_on_key_change() {
        let runs = collect("aabbaa".chars(), RunGrouper::new(|c: &char| *c));
        assert_eq!(
            render(runs),
            vec![
                ('a', "aa".to_string()),
                ('b', "bb".to_string()),
                ('a', "aa".to_string()),
            ]
        );
    }

    #[test]
    fn empty_source_has_no_groups() {
        assert!(collect(Vec::<u8>::new(), Grouper::new(|x: &u8| *x)).is_empty());
        assert!(collect(Vec::<u8>::new(), RunGrouper::new(|x: &u8| *x)).is_empty());
    }

    #[test]
    fn hand_built_grouping_may_be_empty() {
        let grouping: Grouping<&str, u8> = Grouping::new("k", Vec::new());
        assert!(grouping.is_empty());
        assert!(!Grouping::new("k", vec![1u8]).is_empty());
    }

    #[test]
    fn grouping_iterates_its_items() {
        let grouping = Grouping::new("k", vec![1, 2, 3]);
        assert_eq!(grouping.len(), 3);
        assert_eq!((&grouping).into_iter().sum::<i32>(), 6);
        assert_eq!(grouping.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
