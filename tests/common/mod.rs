//! Sources that report when their iterators are opened and released.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::vec;

/// Counters shared by a [`Tracked`] source and every iterator it hands out.
#[derive(Clone, Default, Debug)]
pub struct Probe {
    opened: Rc<Cell<usize>>,
    live: Rc<Cell<usize>>,
}

impl Probe {
    /// Iterators created so far.
    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    /// Iterators not yet dropped.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

/// Re-enumerable source over a vector.
#[derive(Clone, Debug)]
pub struct Tracked<T> {
    items: Vec<T>,
    probe: Probe,
}

impl<T: Clone> Tracked<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> (Self, Probe) {
        let probe = Probe::default();
        let source = Self {
            items: items.into_iter().collect(),
            probe: probe.clone(),
        };
        (source, probe)
    }
}

impl<T: Clone> IntoIterator for Tracked<T> {
    type Item = T;
    type IntoIter = TrackedIter<T>;

    fn into_iter(self) -> TrackedIter<T> {
        self.probe.opened.set(self.probe.opened.get() + 1);
        self.probe.live.set(self.probe.live.get() + 1);
        TrackedIter {
            inner: self.items.into_iter(),
            probe: self.probe,
        }
    }
}

#[derive(Debug)]
pub struct TrackedIter<T> {
    inner: vec::IntoIter<T>,
    probe: Probe,
}

impl<T> Iterator for TrackedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for TrackedIter<T> {}

impl<T> Drop for TrackedIter<T> {
    fn drop(&mut self) {
        self.probe.live.set(self.probe.live.get() - 1);
    }
}

/// Characters of `text`.
pub fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}
