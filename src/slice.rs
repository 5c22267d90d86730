//! Fast paths for slices.
//!
//! A slice knows its length and supports random access, so these functions
//! skip the operator engine: index searches from the end scan backwards and
//! stop early, and part splitting borrows sub-slices instead of allocating
//! chunks.

use std::num::NonZeroUsize;

use crate::error::{Result, SeqError};
use crate::ops::ChunkSize;

/// The last `count` positions of elements accepted by `predicate`, ascending.
///
/// Scans from the end and stops after `count` matches.
///
/// # Errors
///
/// [`SeqError::InvalidArgument`] when `count` is zero.
pub fn last_n_indices_where<T, F>(items: &[T], mut predicate: F, count: usize) -> Result<Vec<usize>>
where
    F: FnMut(&T) -> bool,
{
    let count = SeqError::require_positive("count", count)?;
    let mut found: Vec<usize> = items
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, item)| predicate(*item))
        .map(|(index, _)| index)
        .take(count)
        .collect();
    found.reverse();
    Ok(found)
}

/// The last `count` positions of elements equal to `target`, ascending.
///
/// # Errors
///
/// [`SeqError::InvalidArgument`] when `count` is zero.
pub fn last_n_indices_of<T, U>(items: &[T], target: &U, count: usize) -> Result<Vec<usize>>
where
    T: PartialEq<U>,
{
    last_n_indices_where(items, |item| item == target, count)
}

/// About `parts` borrowed sub-slices of equal length; the last may be shorter.
///
/// # Errors
///
/// [`SeqError::InvalidArgument`] when `parts` is zero.
pub fn split_into<T>(items: &[T], parts: usize) -> Result<Vec<&[T]>> {
    let parts = NonZeroUsize::new(parts)
        .ok_or_else(|| SeqError::invalid("parts", "must be greater than zero"))?;
    let size = ChunkSize::Parts(parts).resolve(Some(items.len()));
    Ok(items.chunks(size).collect())
}

/// Position of the first element equal to `target`.
pub fn index_of<T, U>(items: &[T], target: &U) -> Option<usize>
where
    T: PartialEq<U>,
{
    items.iter().position(|item| item == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backward_scan_stops_early() {
        let mut calls = 0;
        let items: Vec<u32> = (0..100).collect();
        let found = last_n_indices_where(
            &items,
            |x| {
                calls += 1;
                x % 10 == 0
            },
            2,
        )
        .unwrap();
        assert_eq!(found, vec![80, 90]);
        assert_eq!(calls, 20);
    }

    #[test]
    fn last_indices_of_value() {
        assert_eq!(last_n_indices_of(&[1, 5, 1, 1], &1, 2).unwrap(), vec![2, 3]);
        assert_eq!(last_n_indices_of(&[1, 5], &7, 2).unwrap(), Vec::<usize>::new());
        assert!(last_n_indices_of(&[1], &1, 0).is_err());
    }

    #[test]
    fn split_into_borrows() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        let parts = split_into(&items, 3).unwrap();
        assert_eq!(parts, vec![&[1, 2, 3][..], &[4, 5, 6][..], &[7][..]]);
        assert!(split_into(&items, 0).is_err());
        assert!(split_into::<u8>(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn first_position() {
        assert_eq!(index_of(&["x", "y", "y"], &"y"), Some(1));
        assert_eq!(index_of(&["x"], &"z"), None);
    }
}
