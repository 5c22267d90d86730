//! Numeric helpers over sequences, generic through `num-traits`.

use std::iter::FusedIterator;

use num_traits::{CheckedAdd, ToPrimitive, Zero};

use crate::error::{Result, SeqError};

/// Sum of every element, failing instead of wrapping on overflow.
///
/// # Errors
///
/// [`SeqError::ArithmeticOverflow`] when the sum does not fit in `T`.
pub fn sum<T, I>(items: I) -> Result<T>
where
    I: IntoIterator<Item = T>,
    T: CheckedAdd + Zero,
{
    items.into_iter().try_fold(T::zero(), |acc, item| {
        acc.checked_add(&item)
            .ok_or(SeqError::ArithmeticOverflow { operation: "sum" })
    })
}

/// Arithmetic mean as `f64`; `None` for an empty sequence or an element
/// without an `f64` representation.
pub fn average<T, I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = T>,
    T: ToPrimitive,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for item in items {
        total += item.to_f64()?;
        count += 1;
    }
    (count > 0).then(|| total / count as f64)
}

/// Smallest and largest element in one pass; `None` when empty.
///
/// Incomparable elements (such as `NaN`) never replace the current extremes.
pub fn min_max<T, I>(items: I) -> Option<(T, T)>
where
    I: IntoIterator<Item = T>,
    T: PartialOrd + Clone,
{
    let mut iter = items.into_iter();
    let first = iter.next()?;
    Some(iter.fold((first.clone(), first), |(min, max), item| {
        if item < min {
            (item, max)
        } else if item > max {
            (min, item)
        } else {
            (min, max)
        }
    }))
}

/// Values from `start` towards `end` (exclusive) in increments of `step`.
///
/// A negative step counts down. The range ends early rather than overflow.
///
/// # Errors
///
/// [`SeqError::InvalidArgument`] when `step` is zero.
pub fn stepped_range<T>(start: T, end: T, step: T) -> Result<SteppedRange<T>>
where
    T: CheckedAdd + Zero + PartialOrd + Copy,
{
    if step.is_zero() {
        return Err(SeqError::invalid("step", "must not be zero"));
    }
    Ok(SteppedRange {
        next: Some(start),
        end,
        step,
        ascending: step > T::zero(),
    })
}

/// Iterator returned by [`stepped_range`].
#[derive(Debug, Clone)]
pub struct SteppedRange<T> {
    next: Option<T>,
    end: T,
    step: T,
    ascending: bool,
}

impl<T> Iterator for SteppedRange<T>
where
    T: CheckedAdd + PartialOrd + Copy,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        let in_range = if self.ascending {
            current < self.end
        } else {
            current > self.end
        };
        if !in_range {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(&self.step);
        Some(current)
    }
}

impl<T> FusedIterator for SteppedRange<T> where T: CheckedAdd + PartialOrd + Copy {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_detects_overflow() {
        assert_eq!(sum(vec![1u8, 2, 3]), Ok(6));
        assert_eq!(sum(Vec::<i64>::new()), Ok(0));
        assert_eq!(
            sum(vec![200u8, 100]),
            Err(SeqError::ArithmeticOverflow { operation: "sum" })
        );
    }

    #[test]
    fn average_of_values() {
        assert_eq!(average(vec![1, 2, 3, 4]), Some(2.5));
        assert_eq!(average(Vec::<f32>::new()), None);
    }

    #[test]
    fn min_max_single_pass() {
        assert_eq!(min_max(vec![3, -1, 7, 2]), Some((-1, 7)));
        assert_eq!(min_max(vec![5]), Some((5, 5)));
        assert_eq!(min_max(Vec::<u8>::new()), None);
    }

    #[test]
    fn stepping_both_ways() {
        let up: Vec<i32> = stepped_range(0, 10, 3).unwrap().collect();
        assert_eq!(up, vec![0, 3, 6, 9]);
        let down: Vec<i32> = stepped_range(5, 0, -2).unwrap().collect();
        assert_eq!(down, vec![5, 3, 1]);
        assert_eq!(stepped_range(3, 3, 1).unwrap().count(), 0);
    }

    #[test]
    fn stepping_stops_before_overflow() {
        let values: Vec<u8> = stepped_range(250u8, 255, 4).unwrap().collect();
        assert_eq!(values, vec![250, 254]);
        let values: Vec<u8> = stepped_range(252u8, 255, 2).unwrap().collect();
        assert_eq!(values, vec![252, 254]);
    }

    #[test]
    fn zero_step_is_rejected() {
        assert!(matches!(
            stepped_range(0, 10, 0),
            Err(SeqError::InvalidArgument { name: "step", .. })
        ));
    }
}
