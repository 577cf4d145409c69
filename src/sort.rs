//! Comparison-driven in-place quicksort.
//!
//! The ordering is always supplied by the caller as a [`Comparer`]; there is
//! no process-wide default. Stock comparers cover totally ordered types
//! ([`Natural`]), floats ([`TotalOrder`]), types with no ordering at all
//! ([`HashOrder`]), and reversal ([`Reverse`]). Any
//! `Fn(&T, &T) -> Ordering` closure is a comparer too.
//!
//! The sort is not stable: the relative order of equal elements is
//! unspecified.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::buffer::TypedBuffer;
use crate::error::{check_range, Result};

/// An ordering strategy over `T`.
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Ascending order for any `Ord` type: integers, `bool`, `char`, strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparer<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        return a.cmp(b);
    }
}

/// IEEE 754 total order for floats, so NaN has a defined place.
#[derive(Clone, Copy, Debug, Default)]
pub struct TotalOrder;

impl Comparer<f32> for TotalOrder {
    #[inline]
    fn compare(&self, a: &f32, b: &f32) -> Ordering {
        return a.total_cmp(b);
    }
}

impl Comparer<f64> for TotalOrder {
    #[inline]
    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        return a.total_cmp(b);
    }
}

/// Orders values by their Fx hash.
///
/// Arbitrary but deterministic; useful for grouping equal values of a type
/// that has no natural ordering. Distinct values may compare equal when their
/// hashes collide.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashOrder;

impl HashOrder {
    fn key<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = FxHasher::default();
        value.hash(&mut hasher);
        return hasher.finish();
    }
}

impl<T: Hash + ?Sized> Comparer<T> for HashOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        return HashOrder::key(a).cmp(&HashOrder::key(b));
    }
}

/// Flips the ordering of the wrapped comparer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        return self.0.compare(b, a);
    }
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        return self(a, b);
    }
}

/// Sort `buffer[lo..hi]` in place.
pub fn quicksort<T, C: Comparer<T>>(
    buffer: &mut TypedBuffer<T>,
    lo: usize,
    hi: usize,
    comparer: &C,
) -> Result<()> {
    check_range(lo, hi, buffer.len())?;
    quicksort_slice(&mut buffer.as_mut_slice()[lo..hi], comparer);
    return Ok(());
}

/// Sort a slice in place.
///
/// The pivot is the middle element, swapped to the front; one partition pass
/// gathers everything strictly less than it, then the pivot drops into place.
/// Recursion goes into the smaller side only, so stack depth stays O(log n)
/// even on inputs that hit the O(n^2) time case.
pub fn quicksort_slice<T, C: Comparer<T>>(slice: &mut [T], comparer: &C) {
    let mut v = slice;
    while v.len() > 1 {
        let pivot = partition(v, comparer);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quicksort_slice(left, comparer);
            v = right;
        } else {
            quicksort_slice(right, comparer);
            v = left;
        }
    }
}

/// Partition around the middle element; returns the pivot's final index.
fn partition<T, C: Comparer<T>>(v: &mut [T], comparer: &C) -> usize {
    v.swap(0, v.len() / 2);
    let mut last = 0;
    for i in 1..v.len() {
        if comparer.compare(&v[i], &v[0]) == Ordering::Less {
            last += 1;
            v.swap(last, i);
        }
    }
    v.swap(0, last);
    return last;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_integers() {
        let mut v = vec![5, 3, 5, 1, 4];
        quicksort_slice(&mut v, &Natural);
        assert_eq!(v, vec![1, 3, 4, 5, 5]);
    }

    #[test]
    fn sorts_empty_and_single() {
        let mut empty: Vec<u8> = vec![];
        quicksort_slice(&mut empty, &Natural);
        assert!(empty.is_empty());

        let mut one = vec![42];
        quicksort_slice(&mut one, &Natural);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn sorts_descending_input() {
        let mut v: Vec<u32> = (0..500).rev().collect();
        quicksort_slice(&mut v, &Natural);
        assert_eq!(v, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn reverse_comparer() {
        let mut v = vec![1, 4, 2, 3];
        quicksort_slice(&mut v, &Reverse(Natural));
        assert_eq!(v, vec![4, 3, 2, 1]);
    }

    #[test]
    fn bools_false_first() {
        let mut v = vec![true, false, true, false];
        quicksort_slice(&mut v, &Natural);
        assert_eq!(v, vec![false, false, true, true]);
    }

    #[test]
    fn floats_total_order() {
        let mut v = vec![2.5f64, -1.0, f64::NAN, 0.0, -0.0];
        quicksort_slice(&mut v, &TotalOrder);
        assert_eq!(v[0], -1.0);
        assert!(v[1] == 0.0 && v[1].is_sign_negative());
        assert!(v[2] == 0.0 && v[2].is_sign_positive());
        assert_eq!(v[3], 2.5);
        assert!(v[4].is_nan());
    }

    #[test]
    fn hash_order_groups_equal_values() {
        let mut v = vec!["b", "a", "b", "c", "a"];
        quicksort_slice(&mut v, &HashOrder);
        for w in v.windows(2) {
            assert!(HashOrder.compare(&w[0], &w[1]) != Ordering::Greater);
        }
        let a = v.iter().position(|s| *s == "a").unwrap();
        assert_eq!(v[a + 1], "a");
    }

    #[test]
    fn closure_comparer() {
        let mut v = vec!["ccc", "a", "bb"];
        quicksort_slice(&mut v, &|a: &&str, b: &&str| a.len().cmp(&b.len()));
        assert_eq!(v, vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn buffer_subrange() {
        let mut b = TypedBuffer::from(vec![9, 8, 7, 6, 5]);
        quicksort(&mut b, 1, 4, &Natural).unwrap();
        assert_eq!(b.as_slice(), &[9, 6, 7, 8, 5]);
    }

    #[test]
    fn buffer_bad_range() {
        let mut b = TypedBuffer::from(vec![3, 2, 1]);
        assert!(quicksort(&mut b, 2, 1, &Natural).is_err());
        assert!(quicksort(&mut b, 0, 4, &Natural).is_err());
        assert_eq!(b.as_slice(), &[3, 2, 1]);
    }
}
