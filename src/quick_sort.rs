//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use crate::{insertion_sort::insertion_sort, partition::partition};
use core::{cmp, mem};
use ndarray::{ArrayViewMut1, Axis};

/// Sorts `v` using quicksort, which is *O*(*n* \* log(*n*)) on average.
///
/// Partitions around the middle element, then recurses into the two resulting sub-ranges.
/// Partitions of at most `threshold` elements are sorted directly by insertion sort;
/// threshold values below `1` behave like `1`, as partitions of fewer than two elements are
/// already ordered. The sort is unstable and in-place.
pub fn quick_sort<T, F>(v: ArrayViewMut1<'_, T>, threshold: usize, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	// Sorting has no meaningful behavior on zero-sized types.
	if mem::size_of::<T>() == 0 {
		return;
	}

	recurse(v, threshold, is_less);
}

/// Sorts `v` recursively.
fn recurse<T, F>(mut v: ArrayViewMut1<'_, T>, threshold: usize, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	loop {
		let len = v.len();
		if len <= cmp::max(threshold, 1) {
			return insertion_sort(v, is_less);
		}

		let mid = partition(v.view_mut(), is_less);

		// Recurse into the shorter side only in order to minimize the total number of
		// recursive calls and consume less stack space. Then just continue with the longer
		// side, akin to tail recursion.
		let (left, right) = v.split_at(Axis(0), mid);
		if left.len() < right.len() {
			recurse(left, threshold, is_less);
			v = right;
		} else {
			recurse(right, threshold, is_less);
			v = left;
		}
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::quick_sort;
	use ndarray::{Array1, arr1};
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn sorted(xs: Vec<u32>, threshold: u8) {
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let sorted = Array1::from_vec(sorted);
		let mut array = Array1::from_vec(xs);
		quick_sort(array.view_mut(), threshold as usize, &mut u32::lt);
		assert_eq!(array, sorted);
	}

	#[test]
	fn duplicates_of_the_pivot() {
		let mut array = arr1(&[2, 2, 2, 1, 3]);
		quick_sort(array.view_mut(), 0, &mut u32::lt);
		assert_eq!(array, arr1(&[1, 2, 2, 2, 3]));
	}

	#[test]
	fn all_equal_terminates() {
		let mut array = arr1(&[4, 4, 4, 4]);
		quick_sort(array.view_mut(), 0, &mut u32::lt);
		assert_eq!(array, arr1(&[4, 4, 4, 4]));
	}

	#[test]
	fn empty_and_single() {
		let mut empty = Array1::<u32>::from_vec(Vec::new());
		quick_sort(empty.view_mut(), 2, &mut u32::lt);
		assert_eq!(empty.len(), 0);

		let mut single = arr1(&[7]);
		quick_sort(single.view_mut(), 0, &mut u32::lt);
		assert_eq!(single, arr1(&[7]));
	}

	#[test]
	fn descending_input() {
		let mut array = arr1(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
		quick_sort(array.view_mut(), 3, &mut u32::lt);
		assert_eq!(array, arr1(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]));
	}
}
