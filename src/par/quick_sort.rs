//! Derivative work of [`rayon::slice::quicksort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`rayon::slice::quicksort`]: https://docs.rs/rayon/latest/src/rayon/slice/quicksort.rs.html

use crate::{insertion_sort::insertion_sort, partition::partition};
use core::{cmp, mem};
use ndarray::{ArrayViewMut1, Axis};

/// Sorts `v` using quicksort with both recursive calls of every partitioning issued as
/// concurrent tasks.
///
/// Partitioning itself always executes sequentially, as it mutates the full range and cannot
/// be split safely; only the recursion into the two resulting sub-ranges forks, and the
/// parent returns strictly after both tasks complete. Partitions of at most `threshold`
/// elements are sorted directly by insertion sort without spawning a task. The sort is
/// unstable and in-place.
///
/// Forked tasks are work items drained by rayon's fixed pool of worker threads, so actual
/// parallelism is bounded by the pool size while the number of outstanding tasks is bounded
/// by the partition count the threshold implies.
pub fn par_quick_sort<T, F>(v: ArrayViewMut1<'_, T>, threshold: usize, is_less: F)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	// Sorting has no meaningful behavior on zero-sized types.
	if mem::size_of::<T>() == 0 {
		return;
	}

	recurse(v, threshold, &is_less);
}

/// Sorts `v` recursively, forking into both sides of each partitioning.
fn recurse<T, F>(mut v: ArrayViewMut1<'_, T>, threshold: usize, is_less: &F)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	let len = v.len();
	if len <= cmp::max(threshold, 1) {
		return insertion_sort(v, &mut |a: &T, b: &T| is_less(a, b));
	}

	let mid = partition(v.view_mut(), &mut |a: &T, b: &T| is_less(a, b));

	// The halves are disjoint views into the backing array, so the tasks mutate
	// non-overlapping regions without locks.
	let (left, right) = v.split_at(Axis(0), mid);
	rayon::join(
		|| recurse(left, threshold, is_less),
		|| recurse(right, threshold, is_less),
	);
}

#[cfg(test)]
mod test {
	use super::par_quick_sort;
	use crate::quick_sort::quick_sort;
	use ndarray::{Array1, arr1};
	use quickcheck_macros::quickcheck;

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn sorted(xs: Vec<u32>, threshold: u8) {
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let sorted = Array1::from_vec(sorted);
		let mut array = Array1::from_vec(xs);
		par_quick_sort(array.view_mut(), threshold as usize, u32::lt);
		assert_eq!(array, sorted);
	}

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn matches_sequential_variant(xs: Vec<u32>, threshold: u8) {
		let mut sequential = Array1::from_vec(xs.clone());
		quick_sort(sequential.view_mut(), threshold as usize, &mut u32::lt);
		let mut parallel = Array1::from_vec(xs);
		par_quick_sort(parallel.view_mut(), threshold as usize, u32::lt);
		assert_eq!(parallel, sequential);
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn all_equal_terminates() {
		let mut array = Array1::from_vec(vec![4u32; 1024]);
		par_quick_sort(array.view_mut(), 16, u32::lt);
		assert_eq!(array, Array1::from_vec(vec![4u32; 1024]));
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn duplicates_of_the_pivot() {
		let mut array = arr1(&[2, 2, 2, 1, 3]);
		par_quick_sort(array.view_mut(), 0, u32::lt);
		assert_eq!(array, arr1(&[1, 2, 2, 2, 3]));
	}
}
