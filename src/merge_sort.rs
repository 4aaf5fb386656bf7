//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

#![cfg(feature = "alloc")]

use crate::insertion_sort::insertion_sort;
use core::{cmp, mem, ptr};
use ndarray::{ArrayViewMut1, IndexLonger, s};

#[cfg(not(feature = "std"))]
extern crate alloc as no_std_alloc;
#[cfg(not(feature = "std"))]
use no_std_alloc::vec::Vec;

/// Sorts `v` using merge sort, which is *O*(*n* \* log(*n*)) worst-case.
///
/// Splits at the midpoint, recursively sorts both halves and merges them back into the same
/// span. Partitions of at most `threshold` elements are sorted directly by insertion sort;
/// threshold values below `1` behave like `1`, as partitions of fewer than two elements are
/// already ordered. The sort is stable, deterministic and allocates temporary storage half
/// the length of `v`.
pub fn merge_sort<T, F>(v: ArrayViewMut1<'_, T>, threshold: usize, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	// Sorting has no meaningful behavior on zero-sized types.
	if mem::size_of::<T>() == 0 {
		return;
	}

	let len = v.len();
	if len <= cmp::max(threshold, 1) {
		return insertion_sort(v, is_less);
	}

	// Scratch memory for the merge steps, reused across the whole recursion. The length is
	// kept at zero so the buffer only ever holds shallow copies whose originals stay inside
	// `v`; no destructor runs on a copy if `is_less` panics. Merging copies out the left run,
	// which never exceeds half the span for midpoint splits.
	let mut buf = Vec::<T>::with_capacity(len / 2);
	recurse(v, buf.as_mut_ptr(), threshold, is_less);
}

/// Sorts `v` recursively, merging the sorted halves of each split on the way back up.
fn recurse<T, F>(mut v: ArrayViewMut1<'_, T>, buf: *mut T, threshold: usize, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	if len <= cmp::max(threshold, 1) {
		return insertion_sort(v, is_less);
	}

	let mid = len / 2;
	recurse(v.slice_mut(s![..mid]), buf, threshold, is_less);
	recurse(v.slice_mut(s![mid..]), buf, threshold, is_less);
	// SAFETY: Both runs are non-empty as `2 <= len`, and `buf` provides capacity for the left
	// run as `mid` never exceeds half the length of the allocating call's span.
	unsafe { merge(v, mid, buf, is_less) };
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` into one sorted span occupying `v[..]`,
/// using `buf` as temporary storage for the left run. On ties the left run is consumed first,
/// which keeps the merge stable.
///
/// # Safety
///
/// Both runs must be non-empty, `mid` must not exceed `len - mid` and `buf` must provide
/// capacity for `mid` elements. `T` must not be a zero-sized type.
pub(crate) unsafe fn merge<T, F>(v: ArrayViewMut1<'_, T>, mid: usize, buf: *mut T, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	debug_assert!(0 < mid && mid <= len - mid);

	// The left run is copied into `buf` and consumed front to back, racing the right run
	// which stays in place. Intermediate state is tracked by `hole`, which serves two
	// purposes:
	// 1. Protects integrity of `v` from panics in `is_less`.
	// 2. Fills the remaining open span in `v` once the right run is exhausted.
	//
	// If `is_less` panics at any point, `hole` gets dropped and fills the open span with the
	// unconsumed part of `buf`, so `v` still holds every element it initially held exactly
	// once.
	let mut hole;

	// SAFETY: `buf` provides capacity for `v[..mid]`.
	unsafe {
		for i in 0..mid {
			ptr::copy_nonoverlapping(&v[i], buf.add(i), 1);
		}
		hole = MergeHole {
			buf,
			start: 0,
			end: mid,
			dest: 0,
			v,
		};
	}

	let mut right = mid;
	while hole.start < hole.end && right < len {
		// Consume the lesser side. If equal, prefer the left run to maintain stability.
		// SAFETY: `right` and `hole.dest` are in bounds of `v`, `hole.start` of `buf`; the
		// destination slot was consumed before anything is copied over it.
		unsafe {
			let w = hole.v.view();
			let to_copy: *const T = if is_less(w.uget(right), &*hole.buf.add(hole.start)) {
				let src = hole.v.view_mut().index(right) as *mut T;
				right += 1;
				src
			} else {
				let src = hole.buf.add(hole.start);
				hole.start += 1;
				src
			};
			let dest = hole.v.view_mut().index(hole.dest) as *mut T;
			hole.dest += 1;
			ptr::copy_nonoverlapping(to_copy, dest, 1);
		}
	}
	// `hole` gets dropped; whatever remains of the left run is copied into the open span.

	// When dropped, copies the range `start..end` of `buf` into `v[dest..]`.
	struct MergeHole<'a, T> {
		buf: *mut T,
		start: usize,
		end: usize,
		dest: usize,
		v: ArrayViewMut1<'a, T>,
	}

	impl<T> Drop for MergeHole<'_, T> {
		fn drop(&mut self) {
			// SAFETY: `start..end` stays within the copied-out run and the open span starting
			// at `dest` has exactly `end - start` slots left.
			unsafe {
				for i in 0..self.end - self.start {
					let src = self.buf.add(self.start + i);
					let dest = self.v.view_mut().index(self.dest + i) as *mut T;
					ptr::copy_nonoverlapping(src, dest, 1);
				}
			}
		}
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::merge_sort;
	use core::cmp::Ordering;
	use ndarray::{Array1, arr1};
	use quickcheck_macros::quickcheck;

	#[derive(Debug, Clone, Copy)]
	struct Item {
		index: usize,
		value: u32,
	}

	impl Eq for Item {}

	impl PartialEq for Item {
		fn eq(&self, other: &Self) -> bool {
			self.value == other.value
		}
	}

	impl Ord for Item {
		fn cmp(&self, other: &Self) -> Ordering {
			self.value.cmp(&other.value)
		}
	}

	impl PartialOrd for Item {
		fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
			Some(self.cmp(other))
		}
	}

	impl From<(usize, u32)> for Item {
		fn from((index, value): (usize, u32)) -> Self {
			Self { index, value }
		}
	}

	#[quickcheck]
	fn sorted(xs: Vec<u32>, threshold: u8) {
		let mut sorted = xs.clone();
		sorted.sort();
		let sorted = Array1::from_vec(sorted);
		let mut array = Array1::from_vec(xs);
		merge_sort(array.view_mut(), threshold as usize, &mut u32::lt);
		assert_eq!(array, sorted);
	}

	#[quickcheck]
	fn stably_sorted(xs: Vec<u32>, threshold: u8) {
		let xs = xs
			.into_iter()
			.enumerate()
			.map(Item::from)
			.collect::<Vec<Item>>();
		let mut sorted = xs.clone();
		sorted.sort();
		let sorted = Array1::from_vec(sorted);
		let mut array = Array1::from_vec(xs);
		merge_sort(array.view_mut(), threshold as usize, &mut Item::lt);
		for (a, s) in array.iter().zip(&sorted) {
			assert_eq!(a.index, s.index);
			assert_eq!(a.value, s.value);
		}
	}

	#[test]
	fn splits_at_the_midpoint() {
		let mut array = arr1(&[5, 3, 4, 1, 2]);
		merge_sort(array.view_mut(), 2, &mut u32::lt);
		assert_eq!(array, arr1(&[1, 2, 3, 4, 5]));
	}

	#[test]
	fn empty_and_single() {
		let mut empty = Array1::<u32>::from_vec(Vec::new());
		merge_sort(empty.view_mut(), 2, &mut u32::lt);
		assert_eq!(empty.len(), 0);

		let mut single = arr1(&[7]);
		merge_sort(single.view_mut(), 0, &mut u32::lt);
		assert_eq!(single, arr1(&[7]));
	}

	#[test]
	fn any_threshold_around_the_length() {
		let xs = vec![9, 1, 8, 2, 7, 3, 6, 4, 5, 0];
		for threshold in 0..=xs.len() + 1 {
			let mut array = Array1::from_vec(xs.clone());
			merge_sort(array.view_mut(), threshold, &mut u32::lt);
			assert_eq!(array, arr1(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]));
		}
	}
}
