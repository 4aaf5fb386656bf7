//! Derivative work of [`rayon::slice::mergesort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`rayon::slice::mergesort`]: https://docs.rs/rayon/latest/src/rayon/slice/mergesort.rs.html

use crate::{insertion_sort::insertion_sort, merge_sort::merge};
use core::{cmp, mem};
use ndarray::{ArrayViewMut1, Axis};

/// We need to transmit a raw pointer into the scratch buffer across threads. It is possible
/// to do this without any unsafe code by converting the pointer to `usize` or to
/// `AtomicPtr<T>` then back to a raw pointer for use. We prefer this approach because code
/// that uses this type is more explicit.
///
/// Unsafe code is still required to dereference the pointer, so this type is not unsound on
/// its own, although it does partly lift the unconditional `!Send` on raw pointers. As
/// always, dereference with care: tasks must access disjoint regions only.
struct SendPtr<T>(*mut T);

// SAFETY: !Send for raw pointers is not for safety, just as a lint.
unsafe impl<T: Send> Send for SendPtr<T> {}

// SAFETY: !Sync for raw pointers is not for safety, just as a lint.
unsafe impl<T: Send> Sync for SendPtr<T> {}

impl<T> SendPtr<T> {
	fn get(self) -> *mut T {
		self.0
	}
}

// Implement Clone and Copy without the `T: Clone` and `T: Copy` bounds from the derives.
impl<T> Clone for SendPtr<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for SendPtr<T> {}

/// Sorts `v` using merge sort with both halves of every split above `threshold` sorted as
/// concurrent tasks.
///
/// The merge of a split is a join barrier: it runs strictly after both of its sub-sorts
/// complete and never while either is still in flight. Partitions of at most `threshold`
/// elements are sorted directly by insertion sort without spawning a task. The sort is
/// stable, *O*(*n* \* log(*n*)) worst-case and allocates a temporary buffer of the same
/// length as `v`.
///
/// Forked tasks are work items drained by rayon's fixed pool of worker threads, so actual
/// parallelism is bounded by the pool size while the number of outstanding tasks is bounded
/// by the partition count the threshold implies.
pub fn par_merge_sort<T, F>(v: ArrayViewMut1<'_, T>, threshold: usize, is_less: F)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	// Sorting has no meaningful behavior on zero-sized types.
	if mem::size_of::<T>() == 0 {
		return;
	}

	let len = v.len();
	if len <= cmp::max(threshold, 1) {
		return insertion_sort(v, &mut |a: &T, b: &T| is_less(a, b));
	}

	// Scratch memory for the merge steps, shared by all tasks: the task sorting `v[a..b]`
	// owns `buf[a..b]`, so tasks merging concurrently never touch overlapping regions. The
	// length is kept at zero so the buffer only ever holds shallow copies whose originals
	// stay inside `v`; no destructor runs on a copy if `is_less` panics.
	let mut buf = Vec::<T>::with_capacity(len);
	recurse(v, SendPtr(buf.as_mut_ptr()), threshold, &is_less);
}

/// Sorts `v` recursively, forking into both halves of each split and merging behind the join
/// barrier. `buf` points at this task's region of the scratch buffer, as long as its span.
fn recurse<T, F>(mut v: ArrayViewMut1<'_, T>, buf: SendPtr<T>, threshold: usize, is_less: &F)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	let len = v.len();
	if len <= cmp::max(threshold, 1) {
		return insertion_sort(v, &mut |a: &T, b: &T| is_less(a, b));
	}

	let mid = len / 2;
	// SAFETY: The right task's scratch region starts past the `mid` elements of the left
	// task's region; both stay within this task's `len` elements.
	let right_buf = SendPtr(unsafe { buf.get().add(mid) });
	let (left, right) = v.view_mut().split_at(Axis(0), mid);
	// The halves are disjoint views into the backing array, so the tasks mutate
	// non-overlapping regions without locks.
	rayon::join(
		move || recurse(left, buf, threshold, is_less),
		move || recurse(right, right_buf, threshold, is_less),
	);
	// SAFETY: Both runs are sorted and non-empty once `join` returns, their tasks are done
	// with this region of the scratch buffer, and it provides capacity for the left run.
	unsafe { merge(v, mid, buf.get(), &mut |a: &T, b: &T| is_less(a, b)) };
}

#[cfg(test)]
mod test {
	use super::par_merge_sort;
	use crate::{merge_sort::merge_sort, verify::verify};
	use core::cmp::Ordering;
	use ndarray::{Array1, arr1};
	use quickcheck_macros::quickcheck;
	use rand::{Rng, SeedableRng, rngs::StdRng};

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

	#[cfg_attr(miri, ignore)]
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
		par_merge_sort(array.view_mut(), threshold as usize, Item::lt);
		for (a, s) in array.iter().zip(&sorted) {
			assert_eq!(a.index, s.index);
			assert_eq!(a.value, s.value);
		}
	}

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn matches_sequential_variant(xs: Vec<u32>, threshold: u8) {
		let mut sequential = Array1::from_vec(xs.clone());
		merge_sort(sequential.view_mut(), threshold as usize, &mut u32::lt);
		let mut parallel = Array1::from_vec(xs);
		par_merge_sort(parallel.view_mut(), threshold as usize, u32::lt);
		assert_eq!(parallel, sequential);
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn large_pseudorandom_matches_reference() {
		let mut rng = StdRng::seed_from_u64(0x5EED);
		let xs = (0..100_000).map(|_| rng.random::<u32>()).collect::<Vec<_>>();
		let mut reference = xs.clone();
		reference.sort_unstable();
		let reference = Array1::from_vec(reference);
		let mut array = Array1::from_vec(xs);
		par_merge_sort(array.view_mut(), 1 << 10, u32::lt);
		assert!(verify(&array, &reference).is_ok());
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn splits_at_the_midpoint() {
		let mut array = arr1(&[5, 3, 4, 1, 2]);
		par_merge_sort(array.view_mut(), 2, u32::lt);
		assert_eq!(array, arr1(&[1, 2, 3, 4, 5]));
	}
}
