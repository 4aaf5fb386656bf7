//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use core::{cmp::Ordering, mem::ManuallyDrop, ptr};
use ndarray::{ArrayView1, ArrayViewMut1};

/// When dropped, copies from `src` into `dest`.
pub(crate) struct CopyOnDrop<T> {
	pub src: *const T,
	pub dest: *mut T,
}

impl<T> Drop for CopyOnDrop<T> {
	fn drop(&mut self) {
		// SAFETY: Construction sites guarantee `src` and `dest` stay valid for the lifetime of
		// the guard and that overwriting `dest` leaks no element.
		unsafe {
			ptr::copy_nonoverlapping(self.src, self.dest, 1);
		}
	}
}

/// Partitions `v` in place around the value of its middle element.
///
/// Returns the split point `mid` such that every element of `v[..mid]` compares less than or
/// equal to the pivot and every element of `v[mid..]` compares greater than or equal to it.
/// The split point strictly separates the range, `0 < mid < len`, so both sides are smaller
/// than `v` and recursion always makes progress, including on runs of elements equal to the
/// pivot, which are split near the middle.
///
/// Scans from both ends, advancing the head cursor over elements less than the pivot and the
/// tail cursor over elements greater than the pivot, swapping out-of-place pairs and stepping
/// both cursors past them, until the cursors cross. The pivot is the lower middle element;
/// with the upper middle, a two-element range whose pivot is the maximum would end the scan
/// with an empty right side.
pub fn partition<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &mut F) -> usize
where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	debug_assert!(len >= 2);

	// Read the pivot into a stack-allocated temporary for the duration of the scan. The
	// element itself stays inside `v` and keeps taking part in swaps; the temporary is a
	// shallow copy that is never dropped nor written back, so `v` holds every element exactly
	// once even if `is_less` panics.
	let pivot = unsafe { ManuallyDrop::new(ptr::read(&v[(len - 1) / 2])) };

	let mut head = 0;
	let mut tail = len - 1;
	loop {
		// SAFETY: The head scan stops at the latest on an element not less than the pivot and
		// the tail scan on one not greater. In the first round the pivot's own position bounds
		// both scans; in later rounds the most recently swapped pair does, as the swap leaves
		// an element not greater than the pivot at the old head and one not less at the old
		// tail. Neither cursor leaves `0..len`.
		unsafe {
			let w = v.view();
			while is_less(w.uget(head), &*pivot) {
				head += 1;
			}
			while is_less(&*pivot, w.uget(tail)) {
				tail -= 1;
			}
		}
		if head >= tail {
			return tail + 1;
		}
		v.swap(head, tail);
		head += 1;
		tail -= 1;
	}
}

/// Checks whether each element orders at most like its successor under `compare`.
pub(crate) fn is_sorted<A, F>(v: ArrayView1<'_, A>, mut compare: F) -> bool
where
	F: FnMut(&A, &A) -> Option<Ordering>,
{
	let mut iter = v.iter();
	let Some(mut prev) = iter.next() else {
		return true;
	};
	for next in iter {
		if compare(prev, next).is_none_or(Ordering::is_gt) {
			return false;
		}
		prev = next;
	}
	true
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::partition;
	use ndarray::{Array1, arr1, s};
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn splits_strictly_inside(xs: Vec<u32>) {
		if xs.len() < 2 {
			return;
		}
		let mut array = Array1::from_vec(xs);
		let mid = partition(array.view_mut(), &mut u32::lt);
		assert!(mid > 0 && mid < array.len());
		let left = array.slice(s![..mid]);
		let right = array.slice(s![mid..]);
		assert!(left.iter().all(|l| right.iter().all(|r| l <= r)));
	}

	#[test]
	fn all_equal_splits_near_middle() {
		let mut array = arr1(&[4, 4, 4, 4]);
		let mid = partition(array.view_mut(), &mut u32::lt);
		assert_eq!(mid, 2);
		assert_eq!(array, arr1(&[4, 4, 4, 4]));
	}

	#[test]
	fn maximal_pivot_keeps_the_tail() {
		// The pivot is the maximum of the range; the scan must still produce a non-empty
		// right side.
		let mut array = arr1(&[1, 3, 1]);
		let mid = partition(array.view_mut(), &mut u32::lt);
		assert!(mid > 0 && mid < 3);
		let left = array.slice(s![..mid]);
		let right = array.slice(s![mid..]);
		assert!(left.iter().all(|l| right.iter().all(|r| l <= r)));
	}
}
