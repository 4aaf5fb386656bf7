//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use crate::partition::CopyOnDrop;
use core::{mem::ManuallyDrop, ptr};
use ndarray::{ArrayViewMut1, IndexLonger, s};

/// Sorts `v` using insertion sort, which is *O*(*n*^2) worst-case.
///
/// Serves as the leaf of the recursive sorts: partitions whose size is at or below the
/// configured threshold are sorted directly instead of being split further. The sort is
/// stable and in-place.
pub fn insertion_sort<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	for i in 1..v.len() {
		shift_tail(v.slice_mut(s![..i + 1]), is_less);
	}
}

/// Shifts the last element to the left until it encounters a smaller or equal element.
fn shift_tail<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	if len < 2 {
		return;
	}
	// SAFETY: All indexing stays within `0..len`. The last element is read into a
	// stack-allocated temporary and the traversed elements are copied one slot to the right;
	// `hole` writes the temporary into the slot that opened up, even if `is_less` panics, so
	// `v` holds every element exactly once at all times.
	unsafe {
		let w = v.view();
		// If the last two elements are in order, the whole run is.
		if !is_less(w.uget(len - 1), w.uget(len - 2)) {
			return;
		}
		let tmp = ManuallyDrop::new(ptr::read(w.uget(len - 1)));
		let mut hole = CopyOnDrop {
			src: &*tmp,
			dest: v.view_mut().index(len - 1),
		};
		for i in (0..len - 1).rev() {
			let src = v.view_mut().index(i) as *mut T;
			if !is_less(&*tmp, &*src) {
				break;
			}
			// Move the `i`-th element one slot to the right, shifting the hole to the left.
			ptr::copy_nonoverlapping(src, hole.dest, 1);
			hole.dest = src;
		}
		// `hole` gets dropped and copies `tmp` into the remaining hole in `v`.
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::insertion_sort;
	use ndarray::Array1;
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		let mut array = Array1::from_vec(xs);
		insertion_sort(array.view_mut(), &mut u32::lt);
		for i in 1..array.len() {
			assert!(array[i - 1] <= array[i]);
		}
	}

	#[quickcheck]
	fn stably_sorted(xs: Vec<u8>) {
		let xs = xs
			.into_iter()
			.enumerate()
			.map(|(index, value)| (value, index))
			.collect::<Vec<_>>();
		let mut sorted = xs.clone();
		sorted.sort();
		let mut array = Array1::from_vec(xs);
		insertion_sort(array.view_mut(), &mut |a: &(u8, usize), b: &(u8, usize)| {
			a.0 < b.0
		});
		assert_eq!(array.to_vec(), sorted);
	}
}
