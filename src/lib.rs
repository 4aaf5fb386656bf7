//! Threshold-driven divide-and-conquer sorting (merge sort and quicksort, each in a
//! sequential and a parallel fork/join form) for non-contiguous (sub)views into
//! *n*-dimensional [`ndarray`] arrays.
//!
//! Every strategy splits its (sub)view into disjoint partitions and sorts them recursively:
//! the merge family splits at the midpoint and merges the sorted halves back in place, the
//! quicksort family partitions around a pivot and recurses into the two sides. Partitions of
//! at most a caller-configured `threshold` elements are sorted directly by insertion sort.
//! The parallel variants issue the two recursive calls of every split above the threshold as
//! concurrent `rayon` tasks and join them before merging or returning, so sibling tasks
//! always mutate disjoint regions of the same backing array without locks.
//!
//! # Example
//!
//! ```
//! use ndarray_forksort::{ForkSort1Ext, ndarray::arr2};
//!
//! // 2-dimensional array of 4 rows and 5 columns.
//! let mut v = arr2(&[[-5, 4, 1, -3,  2],   // row 0, axis 0
//!                    [ 8, 3, 2,  4,  8],   // row 1, axis 0
//!                    [38, 9, 3,  0,  3],   // row 2, axis 0
//!                    [ 4, 9, 0,  8, -1]]); // row 3, axis 0
//!
//! // Mutable subview into the last column. Due to row-major memory layout, columns are
//! // non-contiguous and hence cannot be sorted by viewing them as mutable slices.
//! let mut column = v.column_mut(4);
//! assert_eq!(column.as_slice_mut(), None);
//!
//! // Sort the column in place; partitions of at most 2 elements are insertion-sorted.
//! column.quick_sort(2);
//!
//! assert!(v == arr2(&[[-5, 4, 1, -3, -1],
//!                     [ 8, 3, 2,  4,  2],
//!                     [38, 9, 3,  0,  3],
//!                     [ 4, 9, 0,  8,  8]]));
//! ```
//!
//! # Threshold
//!
//! The `threshold` argument of every sort is the partition size at or below which the
//! recursion stops splitting and sorts directly. It is passed explicitly per call instead of
//! being a process-wide constant. Values below `1` behave like `1`, as partitions of fewer
//! than two elements are already ordered. For the parallel variants the threshold also bounds
//! the number of outstanding tasks: every split above it forks exactly two tasks, so up to
//! roughly `len / threshold` tasks can be pending at once. Tasks are work items drained by
//! rayon's fixed pool of worker threads, never threads of their own.
//!
//! # Features
//!
//!   * `alloc` for the sequential `merge_sort*` family and its scratch buffer. Enabled by
//!     `std`.
//!   * `std` for the `verify` harness. Enabled by `default` or `rayon`.
//!   * `rayon` for the parallel `par_merge_sort*`/`par_quick_sort*` families.
//!
//! The [`quick_sort`](ForkSort1Ext::quick_sort)`*` family is in-place and works without
//! `alloc`.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod insertion_sort;
mod merge_sort;
mod partition;
mod quick_sort;
mod verify;

#[cfg(feature = "rayon")]
mod par;
#[cfg(feature = "rayon")]
use par::{merge_sort::par_merge_sort, quick_sort::par_quick_sort};

#[cfg(feature = "alloc")]
use crate::merge_sort::merge_sort;
use crate::{partition::is_sorted, quick_sort::quick_sort};
use core::cmp::Ordering::{self, Less};
use ndarray::{ArrayBase, Data, DataMut, Ix1};

#[cfg(feature = "std")]
pub use crate::verify::{Divergence, verify};
pub use ndarray;

/// Extension trait for 1-dimensional [`ArrayBase<S, Ix1>`](`ArrayBase`) arrays or (sub)views
/// with arbitrary memory layout (e.g., non-contiguous), providing threshold-driven
/// divide-and-conquer sorts in sequential and parallel (fork/join) forms.
pub trait ForkSort1Ext<A, S>
where
	S: Data<Elem = A>,
{
	/// Sorts the array using merge sort.
	///
	/// This sort is stable (i.e., does not reorder equal elements), deterministic and
	/// *O*(*n* \* log(*n*)) worst-case. It allocates temporary storage half the size of
	/// `self`.
	///
	/// # Current Implementation
	///
	/// The array is split at its midpoint, both halves are sorted recursively and then merged
	/// back into the same span, preferring the left half on ties. Partitions of at most
	/// `threshold` elements are sorted directly by insertion sort.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[5, 3, 4, 1, 2]);
	///
	/// v.merge_sort(2);
	/// assert!(v == arr1(&[1, 2, 3, 4, 5]));
	/// ```
	#[cfg(feature = "alloc")]
	fn merge_sort(&mut self, threshold: usize)
	where
		A: Ord,
		S: DataMut;
	/// Sorts the array with a comparator function using merge sort.
	///
	/// Like [`merge_sort`](ForkSort1Ext::merge_sort), but ordered by `compare`, which must
	/// define a total ordering for the elements in the array: for all `a`, `b` and `c`,
	/// exactly one of `a < b`, `a == b` or `a > b` holds, and all three relations are
	/// transitive. If the ordering is not total, the order of the elements is unspecified.
	///
	/// For example, while [`f64`] doesn't implement [`Ord`] because `NaN != NaN`, we can use
	/// `partial_cmp` as our sort function when we know the array doesn't contain a `NaN`.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut floats = arr1(&[5f64, 4.0, 1.0, 3.0, 2.0]);
	/// floats.merge_sort_by(|a, b| a.partial_cmp(b).unwrap(), 4);
	/// assert_eq!(floats, arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]));
	///
	/// // reverse sorting
	/// let mut v = arr1(&[5, 4, 1, 3, 2]);
	/// v.merge_sort_by(|a, b| b.cmp(a), 2);
	/// assert!(v == arr1(&[5, 4, 3, 2, 1]));
	/// ```
	#[cfg(feature = "alloc")]
	fn merge_sort_by<F>(&mut self, compare: F, threshold: usize)
	where
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut;
	/// Sorts the array with a key extraction function using merge sort.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// v.merge_sort_by_key(|k| k.abs(), 2);
	/// assert!(v == arr1(&[1, 2, -3, 4, -5]));
	/// ```
	#[cfg(feature = "alloc")]
	fn merge_sort_by_key<K, F>(&mut self, f: F, threshold: usize)
	where
		K: Ord,
		F: FnMut(&A) -> K,
		S: DataMut;

	/// Sorts the array in parallel using merge sort.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* \* log(*n*))
	/// worst-case. It allocates a temporary buffer the size of `self`.
	///
	/// # Current Implementation
	///
	/// The array is split at its midpoint and the two recursive sort calls are issued as
	/// concurrent tasks on disjoint subviews; the merge of a split is a join barrier that
	/// runs strictly after both of its sub-sorts complete. Partitions of at most `threshold`
	/// elements are sorted directly by insertion sort without spawning a task, so the
	/// threshold bounds the number of outstanding tasks while rayon's worker pool bounds the
	/// actual parallelism.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5, 4, 1, -3, 2]);
	///
	/// v.par_merge_sort(2);
	/// assert!(v == arr1(&[-5, -3, 1, 2, 4]));
	/// ```
	#[cfg(feature = "rayon")]
	fn par_merge_sort(&mut self, threshold: usize)
	where
		A: Ord + Send,
		S: DataMut;
	/// Sorts the array in parallel with a comparator function using merge sort.
	///
	/// Like [`par_merge_sort`](ForkSort1Ext::par_merge_sort), but ordered by `compare`,
	/// which must define a total ordering for the elements in the array.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[5, 4, 1, 3, 2]);
	/// v.par_merge_sort_by(|a, b| b.cmp(a), 2);
	/// assert!(v == arr1(&[5, 4, 3, 2, 1]));
	/// ```
	#[cfg(feature = "rayon")]
	fn par_merge_sort_by<F>(&mut self, compare: F, threshold: usize)
	where
		A: Send,
		F: Fn(&A, &A) -> Ordering + Sync,
		S: DataMut;
	/// Sorts the array in parallel with a key extraction function using merge sort.
	#[cfg(feature = "rayon")]
	fn par_merge_sort_by_key<K, F>(&mut self, f: F, threshold: usize)
	where
		A: Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
		S: DataMut;

	/// Sorts the array using quicksort.
	///
	/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does not
	/// allocate) and *O*(*n* \* log(*n*)) on average.
	///
	/// # Current Implementation
	///
	/// The array is partitioned in place around the value of its middle element by scanning
	/// from both ends and swapping out-of-place pairs until the cursors cross; the recursion
	/// then descends into both sides, shorter side first. The split point always strictly
	/// separates the range, so runs of equal elements cannot stall the recursion. Partitions
	/// of at most `threshold` elements are sorted directly by insertion sort.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[2, 2, 2, 1, 3]);
	///
	/// v.quick_sort(0);
	/// assert!(v == arr1(&[1, 2, 2, 2, 3]));
	/// ```
	fn quick_sort(&mut self, threshold: usize)
	where
		A: Ord,
		S: DataMut;
	/// Sorts the array with a comparator function using quicksort.
	///
	/// Like [`quick_sort`](ForkSort1Ext::quick_sort), but ordered by `compare`, which must
	/// define a total ordering for the elements in the array.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut floats = arr1(&[5f64, 4.0, 1.0, 3.0, 2.0]);
	/// floats.quick_sort_by(|a, b| a.partial_cmp(b).unwrap(), 2);
	/// assert_eq!(floats, arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]));
	/// ```
	fn quick_sort_by<F>(&mut self, compare: F, threshold: usize)
	where
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut;
	/// Sorts the array with a key extraction function using quicksort.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// v.quick_sort_by_key(|k| k.abs(), 2);
	/// assert!(v == arr1(&[1, 2, -3, 4, -5]));
	/// ```
	fn quick_sort_by_key<K, F>(&mut self, f: F, threshold: usize)
	where
		K: Ord,
		F: FnMut(&A) -> K,
		S: DataMut;

	/// Sorts the array in parallel using quicksort.
	///
	/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does not
	/// allocate) and *O*(*n* \* log(*n*)) on average.
	///
	/// # Current Implementation
	///
	/// Partitioning always executes sequentially, as it mutates the full range; the two
	/// recursive calls on the resulting sub-ranges are then issued as concurrent tasks on
	/// disjoint subviews and joined before the call returns. Partitions of at most
	/// `threshold` elements are sorted directly by insertion sort without spawning a task.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5, 4, 1, -3, 2]);
	///
	/// v.par_quick_sort(2);
	/// assert!(v == arr1(&[-5, -3, 1, 2, 4]));
	/// ```
	#[cfg(feature = "rayon")]
	fn par_quick_sort(&mut self, threshold: usize)
	where
		A: Ord + Send,
		S: DataMut;
	/// Sorts the array in parallel with a comparator function using quicksort.
	///
	/// Like [`par_quick_sort`](ForkSort1Ext::par_quick_sort), but ordered by `compare`,
	/// which must define a total ordering for the elements in the array.
	#[cfg(feature = "rayon")]
	fn par_quick_sort_by<F>(&mut self, compare: F, threshold: usize)
	where
		A: Send,
		F: Fn(&A, &A) -> Ordering + Sync,
		S: DataMut;
	/// Sorts the array in parallel with a key extraction function using quicksort.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// v.par_quick_sort_by_key(|k| k.abs(), 2);
	/// assert!(v == arr1(&[1, 2, -3, 4, -5]));
	/// ```
	#[cfg(feature = "rayon")]
	fn par_quick_sort_by_key<K, F>(&mut self, f: F, threshold: usize)
	where
		A: Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
		S: DataMut;

	/// Checks if the elements of this array are sorted.
	///
	/// That is, for each element `a` and its following element `b`, `a <= b` must hold. If
	/// the array yields exactly zero or one element, `true` is returned.
	///
	/// Note that if `A` is only `PartialOrd`, but not `Ord`, the above definition implies
	/// that this function returns `false` if any two consecutive items are not comparable.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_forksort::{ForkSort1Ext, ndarray::arr1};
	///
	/// let empty: [i32; 0] = [];
	///
	/// assert!(arr1(&[1, 2, 2, 9]).is_sorted());
	/// assert!(!arr1(&[1, 3, 2, 4]).is_sorted());
	/// assert!(arr1(&[0]).is_sorted());
	/// assert!(arr1(&empty).is_sorted());
	/// assert!(!arr1(&[0.0, 1.0, f32::NAN]).is_sorted());
	/// ```
	#[must_use]
	fn is_sorted(&self) -> bool
	where
		A: PartialOrd;
	/// Checks if the elements of this array are sorted using the given comparator function.
	///
	/// Instead of using `PartialOrd::partial_cmp`, this function uses the given `compare`
	/// function to determine the ordering of two elements. Apart from that, it's equivalent
	/// to [`is_sorted`](ForkSort1Ext::is_sorted); see its documentation for more information.
	#[must_use]
	fn is_sorted_by<F>(&self, compare: F) -> bool
	where
		F: FnMut(&A, &A) -> Option<Ordering>;
}

impl<A, S> ForkSort1Ext<A, S> for ArrayBase<S, Ix1>
where
	S: Data<Elem = A>,
{
	#[cfg(feature = "alloc")]
	#[inline]
	fn merge_sort(&mut self, threshold: usize)
	where
		A: Ord,
		S: DataMut,
	{
		merge_sort(self.view_mut(), threshold, &mut A::lt);
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn merge_sort_by<F>(&mut self, mut compare: F, threshold: usize)
	where
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut,
	{
		merge_sort(self.view_mut(), threshold, &mut |a: &A, b: &A| {
			compare(a, b) == Less
		});
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn merge_sort_by_key<K, F>(&mut self, mut f: F, threshold: usize)
	where
		K: Ord,
		F: FnMut(&A) -> K,
		S: DataMut,
	{
		merge_sort(self.view_mut(), threshold, &mut |a: &A, b: &A| {
			f(a).lt(&f(b))
		});
	}

	#[cfg(feature = "rayon")]
	#[inline]
	fn par_merge_sort(&mut self, threshold: usize)
	where
		A: Ord + Send,
		S: DataMut,
	{
		par_merge_sort(self.view_mut(), threshold, A::lt);
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_merge_sort_by<F>(&mut self, compare: F, threshold: usize)
	where
		A: Send,
		F: Fn(&A, &A) -> Ordering + Sync,
		S: DataMut,
	{
		par_merge_sort(self.view_mut(), threshold, |a: &A, b: &A| {
			compare(a, b) == Less
		});
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_merge_sort_by_key<K, F>(&mut self, f: F, threshold: usize)
	where
		A: Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
		S: DataMut,
	{
		par_merge_sort(self.view_mut(), threshold, |a: &A, b: &A| f(a).lt(&f(b)));
	}

	#[inline]
	fn quick_sort(&mut self, threshold: usize)
	where
		A: Ord,
		S: DataMut,
	{
		quick_sort(self.view_mut(), threshold, &mut A::lt);
	}
	#[inline]
	fn quick_sort_by<F>(&mut self, mut compare: F, threshold: usize)
	where
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut,
	{
		quick_sort(self.view_mut(), threshold, &mut |a: &A, b: &A| {
			compare(a, b) == Less
		});
	}
	#[inline]
	fn quick_sort_by_key<K, F>(&mut self, mut f: F, threshold: usize)
	where
		K: Ord,
		F: FnMut(&A) -> K,
		S: DataMut,
	{
		quick_sort(self.view_mut(), threshold, &mut |a: &A, b: &A| {
			f(a).lt(&f(b))
		});
	}

	#[cfg(feature = "rayon")]
	#[inline]
	fn par_quick_sort(&mut self, threshold: usize)
	where
		A: Ord + Send,
		S: DataMut,
	{
		par_quick_sort(self.view_mut(), threshold, A::lt);
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_quick_sort_by<F>(&mut self, compare: F, threshold: usize)
	where
		A: Send,
		F: Fn(&A, &A) -> Ordering + Sync,
		S: DataMut,
	{
		par_quick_sort(self.view_mut(), threshold, |a: &A, b: &A| {
			compare(a, b) == Less
		});
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn par_quick_sort_by_key<K, F>(&mut self, f: F, threshold: usize)
	where
		A: Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
		S: DataMut,
	{
		par_quick_sort(self.view_mut(), threshold, |a: &A, b: &A| f(a).lt(&f(b)));
	}

	#[inline]
	fn is_sorted(&self) -> bool
	where
		A: PartialOrd,
	{
		is_sorted(self.view(), |a, b| a.partial_cmp(b))
	}
	#[inline]
	fn is_sorted_by<F>(&self, compare: F) -> bool
	where
		F: FnMut(&A, &A) -> Option<Ordering>,
	{
		is_sorted(self.view(), compare)
	}
}
