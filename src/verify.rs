//! Comparison of a candidate ordering against a trusted reference ordering.

#![cfg(feature = "std")]

use core::{
	cmp,
	fmt::{self, Debug, Display, Formatter},
};
use ndarray::{ArrayBase, Data, Ix1};

/// Report of a candidate ordering diverging from the reference ordering.
///
/// Returned by [`verify`]. A divergence is a logic error of the strategy under test, not a
/// transient runtime fault, so it is reported as a descriptive value carrying snapshots of
/// both sequences rather than by aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence<A> {
	/// First position at which the sequences differ.
	pub index: usize,
	/// The ordering produced by the strategy under test.
	pub candidate: Vec<A>,
	/// The trusted ordering.
	pub reference: Vec<A>,
}

impl<A: Debug> Display for Divergence<A> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"candidate diverges from reference at index {}: candidate {:?}, reference {:?}",
			self.index, self.candidate, self.reference
		)
	}
}

impl<A: Debug> std::error::Error for Divergence<A> {}

/// Compares `candidate` against `reference` element by element.
///
/// Returns the first [`Divergence`], where sequences of unequal length diverge at the first
/// position past the shorter one. Intended for correctness testing of sort strategies: sort
/// one copy of the input with the strategy under test and another with a trusted sort, then
/// compare.
///
/// # Examples
///
/// ```
/// use ndarray_forksort::{ndarray::arr1, verify};
///
/// assert!(verify(&arr1(&[1, 2, 3]), &arr1(&[1, 2, 3])).is_ok());
///
/// let divergence = verify(&arr1(&[1, 3, 2]), &arr1(&[1, 2, 3])).unwrap_err();
/// assert_eq!(divergence.index, 1);
/// assert_eq!(divergence.candidate, [1, 3, 2]);
/// assert_eq!(divergence.reference, [1, 2, 3]);
/// ```
pub fn verify<A, S1, S2>(
	candidate: &ArrayBase<S1, Ix1>,
	reference: &ArrayBase<S2, Ix1>,
) -> Result<(), Divergence<A>>
where
	A: Clone + PartialEq,
	S1: Data<Elem = A>,
	S2: Data<Elem = A>,
{
	let index = candidate
		.iter()
		.zip(reference.iter())
		.position(|(c, r)| c != r);
	let index = match index {
		Some(index) => index,
		None if candidate.len() == reference.len() => return Ok(()),
		None => cmp::min(candidate.len(), reference.len()),
	};
	Err(Divergence {
		index,
		candidate: candidate.iter().cloned().collect(),
		reference: reference.iter().cloned().collect(),
	})
}

#[cfg(test)]
mod test {
	use super::verify;
	use ndarray::arr1;

	#[test]
	fn matching_sequences() {
		assert!(verify(&arr1(&[1, 2, 2, 3]), &arr1(&[1, 2, 2, 3])).is_ok());
		assert!(verify(&arr1::<i32>(&[]), &arr1(&[])).is_ok());
	}

	#[test]
	fn first_differing_position() {
		let divergence = verify(&arr1(&[1, 2, 4, 3]), &arr1(&[1, 2, 3, 4])).unwrap_err();
		assert_eq!(divergence.index, 2);
		assert_eq!(divergence.candidate, vec![1, 2, 4, 3]);
		assert_eq!(divergence.reference, vec![1, 2, 3, 4]);
	}

	#[test]
	fn length_mismatch() {
		let divergence = verify(&arr1(&[1, 2]), &arr1(&[1, 2, 3])).unwrap_err();
		assert_eq!(divergence.index, 2);
	}

	#[test]
	fn report_names_both_sequences() {
		let divergence = verify(&arr1(&[2, 1]), &arr1(&[1, 2])).unwrap_err();
		let report = divergence.to_string();
		assert!(report.contains("index 0"));
		assert!(report.contains("[2, 1]"));
		assert!(report.contains("[1, 2]"));
	}
}
