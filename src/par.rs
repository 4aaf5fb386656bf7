//! Parallel variants issuing both recursive calls of every split above the threshold as
//! concurrent fork/join tasks on the [`rayon`] worker pool.

pub mod merge_sort;
pub mod quick_sort;
