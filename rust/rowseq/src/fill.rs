//! Materialization of a validated sequence into its output slice.

use crate::domain::{ElementDomain, Native};

/// Writes `start, start + step, start + 2 * step, ...` into `dest`, one element
/// per slot.
///
/// The row must have passed [`crate::sizing::sequence_count`] with the same
/// `step`, and `dest.len()` must equal the returned count. Under that contract
/// every element lies between start and stop, so the wrapping product
/// `step * i` still yields the exact element.
#[inline]
pub fn fill_sequence<D: ElementDomain>(dest: &mut [Native<D>], start: Native<D>, step: i64) {
    let mut step_count = 0i64;
    for slot in dest.iter_mut() {
        *slot = D::from_ordinal(start, step_count);
        step_count = step_count.wrapping_add(step);
    }
}
