//! Shuffle projection
//!
//! Builds the shuffled order as a permutation of playlist indices, so the
//! projection can never drift from the playlist it was built from.

use rand::seq::SliceRandom;
use rand::Rng;

/// Random permutation of `0..len`, pinned to start with `first`
///
/// `first` is ignored when it is out of range, in which case every index is
/// shuffled (Fisher-Yates).
pub fn shuffled_order<R: Rng + ?Sized>(len: usize, first: Option<usize>, rng: &mut R) -> Vec<usize> {
    let first = first.filter(|&index| index < len);

    let mut rest: Vec<usize> = (0..len).filter(|&index| Some(index) != first).collect();
    rest.shuffle(rng);

    match first {
        Some(index) => {
            let mut order = Vec::with_capacity(len);
            order.push(index);
            order.extend(rest);
            order
        }
        None => rest,
    }
}
