//! In-place Fisher-Yates shuffle.

use crate::error::Result;
use crate::random::engine::BitEngine;
use crate::sampler::{check_width, sample_index};

/// Shuffles `items` in place into a uniformly random permutation.
///
/// Walks a cursor from the end of the slice down to the second element,
/// swapping the last unshuffled element with one drawn uniformly from the
/// unshuffled prefix.
///
/// # Parameters
/// - `items`: The slice to permute.
/// - `engine`: The engine driving index selection.
///
/// # Errors
/// Returns [`StreamRngError::RangeTooWide`](crate::error::StreamRngError::RangeTooWide)
/// if the slice is longer than the engine word can index. The slice is left
/// untouched in that case.
pub fn shuffle<T, E>(items: &mut [T], engine: &mut E) -> Result<()>
where
    E: BitEngine + ?Sized,
{
    if items.len() < 2 {
        return Ok(());
    }
    check_width::<E>(items.len())?;

    let mut count = items.len();
    while count > 1 {
        let chosen = sample_index(engine, count)?;
        count -= 1;
        items.swap(chosen, count);
    }
    Ok(())
}
