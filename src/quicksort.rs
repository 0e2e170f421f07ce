//! Randomized in-place quicksort.
//!
//! The pivot of every partition is drawn uniformly from the range, so the
//! expected running time is O(n log n) for every input, including sorted,
//! reverse-sorted and adversarial ones. Recursion always descends into the
//! smaller partition and loops on the larger, keeping stack depth at
//! O(log n) even when pivot draws are unlucky.

use crate::error::Result;
use crate::random::engine::BitEngine;
use crate::sampler::{check_width, sample_index};

/// Sorts `items` in ascending order.
///
/// Elements that compare as unordered (such as NaN) are tolerated but end up
/// in unspecified positions.
///
/// # Errors
/// Returns [`StreamRngError::RangeTooWide`](crate::error::StreamRngError::RangeTooWide)
/// if the slice is longer than the engine word can index. The slice is left
/// untouched in that case.
pub fn quicksort<T, E>(items: &mut [T], engine: &mut E) -> Result<()>
where
    T: PartialOrd,
    E: BitEngine + ?Sized,
{
    if items.len() < 2 {
        return Ok(());
    }
    check_width::<E>(items.len())?;
    sort_range(items, engine)
}

fn sort_range<T, E>(mut items: &mut [T], engine: &mut E) -> Result<()>
where
    T: PartialOrd,
    E: BitEngine + ?Sized,
{
    while items.len() > 1 {
        let mid = partition(items, engine)?;
        let (left, rest) = std::mem::take(&mut items).split_at_mut(mid);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            sort_range(left, engine)?;
            items = right;
        } else {
            sort_range(right, engine)?;
            items = left;
        }
    }
    Ok(())
}

/// Partitions `items` (at least two elements) around a random pivot.
///
/// Returns the pivot's final index: everything before it compares `<=` the
/// pivot and everything after it `>=`.
fn partition<T, E>(items: &mut [T], engine: &mut E) -> Result<usize>
where
    T: PartialOrd,
    E: BitEngine + ?Sized,
{
    let last = items.len() - 1;
    let chosen = sample_index(engine, items.len())?;
    items.swap(chosen, last);

    let mut i = 0;
    let mut j = last - 1;
    loop {
        // Stops at the pivot at the latest.
        while items[i] < items[last] {
            i += 1;
        }
        while j > i && items[j] > items[last] {
            j -= 1;
        }
        if i >= j {
            break;
        }
        items.swap(i, j);
        i += 1;
        j -= 1;
    }
    items.swap(i, last);
    Ok(i)
}
