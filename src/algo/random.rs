//! Randomized routines: shuffle and bogosort.

use super::{is_sorted, SortStats};
use crate::array::InstrumentedArray;
use crate::error::Result;
use rand::Rng;

/// Fisher–Yates shuffle through instrumented swaps.
pub fn shuffle<R: Rng>(array: &mut InstrumentedArray, rng: &mut R) -> Result<SortStats> {
    let mut stats = SortStats {
        passes: 1,
        ..SortStats::default()
    };

    for i in (1..array.len()).rev() {
        let j = rng.random_range(0..=i);
        array.swap(i, j)?;
        stats.swaps += 1;
    }

    Ok(stats)
}

/// Shuffle until sorted. Expected work grows factorially with the length.
pub fn bogo_sort<R: Rng>(array: &mut InstrumentedArray, rng: &mut R) -> Result<SortStats> {
    let mut stats = SortStats::default();

    loop {
        stats.comparisons += array.len().saturating_sub(1);
        if is_sorted(&array.as_sequence()) {
            break;
        }
        let round = shuffle(array, rng)?;
        stats.passes += 1;
        stats.swaps += round.swaps;
    }

    Ok(stats)
}
