//! Quicksort with a Lomuto partition around the last element.

use super::SortStats;
use crate::array::InstrumentedArray;
use crate::error::Result;
use crate::surface::Tone;

/// Quicksort. The pivot is marked with an alert hot point; comparisons
/// against it read the raw sequence, moves go through instrumented swaps.
pub fn quick_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();
    let len = array.len();
    sort_range(array, 0, len, &mut stats)?;
    Ok(stats)
}

/// Sort the half-open range `low..high`.
fn sort_range(
    array: &mut InstrumentedArray,
    low: usize,
    high: usize,
    stats: &mut SortStats,
) -> Result<()> {
    if high.saturating_sub(low) < 2 {
        return Ok(());
    }
    let pivot = partition(array, low, high - 1, stats)?;
    sort_range(array, low, pivot, stats)?;
    sort_range(array, pivot + 1, high, stats)
}

/// Partition `low..=high` around `array[high]`; returns the pivot's final slot.
fn partition(
    array: &mut InstrumentedArray,
    low: usize,
    high: usize,
    stats: &mut SortStats,
) -> Result<usize> {
    stats.passes += 1;
    let pivot = array.get(high)?;
    array.hot_point(high, Tone::Alert)?;

    let mut store = low;
    for j in low..high {
        stats.comparisons += 1;
        let below = array.as_sequence()[j] < pivot;
        if below {
            array.swap(store, j)?;
            stats.swaps += 1;
            store += 1;
        }
    }

    array.swap(store, high)?;
    stats.swaps += 1;
    Ok(store)
}
