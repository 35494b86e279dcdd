//! Top-down merge sort.

use super::SortStats;
use crate::array::InstrumentedArray;
use crate::error::Result;
use crate::surface::Tone;

/// Merge sort. Halves are copied out of the raw sequence, then written
/// back one instrumented access at a time.
pub fn merge_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();
    let len = array.len();
    if len > 1 {
        sort_range(array, 0, len - 1, &mut stats)?;
    }
    Ok(stats)
}

/// Sort the inclusive range `low..=high`.
fn sort_range(
    array: &mut InstrumentedArray,
    low: usize,
    high: usize,
    stats: &mut SortStats,
) -> Result<()> {
    if low < high {
        let mid = low + (high - low) / 2;
        sort_range(array, low, mid, stats)?;
        sort_range(array, mid + 1, high, stats)?;
        merge(array, low, mid, high, stats)?;
    }
    Ok(())
}

fn merge(
    array: &mut InstrumentedArray,
    low: usize,
    mid: usize,
    high: usize,
    stats: &mut SortStats,
) -> Result<()> {
    stats.passes += 1;
    array.hot_point(mid, Tone::ManualPointer)?;

    let (left, right) = {
        let sequence = array.as_sequence();
        (sequence[low..=mid].to_vec(), sequence[mid + 1..=high].to_vec())
    };

    let (mut l, mut r) = (0, 0);
    for index in low..=high {
        let take_left = match (left.get(l), right.get(r)) {
            (Some(a), Some(b)) => {
                stats.comparisons += 1;
                a <= b
            }
            (Some(_), None) => true,
            _ => false,
        };

        let value = if take_left {
            l += 1;
            left[l - 1]
        } else {
            r += 1;
            right[r - 1]
        };
        array.set(index, value)?;
        stats.writes += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_support::instant_array;

    #[test]
    fn test_merge_sort_writes_every_slot_per_level() {
        let mut array = instant_array(vec![4, 3, 2, 1]);
        let stats = merge_sort(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![1, 2, 3, 4]);
        assert_eq!(stats.passes, 3);
        assert_eq!(stats.writes, 8);
    }

    #[test]
    fn test_merge_is_stable_for_equal_keys() {
        let mut array = instant_array(vec![2, 1, 2, 1]);
        merge_sort(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_midpoints_use_hot_points_not_jobs() {
        let mut array = instant_array(vec![2, 1]);
        merge_sort(&mut array).unwrap();
        // One merge writing two slots: two jobs, no job for the midpoint.
        assert_eq!(array.stats().jobs, 2);
    }
}
