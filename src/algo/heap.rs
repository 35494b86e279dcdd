//! Heap sort over an implicit max-heap.

use super::SortStats;
use crate::array::InstrumentedArray;
use crate::error::Result;

/// Heap sort: heapify, then repeatedly move the root behind the heap.
pub fn heap_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();
    let len = array.len();

    for root in (0..len / 2).rev() {
        sift_down(array, root, len, &mut stats)?;
    }

    for end in (1..len).rev() {
        stats.passes += 1;
        array.swap(0, end)?;
        stats.swaps += 1;
        sift_down(array, 0, end, &mut stats)?;
    }

    Ok(stats)
}

/// Restore the heap property below `root` within `..end`.
fn sift_down(
    array: &mut InstrumentedArray,
    mut root: usize,
    end: usize,
    stats: &mut SortStats,
) -> Result<()> {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return Ok(());
        }

        let mut largest = root;
        let mut largest_value = array.get(root)?;

        let left_value = array.get(left)?;
        stats.comparisons += 1;
        if left_value > largest_value {
            largest = left;
            largest_value = left_value;
        }

        let right = left + 1;
        if right < end {
            let right_value = array.get(right)?;
            stats.comparisons += 1;
            if right_value > largest_value {
                largest = right;
            }
        }

        if largest == root {
            return Ok(());
        }
        array.swap(root, largest)?;
        stats.swaps += 1;
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_support::instant_array;

    #[test]
    fn test_heap_sort_basic() {
        let mut array = instant_array(vec![3, 9, 2, 7, 5, 5, 1]);
        let stats = heap_sort(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![1, 2, 3, 5, 5, 7, 9]);
        assert_eq!(stats.passes, 6);
    }

    #[test]
    fn test_sift_down_builds_max_root() {
        let mut array = instant_array(vec![1, 8, 4]);
        let mut stats = SortStats::default();
        sift_down(&mut array, 0, 3, &mut stats).unwrap();
        assert_eq!(array.read_raw(0), 8);
        assert_eq!(stats.swaps, 1);
    }
}
