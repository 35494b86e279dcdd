//! Quadratic exchange sorts: bubble and insertion.

use super::SortStats;
use crate::array::InstrumentedArray;
use crate::error::Result;

/// Bubble sort. Stops after the first pass that swaps nothing.
pub fn bubble_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();
    let len = array.len();

    for pass in 0..len {
        stats.passes += 1;
        let mut swapped = false;

        for j in 0..len - pass - 1 {
            let left = array.get(j)?;
            let right = array.get(j + 1)?;
            stats.comparisons += 1;
            if left > right {
                array.set(j, right)?;
                array.set(j + 1, left)?;
                stats.swaps += 1;
                swapped = true;
            }
        }

        if !swapped {
            break;
        }
    }

    Ok(stats)
}

/// Insertion sort. Larger elements shift right one slot at a time; the
/// key is always written back, even when nothing moved.
pub fn insertion_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();

    for i in 1..array.len() {
        stats.passes += 1;
        let key = array.get(i)?;
        let mut j = i;

        while j > 0 {
            let previous = array.get(j - 1)?;
            stats.comparisons += 1;
            if previous <= key {
                break;
            }
            array.set(j, previous)?;
            stats.shifts += 1;
            j -= 1;
        }

        array.set(j, key)?;
        stats.writes += 1;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_support::instant_array;

    #[test]
    fn test_bubble_exits_after_clean_pass() {
        let mut array = instant_array(vec![5, 3, 1, 4, 2]);
        let stats = bubble_sort(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.passes, 4);
        assert_eq!(stats.swaps, 7);
    }

    #[test]
    fn test_bubble_on_sorted_input_is_one_pass() {
        let mut array = instant_array(vec![1, 2, 3]);
        let stats = bubble_sort(&mut array).unwrap();
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.swaps, 0);
    }

    #[test]
    fn test_insertion_on_sorted_input_shifts_nothing() {
        let mut array = instant_array(vec![1, 2, 3, 4, 5]);
        let stats = insertion_sort(&mut array).unwrap();
        array.join().unwrap();

        assert_eq!(array.snapshot(), vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.shifts, 0);
        // Per key: read it, compare with its left neighbour, write it back.
        let render = array.stats();
        assert_eq!(render.accesses, 12);
        assert_eq!(render.jobs, render.accesses);
    }

    #[test]
    fn test_insertion_counts_shifts() {
        let mut array = instant_array(vec![3, 2, 1]);
        let stats = insertion_sort(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![1, 2, 3]);
        assert_eq!(stats.shifts, 3);
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty = instant_array(Vec::new());
        assert_eq!(bubble_sort(&mut empty).unwrap(), SortStats::default());
        assert_eq!(insertion_sort(&mut empty).unwrap(), SortStats::default());

        let mut single = instant_array(vec![7]);
        bubble_sort(&mut single).unwrap();
        insertion_sort(&mut single).unwrap();
        assert_eq!(single.snapshot(), vec![7]);
    }
}
