//! Degenerate transforms and the animated library sort.

use super::SortStats;
use crate::array::{InstrumentedArray, Value};
use crate::error::Result;

/// Set every element to the mean of the sequence (rounded down).
pub fn flatten(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();

    let mean = {
        let sequence = array.as_sequence();
        let Ok(len) = i64::try_from(sequence.len()) else {
            return Ok(stats);
        };
        if len == 0 {
            return Ok(stats);
        }
        let sum: i64 = sequence.iter().map(|&v| i64::from(v)).sum();
        // The mean of i32 values always fits an i32.
        Value::try_from(sum.div_euclid(len)).unwrap_or_default()
    };

    stats.passes += 1;
    for index in 0..array.len() {
        array.set(index, mean)?;
        stats.writes += 1;
    }

    Ok(stats)
}

/// Sort with `slice::sort_unstable` on the raw sequence, animated by the
/// continuous animator since individual touches cannot be observed.
pub fn library_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    array.start_render()?;
    array.as_sequence_mut().sort_unstable();
    array.stop_render()?;

    Ok(SortStats {
        passes: 1,
        ..SortStats::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_support::instant_array;

    #[test]
    fn test_flatten_to_floor_mean() {
        let mut array = instant_array(vec![1, 2, 4]);
        let stats = flatten(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![2, 2, 2]);
        assert_eq!(stats.writes, 3);
    }

    #[test]
    fn test_flatten_negative_mean_rounds_down() {
        let mut array = instant_array(vec![-1, -2]);
        flatten(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![-2, -2]);
    }

    #[test]
    fn test_flatten_empty() {
        let mut array = instant_array(Vec::new());
        assert_eq!(flatten(&mut array).unwrap(), SortStats::default());
    }

    #[test]
    fn test_library_sort_sweeps_and_stops() {
        let mut array = instant_array(vec![4, 2, 3, 1]);
        library_sort(&mut array).unwrap();
        assert_eq!(array.snapshot(), vec![1, 2, 3, 4]);
        assert!(!array.is_animating());
        assert!(array.stats().sweeps >= 1);
        assert_eq!(array.stats().jobs, 0);
    }
}
