//! Counting sort for bounded-magnitude values.

use super::SortStats;
use crate::array::{InstrumentedArray, Value};
use crate::error::Result;

/// Widest value range tallied with a count table. Wider ranges are
/// ordered by comparison instead; the rewrite is animated the same way.
const MAX_SPAN: usize = 1 << 16;

/// Counting sort. Tallies are taken from the raw sequence; only the
/// rewrite is animated.
pub fn counting_sort(array: &mut InstrumentedArray) -> Result<SortStats> {
    let mut stats = SortStats::default();

    let sorted = {
        let sequence = array.as_sequence();
        let (Some(&min), Some(&max)) = (sequence.iter().min(), sequence.iter().max()) else {
            return Ok(stats);
        };
        match usize::try_from(max.abs_diff(min)) {
            Ok(span) if span < MAX_SPAN.max(sequence.len()) => tally(&sequence, min, span),
            _ => {
                let mut values = sequence.to_vec();
                values.sort_unstable();
                values
            }
        }
    };
    stats.passes += 1;

    for (index, value) in sorted.into_iter().enumerate() {
        array.set(index, value)?;
        stats.writes += 1;
    }

    Ok(stats)
}

/// Expand per-value counts over `min..=min + span` into sorted order.
fn tally(values: &[Value], min: Value, span: usize) -> Vec<Value> {
    let mut counts = vec![0usize; span + 1];
    for &value in values {
        if let Ok(offset) = usize::try_from(value.abs_diff(min)) {
            counts[offset] += 1;
        }
    }

    let mut sorted = Vec::with_capacity(values.len());
    let mut value = min;
    for count in counts {
        sorted.extend(std::iter::repeat_n(value, count));
        value = value.saturating_add(1);
    }
    sorted
}
