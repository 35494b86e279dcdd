//! Algorithm Library: sorts and transforms driven through the instrumented array.
//!
//! Every routine reads and writes through [`InstrumentedArray`] only, so
//! each element touch is animated. Bulk scans (min/max, sums, sortedness)
//! use [`InstrumentedArray::as_sequence`] and are not animated.

mod counting;
mod exchange;
mod heap;
mod merge;
mod quick;
mod random;
mod transform;

pub use counting::counting_sort;
pub use exchange::{bubble_sort, insertion_sort};
pub use heap::heap_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use random::{bogo_sort, shuffle};
pub use transform::{flatten, library_sort};

use crate::array::{InstrumentedArray, Value};
use crate::error::Result;
use rand::Rng;
use std::fmt;

/// What a routine did, for the status line and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Outer passes (or partitions/merges for divide-and-conquer sorts).
    pub passes: usize,
    /// Element comparisons.
    pub comparisons: usize,
    /// Element swaps.
    pub swaps: usize,
    /// Elements moved one slot by insertion sort.
    pub shifts: usize,
    /// Plain element writes.
    pub writes: usize,
}

impl fmt::Display for SortStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passes, {} comparisons, {} swaps, {} shifts, {} writes",
            self.passes, self.comparisons, self.swaps, self.shifts, self.writes
        )
    }
}

/// Every sort the library offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Bubble sort with early exit.
    Bubble,
    /// Insertion sort.
    Insertion,
    /// Top-down merge sort.
    Merge,
    /// Quicksort, Lomuto partition.
    Quick,
    /// Heap sort.
    Heap,
    /// Counting sort.
    Counting,
    /// Shuffle until sorted.
    Bogo,
    /// The standard library's unstable sort, animated by sweeps.
    Library,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Bubble,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
        Self::Counting,
        Self::Bogo,
        Self::Library,
    ];

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bubble => "bubble sort",
            Self::Insertion => "insertion sort",
            Self::Merge => "merge sort",
            Self::Quick => "quicksort",
            Self::Heap => "heap sort",
            Self::Counting => "counting sort",
            Self::Bogo => "bogosort",
            Self::Library => "library sort",
        }
    }

    /// Sort `array` in place.
    pub fn run<R: Rng>(self, array: &mut InstrumentedArray, rng: &mut R) -> Result<SortStats> {
        match self {
            Self::Bubble => bubble_sort(array),
            Self::Insertion => insertion_sort(array),
            Self::Merge => merge_sort(array),
            Self::Quick => quick_sort(array),
            Self::Heap => heap_sort(array),
            Self::Counting => counting_sort(array),
            Self::Bogo => bogo_sort(array, rng),
            Self::Library => library_sort(array),
        }
    }
}

/// Whether `values` is non-decreasing.
pub fn is_sorted(values: &[Value]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::array::{InstrumentedArray, Pacing, Value};
    use crate::render::BarRenderer;
    use crate::surface::{share, MemorySurface};
    use std::sync::Arc;

    /// Array with no delays drawing onto a throwaway surface.
    pub(crate) fn instant_array(values: Vec<Value>) -> InstrumentedArray {
        InstrumentedArray::new(
            values,
            share(MemorySurface::new(64, 32)),
            Arc::new(BarRenderer::new()),
            Arc::new(Pacing::instant()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::instant_array;
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const DETERMINISTIC: [Algorithm; 7] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
        Algorithm::Counting,
        Algorithm::Library,
    ];

    fn permutation() -> impl Strategy<Value = Vec<Value>> {
        (0usize..14).prop_flat_map(|n| Just((1..=n as Value).collect::<Vec<_>>()).prop_shuffle())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn sorts_any_permutation(original in permutation()) {
            let mut rng = SmallRng::seed_from_u64(7);
            for algorithm in DETERMINISTIC {
                let mut array = instant_array(original.clone());
                algorithm.run(&mut array, &mut rng).unwrap();
                array.join().unwrap();

                let mut expected = original.clone();
                expected.sort_unstable();
                prop_assert_eq!(
                    array.snapshot(),
                    expected,
                    "{} must sort without losing values",
                    algorithm.label()
                );
                prop_assert!(array.stats().peak_workers <= 1);
            }
        }

        #[test]
        fn sorts_with_duplicates(original in prop::collection::vec(0..6 as Value, 0..12)) {
            let mut rng = SmallRng::seed_from_u64(11);
            for algorithm in DETERMINISTIC {
                let mut array = instant_array(original.clone());
                algorithm.run(&mut array, &mut rng).unwrap();

                let mut expected = original.clone();
                expected.sort_unstable();
                prop_assert_eq!(array.snapshot(), expected, "{}", algorithm.label());
            }
        }
    }

    #[test]
    fn test_bogo_sorts_small_input() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut array = instant_array(vec![3, 1, 4, 2]);
        Algorithm::Bogo.run(&mut array, &mut rng).unwrap();
        assert_eq!(array.snapshot(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = Algorithm::ALL.iter().map(|a| a.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Algorithm::ALL.len());
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[1, 1, 2]));
        assert!(!is_sorted(&[2, 1]));
    }
}
