//! Initial data generation.

use crate::array::Value;
use crate::error::{Error, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Shape of a freshly generated sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Fill {
    /// Uniform values in `1..=max`.
    #[default]
    Random,
    /// Evenly rising staircase ending at `max`.
    Ascending,
    /// The ascending staircase reversed.
    Descending,
}

impl Fill {
    /// Name accepted on the command line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Fill {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "r" => Ok(Self::Random),
            "ascending" | "asc" | "a" => Ok(Self::Ascending),
            "descending" | "desc" | "d" => Ok(Self::Descending),
            other => Err(Error::InvalidArgument(format!(
                "unknown fill {other:?} (expected random, ascending or descending)"
            ))),
        }
    }
}

/// Generate `len` values no larger than `max` (and at least 1 when `max >= 1`).
pub fn generate<R: Rng>(fill: Fill, len: usize, max: Value, rng: &mut R) -> Vec<Value> {
    let max = max.max(1);
    match fill {
        Fill::Random => (0..len).map(|_| rng.random_range(1..=max)).collect(),
        Fill::Ascending => staircase(len, max),
        Fill::Descending => {
            let mut values = staircase(len, max);
            values.reverse();
            values
        }
    }
}

fn staircase(len: usize, max: Value) -> Vec<Value> {
    let top = i64::from(max);
    let Ok(steps) = i64::try_from(len) else {
        return Vec::new();
    };
    (1..=steps)
        .map(|step| Value::try_from(step * top / steps).unwrap_or(max).max(1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(9);
        let values = generate(Fill::Random, 200, 15, &mut rng);
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (1..=15).contains(v)));
    }

    #[test]
    fn test_ascending_reaches_max() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate(Fill::Ascending, 4, 8, &mut rng), vec![2, 4, 6, 8]);
        let tall = generate(Fill::Ascending, 10, 3, &mut rng);
        assert_eq!(tall.first(), Some(&1));
        assert_eq!(tall.last(), Some(&3));
    }

    #[test]
    fn test_descending_is_reversed() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate(Fill::Descending, 4, 8, &mut rng), vec![8, 6, 4, 2]);
    }

    #[test]
    fn test_empty_and_degenerate_max() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(generate(Fill::Random, 0, 10, &mut rng).is_empty());
        assert_eq!(generate(Fill::Random, 3, 0, &mut rng), vec![1, 1, 1]);
    }

    #[test]
    fn test_parse_fill() {
        assert_eq!("Ascending".parse::<Fill>().unwrap(), Fill::Ascending);
        assert_eq!("d".parse::<Fill>().unwrap(), Fill::Descending);
        assert!(matches!(
            "sideways".parse::<Fill>(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
