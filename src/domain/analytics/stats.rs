//! Descriptive statistics shared by the analytics components.

use serde::{Deserialize, Serialize};

/// Population mean and standard deviation of a set of values.
///
/// Uses denominator N: the numbers describe the observed population,
/// they do not estimate a wider one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl Distribution {
    /// Computes the distribution of `values`, summing in iteration order.
    ///
    /// Returns `None` for an empty input.
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let iter = values.into_iter();

        let (sum, count) = iter
            .clone()
            .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            return None;
        }

        let n = count as f64;
        let mean = sum / n;
        let squared_deviations: f64 = iter.map(|v| (v - mean).powi(2)).sum();

        Some(Self {
            mean,
            std_dev: (squared_deviations / n).sqrt(),
            count,
        })
    }
}

/// Rounds `value` to `places` decimal places, halves away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_of_empty_is_none() {
        assert!(Distribution::of(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn distribution_of_single_value_has_zero_spread() {
        let d = Distribution::of(vec![4.0]).unwrap();
        assert_eq!(d.mean, 4.0);
        assert_eq!(d.std_dev, 0.0);
        assert_eq!(d.count, 1);
    }

    #[test]
    fn distribution_uses_population_denominator() {
        // Squared deviations 4+4+0+0+4+4 = 16, / 6 -> variance 2.667
        let d = Distribution::of(vec![5.0, 5.0, 1.0, 1.0, 3.0, 3.0]).unwrap();
        assert_eq!(d.mean, 3.0);
        assert!((d.std_dev - (16.0_f64 / 6.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-2.0, 2), -2.0);
        assert_eq!(round_to(0.7 / 0.9, 3), 0.778);
    }

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }
}
