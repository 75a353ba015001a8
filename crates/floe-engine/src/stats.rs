//! Timing statistics for benchmark harnesses.

/// Mean of the samples; `0.0` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation; `0.0` for an empty slice.
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    let sq_sum: f64 = samples.iter().map(|&x| x * x).sum();
    (sq_sum / samples.len() as f64 - m * m).max(0.0).sqrt()
}

/// Mean and spread of a timing sample set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Number of samples.
    pub samples: usize,
}

impl Summary {
    /// Summarize a sample set.
    pub fn from_samples(samples: &[f64]) -> Self {
        Self {
            mean: mean(samples),
            std_dev: std_dev(samples),
            samples: samples.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_values() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), 5.0);
        assert!((std_dev(&xs) - 2.0).abs() < 1e-12);
        let s = Summary::from_samples(&xs);
        assert_eq!(s.samples, 8);
        assert_eq!(s.mean, 5.0);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(Summary::from_samples(&[]), Summary::default());
    }

    proptest! {
        #[test]
        fn mean_within_bounds(xs in prop::collection::vec(-1e6f64..1e6, 1..64)) {
            let m = mean(&xs);
            let lo = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-9 && m <= hi + 1e-9);
        }

        #[test]
        fn std_dev_nonnegative(xs in prop::collection::vec(-1e6f64..1e6, 1..64)) {
            prop_assert!(std_dev(&xs) >= 0.0);
        }

        #[test]
        fn constant_samples_have_zero_spread(x in -1e6f64..1e6, n in 1usize..32) {
            let xs = vec![x; n];
            prop_assert!((mean(&xs) - x).abs() < 1e-6);
            prop_assert!(std_dev(&xs) < 1e-3);
        }
    }
}
