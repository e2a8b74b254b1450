//! Seeded generation of the random points to plot.
//!
//! A single `StdRng` is seeded once and drawn from in a fixed order: all X
//! coordinates, then all Y coordinates, then all color values, then all size
//! values. The same seed and count therefore always produce the same
//! `PointSet` for a given `rand` version.

use crate::error::AppError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Parameters of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub count: usize,
    /// Inclusive lower bound of color and size values.
    pub low: i64,
    /// Exclusive upper bound of color and size values.
    pub high: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            count: 1000,
            low: 10,
            high: 101,
        }
    }
}

/// Four parallel arrays; index `i` across them describes one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colors: Vec<i64>,
    pub sizes: Vec<i64>,
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Checks that all four arrays have the same length.
    pub fn validate(&self) -> Result<(), AppError> {
        let n = self.x.len();
        if self.y.len() != n || self.colors.len() != n || self.sizes.len() != n {
            return Err(AppError::LengthMismatch {
                x: n,
                y: self.y.len(),
                colors: self.colors.len(),
                sizes: self.sizes.len(),
            });
        }
        Ok(())
    }

    /// Iterates over `(x, y, color, size)` tuples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, i64, i64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.colors)
            .zip(&self.sizes)
            .map(|(((&x, &y), &c), &s)| (x, y, c, s))
    }
}

/// Generates a `PointSet` from the given configuration.
///
/// # Errors
///
/// Returns `AppError::InvalidRange` if `low` is not smaller than `high`.
pub fn generate(config: &GeneratorConfig) -> Result<PointSet, AppError> {
    if config.low >= config.high {
        return Err(AppError::InvalidRange {
            low: config.low,
            high: config.high,
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.count;

    let x = normal_draws(&mut rng, n);
    let y = normal_draws(&mut rng, n);
    let colors = uniform_int_draws(&mut rng, n, config.low, config.high);
    let sizes = uniform_int_draws(&mut rng, n, config.low, config.high);

    Ok(PointSet { x, y, colors, sizes })
}

fn normal_draws(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

fn uniform_int_draws(rng: &mut StdRng, n: usize, low: i64, high: i64) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(low..high)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_config_matches_reference_script() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.count, 1000);
        assert_eq!((config.low, config.high), (10, 101));

        let points = generate(&config).unwrap();
        assert_eq!(points.len(), 1000);
        points.validate().unwrap();
    }

    #[test]
    fn same_seed_is_reproducible() {
        let config = GeneratorConfig {
            seed: 7,
            ..Default::default()
        };
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate(&GeneratorConfig::default()).unwrap();
        let b = generate(&GeneratorConfig {
            seed: 1,
            ..Default::default()
        })
        .unwrap();
        assert_ne!(a.x, b.x);
    }

    #[test]
    fn x_and_y_are_independent_draws() {
        let points = generate(&GeneratorConfig::default()).unwrap();
        assert_ne!(points.x, points.y);
    }

    #[test]
    fn normal_draws_look_standard() {
        let points = generate(&GeneratorConfig {
            count: 20_000,
            ..Default::default()
        })
        .unwrap();
        let n = points.x.len() as f64;
        let mean = points.x.iter().sum::<f64>() / n;
        let var = points.x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 0.05, "mean was {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance was {var}");
    }

    #[test]
    fn empty_range_is_rejected() {
        let config = GeneratorConfig {
            low: 5,
            high: 5,
            ..Default::default()
        };
        assert!(matches!(
            generate(&config),
            Err(AppError::InvalidRange { low: 5, high: 5 })
        ));
    }

    #[test]
    fn zero_points_is_allowed() {
        let points = generate(&GeneratorConfig {
            count: 0,
            ..Default::default()
        })
        .unwrap();
        assert!(points.is_empty());
        points.validate().unwrap();
    }

    #[test]
    fn validate_reports_mismatched_lengths() {
        let points = PointSet {
            x: vec![0.0, 1.0],
            y: vec![0.0],
            colors: vec![10, 20],
            sizes: vec![10, 20],
        };
        assert!(matches!(
            points.validate(),
            Err(AppError::LengthMismatch { x: 2, y: 1, .. })
        ));
    }

    #[test]
    fn points_iterates_in_index_order() {
        let points = PointSet {
            x: vec![1.0, 2.0],
            y: vec![3.0, 4.0],
            colors: vec![10, 20],
            sizes: vec![30, 40],
        };
        let tuples: Vec<_> = points.points().collect();
        assert_eq!(tuples, vec![(1.0, 3.0, 10, 30), (2.0, 4.0, 20, 40)]);
    }

    proptest! {
        #[test]
        fn arrays_share_the_requested_length(seed in any::<u64>(), count in 0usize..300) {
            let points = generate(&GeneratorConfig { seed, count, low: 10, high: 101 }).unwrap();
            prop_assert_eq!(points.x.len(), count);
            prop_assert_eq!(points.y.len(), count);
            prop_assert_eq!(points.colors.len(), count);
            prop_assert_eq!(points.sizes.len(), count);
        }

        #[test]
        fn values_stay_in_the_half_open_range(
            seed in any::<u64>(),
            low in -1000i64..1000,
            span in 1i64..500,
        ) {
            let high = low + span;
            let points = generate(&GeneratorConfig { seed, count: 200, low, high }).unwrap();
            prop_assert!(points.colors.iter().all(|c| (low..high).contains(c)));
            prop_assert!(points.sizes.iter().all(|s| (low..high).contains(s)));
        }
    }
}
