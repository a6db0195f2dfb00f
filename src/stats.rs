//! Fitness statistics of a single evaluated generation.

use crate::chromosome::{ByFitness, Chromosome};
use core::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub total: f64,
    pub best: f64,
    pub avg: f64,
    pub worst: f64,
}

impl Default for Stats {
    /// The sentinel held before any population has been measured
    fn default() -> Self {
        Self {
            total: 0.,
            best: 0.,
            avg: 0.,
            worst: f64::INFINITY,
        }
    }
}

impl Stats {
    /// Drain `population` through a min-heap on fitness: the first value out is the worst,
    /// the last is the best, and everything in between accumulates into the total.
    /// Returns None for an empty population.
    pub fn of(population: &[Chromosome]) -> Option<Self> {
        let mut queue = population
            .iter()
            .map(|c| Reverse(ByFitness(c)))
            .collect::<BinaryHeap<_>>();

        let Reverse(ByFitness(worst)) = queue.pop()?;
        let mut stats = Self {
            total: worst.fitness,
            best: worst.fitness,
            avg: 0.,
            worst: worst.fitness,
        };

        while let Some(Reverse(ByFitness(c))) = queue.pop() {
            stats.total += c.fitness;
            stats.best = c.fitness;
        }

        stats.avg = stats.total / population.len() as f64;
        Some(stats)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_f64_approx, random::WyRng};
    use rand::{Rng, SeedableRng};

    fn fitted(fitness: &[f64]) -> Vec<Chromosome> {
        fitness
            .iter()
            .map(|f| Chromosome::new(*f, vec![0.; 3]))
            .collect()
    }

    #[test]
    fn test_sentinel() {
        let stats = Stats::default();
        assert_eq!(stats.total, 0.);
        assert_eq!(stats.best, 0.);
        assert_eq!(stats.avg, 0.);
        assert_eq!(stats.worst, f64::INFINITY);
    }

    #[test]
    fn test_empty() {
        assert_eq!(Stats::of(&[]), None);
    }

    #[test]
    fn test_single() {
        let stats = Stats::of(&fitted(&[2.5])).unwrap();
        assert_eq!(
            stats,
            Stats {
                total: 2.5,
                best: 2.5,
                avg: 2.5,
                worst: 2.5,
            }
        );
    }

    #[test]
    fn test_known() {
        let stats = Stats::of(&fitted(&[3., 1., 4., 1., 5.])).unwrap();
        assert_f64_approx!(stats.total, 14.);
        assert_f64_approx!(stats.best, 5.);
        assert_f64_approx!(stats.worst, 1.);
        assert_f64_approx!(stats.avg, 2.8);
    }

    #[test]
    fn test_identical() {
        let stats = Stats::of(&fitted(&[1.; 4])).unwrap();
        assert_eq!(
            stats,
            Stats {
                total: 4.,
                best: 1.,
                avg: 1.,
                worst: 1.,
            }
        );
    }

    #[test]
    fn test_ordering_invariant() {
        let mut rng = WyRng::seed_from_u64(11);
        for size in 1..50 {
            let fitness = (0..size)
                .map(|_| rng.random::<f64>() * 100.)
                .collect::<Vec<_>>();
            let stats = Stats::of(&fitted(&fitness)).unwrap();
            let sum = fitness.iter().sum::<f64>();

            assert!(stats.worst <= stats.avg + 1e-9, "{stats:?}");
            assert!(stats.avg <= stats.best + 1e-9, "{stats:?}");
            assert!((stats.total - sum).abs() < 1e-6, "{} != {sum}", stats.total);
        }
    }
}
