use crate::network::Network;
use core::cmp::Ordering;

/// A candidate set of network weights, and the fitness some external evaluation gave it.
/// Higher fitness is better.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    pub fitness: f64,
    pub weights: Vec<f64>,
}

impl Chromosome {
    pub fn new(fitness: f64, weights: Vec<f64>) -> Self {
        Self { fitness, weights }
    }

    /// An unevaluated chromosome holding a copy of every weight in `network`
    pub fn from_network(network: &impl Network) -> Self {
        Self::new(0., network.weights())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Total order on fitness alone, NaN sorting above everything
    #[inline]
    pub fn fitness_cmp(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

/// Borrowed view of a [Chromosome] ordered, and compared, by fitness only
#[derive(Debug, Clone, Copy)]
pub struct ByFitness<'a>(pub &'a Chromosome);

impl PartialEq for ByFitness<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByFitness<'_> {}

impl PartialOrd for ByFitness<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByFitness<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.fitness_cmp(other.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::Topology, network::FeedForward, random::WyRng};
    use rand::SeedableRng;
    use std::collections::BinaryHeap;

    #[test]
    fn test_fitness_cmp() {
        let low = Chromosome::new(0.5, vec![1., 2.]);
        let high = Chromosome::new(3., vec![0., 0.]);
        assert_eq!(low.fitness_cmp(&high), Ordering::Less);
        assert_eq!(high.fitness_cmp(&low), Ordering::Greater);
        assert_eq!(ByFitness(&low), ByFitness(&Chromosome::new(0.5, vec![9.])));
        assert!(ByFitness(&low) < ByFitness(&high));
    }

    #[test]
    fn test_by_fitness_heap() {
        let pop = [
            Chromosome::new(2., vec![]),
            Chromosome::new(-1., vec![]),
            Chromosome::new(7., vec![]),
            Chromosome::new(0., vec![]),
        ];
        let mut heap = pop.iter().map(ByFitness).collect::<BinaryHeap<_>>();
        let mut order = vec![];
        while let Some(ByFitness(c)) = heap.pop() {
            order.push(c.fitness);
        }
        assert_eq!(order, vec![7., 2., 0., -1.]);
    }

    #[test]
    fn test_from_network() {
        let mut rng = WyRng::seed_from_u64(1);
        let network = FeedForward::new(Topology::new(2, 1, 1, 2), &mut rng);
        let chromosome = Chromosome::from_network(&network);
        assert_eq!(chromosome.len(), 9);
        assert_eq!(chromosome.fitness, 0.);
        assert_eq!(chromosome.weights, network.weights());
    }
}
