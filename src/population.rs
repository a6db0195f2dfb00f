//! Functions related to seeding the first generation of chromosomes.

use crate::{chromosome::Chromosome, config::GaConfig};
use rand::{Rng, RngCore};

/// Initial population of `population_size` unevaluated chromosomes, every gene drawn uniformly
/// from [0, 1) the same way a fresh [crate::network::FeedForward] draws its weights
pub fn population_init(config: &GaConfig, rng: &mut impl RngCore) -> Vec<Chromosome> {
    (0..config.population_size)
        .map(|_| {
            let weights = (0..config.genome_size).map(|_| rng.random()).collect();
            Chromosome::new(0., weights)
        })
        .collect()
}

/// A population of `population` copies of a single chromosome. Useful for resuming
/// evolution from a single champion.
pub fn population_from_chromosome(muse: &Chromosome, population: usize) -> Vec<Chromosome> {
    vec![Chromosome::new(0., muse.weights.clone()); population]
}
