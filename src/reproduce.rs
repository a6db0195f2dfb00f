//! Functions related to producing one generation of chromosomes from the evaluated last one.

use crate::{
    chromosome::Chromosome,
    config::GaConfig,
    random::{EvolutionEvent, Happens, ProbBinding, ProbStatic},
    stats::Stats,
};
use log::{debug, trace, warn};
use rand::{Rng, RngCore};

#[derive(Debug, thiserror::Error)]
pub enum EpochError {
    #[error("Cannot reproduce an empty population")]
    EmptyPopulation,
    #[error("Population has {actual} chromosomes, expected {expected}")]
    PopulationSize { expected: usize, actual: usize },
    #[error("Chromosome {index} has {actual} genes, expected {expected}")]
    GenomeLength {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Chromosome {index} has fitness {fitness}, fitness must be finite and non-negative")]
    InvalidFitness { index: usize, fitness: f64 },
    #[error("Total fitness of {0} leaves nothing to select")]
    NonPositiveTotalFitness(f64),
    #[error("Total fitness overflows, scale fitness down")]
    TotalFitnessOverflow,
}

/// Select a chromosome with probability proportional to its fitness, drawing the spin of the
/// wheel from `rng`. See [roulette_at].
pub fn roulette<'a>(
    population: &'a [Chromosome],
    total: f64,
    rng: &mut impl RngCore,
) -> Option<&'a Chromosome> {
    let r = rng.random::<f64>() * total;
    trace!("roulette spun {r} of {total}");
    roulette_at(population, r)
}

/// Walk the population accumulating fitness, and select the first chromosome with positive
/// fitness whose running total reaches `r`. Where the walk falls short of `r`, which happens
/// when `r` is the total itself give or take some rounding, the last chromosome with positive
/// fitness is selected. None only if no chromosome has positive fitness.
pub fn roulette_at(population: &[Chromosome], r: f64) -> Option<&Chromosome> {
    let mut acc = 0.;
    for c in population {
        acc += c.fitness;
        if c.fitness > 0. && acc >= r {
            return Some(c);
        }
    }

    let fallback = population.iter().rev().find(|c| c.fitness > 0.);
    if fallback.is_some() {
        warn!("roulette walk ended at {acc} short of {r}, selecting the last candidate");
    }
    fallback
}

/// Single point crossover: `a` up to `cut` followed by `b` from `cut`, and the converse.
/// Both parents must be the same length, and `cut` no larger than it.
pub fn crossover_at(a: &[f64], b: &[f64], cut: usize) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert!(cut <= a.len());

    let mut kid_a = Vec::with_capacity(a.len());
    kid_a.extend_from_slice(&a[..cut]);
    kid_a.extend_from_slice(&b[cut..]);

    let mut kid_b = Vec::with_capacity(b.len());
    kid_b.extend_from_slice(&b[..cut]);
    kid_b.extend_from_slice(&a[cut..]);

    (kid_a, kid_b)
}

/// The reproduction engine. Holds no population between generations, only the statistics
/// of the last population it reproduced.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    config: GaConfig,
    probabilities: ProbStatic,
    stats: Stats,
}

impl GeneticAlgorithm {
    pub fn new(config: GaConfig) -> Self {
        let probabilities = ProbStatic::from(&config);
        if config.elite_count() % 2 == 1 && config.elite_count() < config.population_size {
            warn!(
                "{} elite copies is odd, the last pair of children is truncated every epoch",
                config.elite_count()
            );
        }

        Self {
            config,
            probabilities,
            stats: Stats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Statistics of the population most recently handed to [GeneticAlgorithm::epoch]
    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.stats.total
    }

    #[inline]
    pub fn best(&self) -> f64 {
        self.stats.best
    }

    #[inline]
    pub fn avg(&self) -> f64 {
        self.stats.avg
    }

    #[inline]
    pub fn worst(&self) -> f64 {
        self.stats.worst
    }

    /// Produce the next generation from an evaluated `population`.
    ///
    /// Copies of the fittest chromosomes are carried forward first, then the generation is
    /// filled by pairs of roulette selected parents, recombined and mutated. Children carry
    /// their parent's fitness until they're evaluated. The returned population always holds
    /// exactly `population_size` chromosomes.
    ///
    /// Statistics are reset before anything else, so they hold the sentinel [Stats::default]
    /// if the population is rejected.
    pub fn epoch(
        &mut self,
        population: &[Chromosome],
        rng: &mut impl RngCore,
    ) -> Result<Vec<Chromosome>, EpochError> {
        self.stats = Stats::default();
        self.check(population)?;

        let stats = Stats::of(population).ok_or(EpochError::EmptyPopulation)?;
        let total = stats.total;
        if total.is_nan() || total <= 0. {
            return Err(EpochError::NonPositiveTotalFitness(total));
        }
        if total.is_infinite() {
            return Err(EpochError::TotalFitnessOverflow);
        }
        self.stats = stats;

        let size = self.config.population_size;
        let mut next = self.elites(population);
        debug!("carried {} elite copies into the next generation", next.len());

        let mut rng = ProbBinding::new(self.probabilities, rng);
        while next.len() < size {
            let a = roulette(population, total, &mut rng)
                .ok_or(EpochError::NonPositiveTotalFitness(total))?;
            let b = roulette(population, total, &mut rng)
                .ok_or(EpochError::NonPositiveTotalFitness(total))?;

            let (mut kid_a, mut kid_b) = self.crossover(&a.weights, &b.weights, &mut rng);
            self.mutate(&mut kid_a, &mut rng);
            self.mutate(&mut kid_b, &mut rng);

            next.push(Chromosome::new(a.fitness, kid_a));
            next.push(Chromosome::new(b.fitness, kid_b));
        }
        next.truncate(size);

        debug!(
            "epoch of {} chromosomes: best {:.4}, avg {:.4}, worst {:.4}, total {:.4}",
            population.len(),
            self.stats.best,
            self.stats.avg,
            self.stats.worst,
            self.stats.total
        );
        Ok(next)
    }

    fn check(&self, population: &[Chromosome]) -> Result<(), EpochError> {
        if population.is_empty() {
            return Err(EpochError::EmptyPopulation);
        }
        if population.len() != self.config.population_size {
            return Err(EpochError::PopulationSize {
                expected: self.config.population_size,
                actual: population.len(),
            });
        }

        for (index, c) in population.iter().enumerate() {
            if c.len() != self.config.genome_size {
                return Err(EpochError::GenomeLength {
                    index,
                    expected: self.config.genome_size,
                    actual: c.len(),
                });
            }
            if !c.fitness.is_finite() || c.fitness < 0. {
                return Err(EpochError::InvalidFitness {
                    index,
                    fitness: c.fitness,
                });
            }
        }
        Ok(())
    }

    /// `max_elite_copies` copies of each of the `max_elite` fittest chromosomes, fittest
    /// first, truncated to the population size
    fn elites(&self, population: &[Chromosome]) -> Vec<Chromosome> {
        let mut ranked = population.iter().collect::<Vec<_>>();
        ranked.sort_by(|l, r| r.fitness_cmp(l));

        let size = self.config.population_size;
        let mut elites = Vec::with_capacity(size);
        for elite in ranked.into_iter().take(self.config.max_elite) {
            for _ in 0..self.config.max_elite_copies {
                if elites.len() == size {
                    return elites;
                }
                elites.push(elite.clone());
            }
        }
        elites
    }

    /// Recombine two parents at a random cut point with probability `crossover_rate`,
    /// otherwise copy them. Parents of different lengths are always copied.
    pub fn crossover(
        &self,
        a: &[f64],
        b: &[f64],
        rng: &mut (impl RngCore + Happens),
    ) -> (Vec<f64>, Vec<f64>) {
        if !rng.happens(EvolutionEvent::Crossover) || a.len() < 2 || a.len() != b.len() {
            return (a.to_vec(), b.to_vec());
        }

        let cut = rng.random_range(0..a.len() - 1);
        crossover_at(a, b, cut)
    }

    /// Replace each gene with probability `mutation_rate` by a fresh value drawn uniformly
    /// from [0, max_perturbation)
    pub fn mutate(&self, genes: &mut [f64], rng: &mut (impl RngCore + Happens)) {
        for gene in genes.iter_mut() {
            if rng.happens(EvolutionEvent::Mutate) {
                *gene = rng.random::<f64>() * self.config.max_perturbation;
            }
        }
    }
}
