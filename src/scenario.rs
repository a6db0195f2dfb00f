//! The outer generation loop: decode every chromosome into a network, score it with some
//! [Scenario], and hand the scored population to a [GeneticAlgorithm] until a target is met.

use crate::{
    chromosome::Chromosome,
    network::Network,
    reproduce::{EpochError, GeneticAlgorithm},
    stats::Stats,
};
use core::ops::ControlFlow;
use log::{debug, info};
use rand::RngCore;

#[derive(Debug, thiserror::Error)]
pub enum EvolveError {
    #[error("Chromosome {index} has {genes} genes, too few for a network of {weights} weights")]
    Decode {
        index: usize,
        genes: usize,
        weights: usize,
    },
    #[error(transparent)]
    Epoch(#[from] EpochError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolutionTarget {
    Fitness(f64),
    Generation(usize),
}

impl EvolutionTarget {
    fn satisfied(&self, generation: &Generation<'_>) -> bool {
        match self {
            Self::Fitness(t) => generation.any_fitter_than(*t),
            Self::Generation(t) => *t <= generation.generation,
        }
    }
}

/// Something a network may be scored against. Fitness must be finite and non-negative,
/// where higher is better.
pub trait Scenario<N: Network> {
    fn eval(&self, network: &N) -> f64;
}

impl<N: Network, F: Fn(&N) -> f64> Scenario<N> for F {
    fn eval(&self, network: &N) -> f64 {
        self(network)
    }
}

/// A scored generation, as seen by hooks
#[derive(Debug)]
pub struct Generation<'a> {
    pub generation: usize,
    pub population: &'a [Chromosome],
    pub stats: Stats,
}

impl Generation<'_> {
    pub fn fittest(&self) -> Option<&Chromosome> {
        self.population.iter().max_by(|l, r| l.fitness_cmp(r))
    }

    pub fn any_fitter_than(&self, fitness: f64) -> bool {
        self.population.iter().any(|c| c.fitness >= fitness)
    }
}

pub type Hook<'a> = Box<dyn FnMut(&Generation<'_>) -> ControlFlow<()> + 'a>;

/// Callbacks fired after every generation is scored. Any of them may stop evolution.
#[derive(Default)]
pub struct EvolutionHooks<'a> {
    hooks: Vec<Hook<'a>>,
}

impl<'a> EvolutionHooks<'a> {
    pub fn new(hooks: Vec<Hook<'a>>) -> Self {
        Self { hooks }
    }

    fn fire(&mut self, generation: &Generation<'_>) -> ControlFlow<()> {
        for hook in self.hooks.iter_mut() {
            hook(generation)?;
        }
        ControlFlow::Continue(())
    }
}

/// The last scored generation
#[derive(Debug, Clone)]
pub struct Evolved {
    pub generation: usize,
    pub population: Vec<Chromosome>,
    pub stats: Stats,
}

impl Evolved {
    pub fn fittest(&self) -> Option<&Chromosome> {
        self.population.iter().max_by(|l, r| l.fitness_cmp(r))
    }
}

/// Score `population` on `scenario`, reusing `network` to decode every chromosome, and
/// reproduce it with `ga` until `target` is met or a hook breaks.
pub fn evolve<N: Network>(
    scenario: &impl Scenario<N>,
    network: &mut N,
    mut population: Vec<Chromosome>,
    ga: &mut GeneticAlgorithm,
    target: EvolutionTarget,
    rng: &mut impl RngCore,
    mut hooks: EvolutionHooks<'_>,
) -> Result<Evolved, EvolveError> {
    let mut gen_idx = 0;
    loop {
        score(scenario, network, &mut population)?;
        let stats = Stats::of(&population).ok_or(EpochError::EmptyPopulation)?;
        debug!("generation {gen_idx} scored, best {:.4}", stats.best);

        let generation = Generation {
            generation: gen_idx,
            population: &population,
            stats,
        };
        let stop = hooks.fire(&generation).is_break();
        if stop || target.satisfied(&generation) {
            info!(
                "evolution stopped at generation {gen_idx} with best fitness {:.4}",
                stats.best
            );
            break Ok(Evolved {
                generation: gen_idx,
                population,
                stats,
            });
        }

        population = ga.epoch(&population, rng)?;
        gen_idx += 1;
    }
}

fn score<N: Network>(
    scenario: &impl Scenario<N>,
    network: &mut N,
    population: &mut [Chromosome],
) -> Result<(), EvolveError> {
    for (index, c) in population.iter_mut().enumerate() {
        if !network.put_weights(&c.weights) {
            return Err(EvolveError::Decode {
                index,
                genes: c.len(),
                weights: network.number_of_weights(),
            });
        }
        c.fitness = scenario.eval(network);
    }
    Ok(())
}
