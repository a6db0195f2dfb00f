//! Centralized defaults for gann evolution and network parameters.
//!
//! All tunables are defined here with the `GANN_` prefix. They only seed
//! [crate::config::GaConfig] and [crate::config::Topology]; nothing reads them at runtime.

// ============================================================================
// Population Parameters
// ============================================================================

/// Number of chromosomes in every generation
pub const GANN_POPULATION_SIZE: usize = 400;

// ============================================================================
// Reproduction Parameters
// ============================================================================

/// Per-gene probability of replacing a gene with a fresh random value
pub const GANN_MUTATION_RATE: f64 = 0.001;

/// Probability that a pair of parents is recombined rather than copied
pub const GANN_CROSSOVER_RATE: f64 = 0.7;

/// Upper bound of the uniform range a mutated gene is drawn from
pub const GANN_MAX_PERTURBATION: f64 = 1.0;

/// Number of fittest chromosomes carried into the next generation
pub const GANN_MAX_ELITE: usize = 10;

/// Number of copies of every elite chromosome
pub const GANN_MAX_ELITE_COPIES: usize = 20;

// ============================================================================
// Network Parameters
// ============================================================================

/// Constant input paired with every neuron's bias weight
pub const GANN_BIAS: f64 = 1.0;

/// Divisor of a neuron's net input before the logistic is applied
pub const GANN_ACTIVATION_RESPONSE: f64 = 1.0;
