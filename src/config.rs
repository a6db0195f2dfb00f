//! Tunables for the reproduction engine and the networks it evolves weights for.
//!
//! Both structs deserialize from JSON with every field optional, falling back to the
//! defaults in [crate::constants].

use crate::constants::{
    GANN_ACTIVATION_RESPONSE, GANN_BIAS, GANN_CROSSOVER_RATE, GANN_MAX_ELITE,
    GANN_MAX_ELITE_COPIES, GANN_MAX_PERTURBATION, GANN_MUTATION_RATE, GANN_POPULATION_SIZE,
};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

/// Configuration of a [crate::reproduce::GeneticAlgorithm]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Chromosomes per generation, at the start and end of every epoch
    pub population_size: usize,
    /// Genes per chromosome, which must match the evaluated network's weight count
    pub genome_size: usize,
    /// Per-gene mutation probability (0.0-1.0)
    pub mutation_rate: f64,
    /// Probability that two parents are recombined (0.0-1.0)
    pub crossover_rate: f64,
    /// Mutated genes are drawn uniformly from [0, max_perturbation)
    pub max_perturbation: f64,
    /// Fittest chromosomes carried forward unchanged
    pub max_elite: usize,
    /// Copies made of every elite chromosome
    pub max_elite_copies: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: GANN_POPULATION_SIZE,
            genome_size: 0,
            mutation_rate: GANN_MUTATION_RATE,
            crossover_rate: GANN_CROSSOVER_RATE,
            max_perturbation: GANN_MAX_PERTURBATION,
            max_elite: GANN_MAX_ELITE,
            max_elite_copies: GANN_MAX_ELITE_COPIES,
        }
    }
}

impl GaConfig {
    /// Defaults, with a genome sized to fit every weight of `topology`
    pub fn for_topology(topology: &Topology) -> Self {
        Self {
            genome_size: topology.number_of_weights(),
            ..Self::default()
        }
    }

    /// Chromosomes contributed by elitism before the population cap is applied
    pub fn elite_count(&self) -> usize {
        self.max_elite.saturating_mul(self.max_elite_copies)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.genome_size == 0 {
            return Err(ConfigError::ZeroGenome);
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        if !self.max_perturbation.is_finite() || self.max_perturbation < 0. {
            return Err(ConfigError::InvalidPerturbation(self.max_perturbation));
        }
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

fn check_rate(name: &'static str, rate: f64) -> Result<(), ConfigError> {
    if (0. ..=1.).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, rate })
    }
}

/// Shape of a [crate::network::FeedForward], plus the constants its neurons activate with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topology {
    pub inputs: usize,
    pub outputs: usize,
    pub hidden_layers: usize,
    pub neurons_per_layer: usize,
    /// Constant input paired with every neuron's last weight
    pub bias: f64,
    /// Divides a neuron's net input before the logistic
    pub activation_response: f64,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            inputs: 1,
            outputs: 1,
            hidden_layers: 1,
            neurons_per_layer: 1,
            bias: GANN_BIAS,
            activation_response: GANN_ACTIVATION_RESPONSE,
        }
    }
}

impl Topology {
    pub fn new(
        inputs: usize,
        outputs: usize,
        hidden_layers: usize,
        neurons_per_layer: usize,
    ) -> Self {
        Self {
            inputs,
            outputs,
            hidden_layers,
            neurons_per_layer,
            ..Self::default()
        }
    }

    /// (neurons, inputs per neuron) of every layer, hidden layers first.
    /// Every hidden layer reads `inputs` values; only the output layer reads the hidden width.
    pub fn layer_shapes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.hidden_layers)
            .map(|_| (self.neurons_per_layer, self.inputs))
            .chain([(self.outputs, self.neurons_per_layer)])
    }

    /// Weights across all neurons, one per input plus one for the bias
    pub fn number_of_weights(&self) -> usize {
        self.layer_shapes()
            .map(|(neurons, inputs)| neurons * (inputs + 1))
            .sum()
    }

    /// Whether each layer's output width matches the input width of the layer after it
    pub fn chains(&self) -> bool {
        let mut width = self.inputs;
        for (neurons, inputs) in self.layer_shapes() {
            if inputs != width {
                return false;
            }
            width = neurons;
        }
        true
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inputs == 0 || self.outputs == 0 || self.neurons_per_layer == 0 {
            return Err(ConfigError::EmptyLayer);
        }
        if !self.activation_response.is_finite() || self.activation_response <= 0. {
            return Err(ConfigError::InvalidResponse(self.activation_response));
        }
        if !self.bias.is_finite() {
            return Err(ConfigError::InvalidBias(self.bias));
        }
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    ZeroPopulation,
    #[error("Genome size must be non-zero")]
    ZeroGenome,
    #[error("{name} must be within [0, 1], got {rate}")]
    InvalidRate { name: &'static str, rate: f64 },
    #[error("Max perturbation must be finite and non-negative, got {0}")]
    InvalidPerturbation(f64),
    #[error("Inputs, outputs and neurons per layer must be non-zero")]
    EmptyLayer,
    #[error("Activation response must be finite and positive, got {0}")]
    InvalidResponse(f64),
    #[error("Bias must be finite, got {0}")]
    InvalidBias(f64),
    #[error("Cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Cannot read config: {0}")]
    Io(#[from] io::Error),
}
