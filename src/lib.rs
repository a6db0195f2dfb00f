#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

mod macros;

pub mod chromosome;
pub mod config;
pub mod constants;
pub mod network;
pub mod population;
pub mod random;
pub mod reproduce;
pub mod scenario;
pub mod stats;

pub use chromosome::Chromosome;
pub use config::{ConfigError, GaConfig, Topology};
pub use network::{activate, FeedForward, Network};
pub use random::{Happens, Probabilities};
pub use reproduce::{EpochError, GeneticAlgorithm};
pub use scenario::{evolve, EvolutionTarget, Scenario};
pub use stats::Stats;
