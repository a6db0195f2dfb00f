//! Neural networks who interpret a flat weight vector, so that the genetic algorithm can treat
//! them as chromosomes without knowing their shape.

pub mod feedforward;

pub use feedforward::{FeedForward, Layer};

pub mod activate {
    use core::f64::consts::E;

    /// The logistic, with the net input divided by `response` first
    pub fn sigmoid(x: f64, response: f64) -> f64 {
        1. / (1. + E.powf(-x / response))
    }

    pub fn logistic(x: f64) -> f64 {
        sigmoid(x, 1.)
    }

    pub fn relu(x: f64) -> f64 {
        if x < 0. {
            0.
        } else {
            x
        }
    }
}

/// The trait for all networks. Right now, only f64 values are used.
///
/// Structural mismatches are not errors here: puts answer with a bool, and reads or
/// evaluations with None, and callers are expected to check before carrying on.
pub trait Network {
    /// Count of every weight, which a chromosome's genome size must equal
    fn number_of_weights(&self) -> usize;

    /// Every weight, layer-major, then neuron-major, then by input with the bias weight last
    fn weights(&self) -> Vec<f64>;

    /// Replace every weight in the order of [Network::weights].
    /// Fails, leaving the network untouched, if `weights` is too short.
    fn put_weights(&mut self, weights: &[f64]) -> bool;

    /// Evaluate the network for some input, activating every neuron with σ
    fn update_with<F: Fn(f64) -> f64>(&self, input: &[f64], σ: F) -> Option<Vec<f64>>;

    /// Evaluate the network with its own configured activation
    fn update(&self, input: &[f64]) -> Option<Vec<f64>>;
}
