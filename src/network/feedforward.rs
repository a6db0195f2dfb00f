use super::{activate, Network};
use crate::config::Topology;
use log::{trace, warn};
use rand::{Rng, RngCore};
use rulinalg::matrix::{BaseMatrix, BaseMatrixMut, Matrix};

/// A fully connected layer. Each row holds one neuron's weights, one per input,
/// followed by the weight of its bias.
#[derive(Debug, Clone)]
pub struct Layer {
    w: Matrix<f64>,
}

impl Layer {
    fn random(neurons: usize, inputs: usize, rng: &mut impl RngCore) -> Self {
        let w = (0..neurons * (inputs + 1))
            .map(|_| rng.random::<f64>())
            .collect::<Vec<_>>();
        Self {
            w: Matrix::new(neurons, inputs + 1, w),
        }
    }

    fn zeroed(neurons: usize, inputs: usize) -> Self {
        Self {
            w: Matrix::zeros(neurons, inputs + 1),
        }
    }

    #[inline]
    pub fn neurons(&self) -> usize {
        self.w.rows()
    }

    /// Inputs read by every neuron, not counting the bias
    #[inline]
    pub fn inputs(&self) -> usize {
        self.w.cols() - 1
    }

    /// Every weight of the layer, neuron-major
    #[inline]
    pub fn weights(&self) -> &[f64] {
        self.w.data()
    }

    /// One neuron's weights, its bias weight last
    pub fn neuron(&self, neuron: usize) -> Option<&[f64]> {
        let cols = self.w.cols();
        self.w.data().get(neuron * cols..(neuron + 1) * cols)
    }

    fn get(&self, neuron: usize, input: usize) -> Option<f64> {
        (neuron < self.w.rows() && input < self.w.cols()).then(|| self.w[[neuron, input]])
    }

    fn put(&mut self, neuron: usize, input: usize, weight: f64) -> bool {
        if neuron < self.w.rows() && input < self.w.cols() {
            self.w[[neuron, input]] = weight;
            true
        } else {
            false
        }
    }

    fn activate<F: Fn(f64) -> f64>(&self, input: &[f64], bias: f64, σ: &F) -> Option<Vec<f64>> {
        if input.len() != self.inputs() {
            return None;
        }

        let mut x = Vec::with_capacity(input.len() + 1);
        x.extend_from_slice(input);
        x.push(bias);
        let x = Matrix::new(x.len(), 1, x);

        Some((&self.w * &x).apply(σ).into_vec())
    }
}

/// A fixed topology, fully connected feedforward network: some hidden layers of equal width,
/// followed by an output layer.
///
/// Every hidden layer is wired to read `topology.inputs` values. With more than one hidden
/// layer that only evaluates when the hidden width equals the input width, see
/// [Topology::chains].
#[derive(Debug, Clone)]
pub struct FeedForward {
    topology: Topology,
    layers: Vec<Layer>,
}

impl FeedForward {
    /// A network whose every weight, bias weights included, is drawn uniformly from [0, 1)
    pub fn new(topology: Topology, rng: &mut impl RngCore) -> Self {
        Self::build(topology, |neurons, inputs| Layer::random(neurons, inputs, rng))
    }

    /// A network whose every weight is 0
    pub fn zeroed(topology: Topology) -> Self {
        Self::build(topology, Layer::zeroed)
    }

    /// Decode a weight vector into a network of some topology
    pub fn from_weights(topology: Topology, weights: &[f64]) -> Option<Self> {
        let mut network = Self::zeroed(topology);
        network.put_weights(weights).then_some(network)
    }

    fn build(topology: Topology, mut layer: impl FnMut(usize, usize) -> Layer) -> Self {
        if !topology.chains() {
            warn!(
                "{} hidden layer(s) of {} neurons reading {} inputs don't chain, update will fail",
                topology.hidden_layers, topology.neurons_per_layer, topology.inputs
            );
        }

        let layers = topology
            .layer_shapes()
            .map(|(neurons, inputs)| layer(neurons, inputs))
            .collect();
        Self { topology, layers }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Hidden layers, then the output layer
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn number_of_inputs(&self) -> usize {
        self.topology.inputs
    }

    #[inline]
    pub fn number_of_outputs(&self) -> usize {
        self.topology.outputs
    }

    /// Hidden layers only
    #[inline]
    pub fn number_of_layers(&self) -> usize {
        self.topology.hidden_layers
    }

    #[inline]
    pub fn neurons_per_layer(&self) -> usize {
        self.topology.neurons_per_layer
    }

    /// A single weight, where `input == inputs` of that layer addresses the bias weight
    pub fn get_weight(&self, layer: usize, neuron: usize, input: usize) -> Option<f64> {
        self.layers.get(layer)?.get(neuron, input)
    }

    /// Replace a single weight. False if any index is out of range.
    pub fn put_weight(&mut self, layer: usize, neuron: usize, input: usize, weight: f64) -> bool {
        match self.layers.get_mut(layer) {
            Some(l) => l.put(neuron, input, weight),
            None => false,
        }
    }
}

impl Network for FeedForward {
    fn number_of_weights(&self) -> usize {
        self.layers.iter().map(|l| l.weights().len()).sum()
    }

    fn weights(&self) -> Vec<f64> {
        let mut weights = Vec::with_capacity(self.number_of_weights());
        for layer in self.layers.iter() {
            weights.extend_from_slice(layer.weights());
        }
        weights
    }

    fn put_weights(&mut self, weights: &[f64]) -> bool {
        let want = self.number_of_weights();
        if weights.len() < want {
            trace!("cannot put {} weights into a network of {want}", weights.len());
            return false;
        }

        let mut head = 0;
        for layer in self.layers.iter_mut() {
            let dst = layer.w.mut_data();
            let len = dst.len();
            dst.copy_from_slice(&weights[head..head + len]);
            head += len;
        }
        true
    }

    fn update_with<F: Fn(f64) -> f64>(&self, input: &[f64], σ: F) -> Option<Vec<f64>> {
        if input.len() != self.topology.inputs {
            return None;
        }

        let mut layers = self.layers.iter();
        let mut output = layers.next()?.activate(input, self.topology.bias, &σ)?;
        for layer in layers {
            output = layer.activate(&output, self.topology.bias, &σ)?;
        }
        Some(output)
    }

    fn update(&self, input: &[f64]) -> Option<Vec<f64>> {
        let response = self.topology.activation_response;
        self.update_with(input, |x| activate::sigmoid(x, response))
    }
}
