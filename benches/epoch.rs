use criterion::Criterion;
use gann::{
    population::population_init, random::default_rng, GaConfig, GeneticAlgorithm, Topology,
};
use rand::Rng;

fn bench_epoch(bench: &mut Criterion) {
    let mut rng = default_rng();
    let config = GaConfig {
        population_size: 1000,
        mutation_rate: 0.01,
        ..GaConfig::for_topology(&Topology::new(8, 4, 1, 16))
    };
    let mut population = population_init(&config, &mut rng);
    for c in population.iter_mut() {
        c.fitness = rng.random::<f64>() * 100.;
    }

    let mut ga = GeneticAlgorithm::new(config);
    bench.bench_function("epoch", |b| b.iter(|| ga.epoch(&population, &mut rng)));
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(100)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_epoch(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
