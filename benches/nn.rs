use criterion::Criterion;
use gann::{activate::relu, random::WyRng, FeedForward, Network, Topology};
use rand::SeedableRng;

fn bench_nn(bench: &mut Criterion) {
    let mut rng = WyRng::seed_from_u64(0);
    let mut net = FeedForward::new(Topology::new(8, 4, 1, 16), &mut rng);
    let i = vec![0.7, 0.3, 0.1, 0.9, 0.5, 0.5, 0.2, 0.8];

    bench.bench_function("feedforward-update", |b| b.iter(|| net.update(&i)));
    bench.bench_function("feedforward-update-relu", |b| {
        b.iter(|| net.update_with(&i, relu))
    });

    let weights = net.weights();
    bench.bench_function("feedforward-put-weights", |b| {
        b.iter(|| net.put_weights(&weights))
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
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
    bench_nn(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
