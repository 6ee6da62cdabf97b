use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
extern crate phylohmm;
use phylohmm::likelihood::{best_alpha, best_alphas};
use phylohmm::random_seq::evolve_along_tree;
use phylohmm::tree::{PhylogeneticTree, TreeRecord};

fn primates() -> PhylogeneticTree {
    PhylogeneticTree::from_records(&[
        TreeRecord::new("Human", "HC", 0.01),
        TreeRecord::new("Chimp", "HC", 0.01),
        TreeRecord::new("HC", "HCB", 0.05),
        TreeRecord::new("Baboon", "BM", 0.02),
        TreeRecord::new("Macaque", "BM", 0.02),
        TreeRecord::new("BM", "HCB", 0.05),
        TreeRecord::new("HCB", "Root", 0.1),
        TreeRecord::new("Marmoset", "Root", 0.2),
    ])
    .unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let tree = primates();

    c.bench_function("best_alpha w100", |b| {
        let window = evolve_along_tree(&tree, 0.5, 100, 0).unwrap();
        b.iter(|| {
            let _best = best_alpha(black_box(&window), &tree).unwrap();
        })
    });

    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);

    let mut group = c.benchmark_group("serial vs parallel scan");
    group.plot_config(plot_config);
    group.sample_size(10);
    for len in [1_000, 10_000, 100_000].iter() {
        let alignment = evolve_along_tree(&tree, 0.5, *len, 1).unwrap();
        group.bench_with_input(BenchmarkId::new("serial", len), len, |b, _| {
            b.iter(|| {
                let _alphas = best_alphas(&alignment, &tree, 100, false).unwrap();
            });
        });
        group.bench_with_input(BenchmarkId::new("parallel", len), len, |b, _| {
            b.iter(|| {
                let _alphas = best_alphas(&alignment, &tree, 100, true).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
