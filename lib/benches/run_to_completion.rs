#[macro_use]
extern crate criterion;

use criterion::Criterion;
use packsim::catalog::Catalog;
use packsim::economy::{CopyTargets, Economy};
use packsim::pack::PackRules;
use packsim::simulation::{simulate_run, DEFAULT_MAX_PACKS};
use rand::prelude::*;
use rand::rngs::SmallRng;

fn criterion_function(c: &mut Criterion) {
    let catalog = Catalog::preset("heirs_of_the_omen").expect("heirs_of_the_omen preset");
    let economy = Economy::new();
    let rules = PackRules::new();
    let targets = CopyTargets::all(3);
    let mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("heirs_of_the_omen run_to_completion", |b| {
        b.iter(|| {
            simulate_run(
                &mut rng,
                catalog,
                &economy,
                &rules,
                &targets,
                DEFAULT_MAX_PACKS,
            )
            .expect("run converges")
        })
    });
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
