use criterion::{criterion_group, criterion_main, Criterion};
use verdant_lib::model::config::{AppConfig, ScheduleMode};
use verdant_lib::model::world::World;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for (name, mode) in [("full", ScheduleMode::Full), ("static", ScheduleMode::Static)] {
        let mut config = AppConfig::default();
        config.world.width = 96;
        config.world.height = 96;
        config.world.seed = 11;
        config.world.mode = mode;
        config.rabbit.count = 300;
        config.wolf.count = 30;
        let mut world = World::new(config).expect("bench world");
        group.bench_function(name, |b| b.iter(|| world.tick()));
    }
    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
