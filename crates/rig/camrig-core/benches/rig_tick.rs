use camrig_core::{MemoryScene, Rig, RigConfig, SceneLookup};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build() -> (Rig, MemoryScene) {
    let scene = MemoryScene::from_json(
        &camrig_test_fixtures::scenes::json("stage").expect("stage fixture"),
    )
    .expect("scene parses");
    let cfg = RigConfig::from_json(
        &camrig_test_fixtures::rigs::json("follow-cam").expect("rig fixture"),
    )
    .expect("rig config parses");
    let rig = Rig::from_config(&cfg, &scene).expect("rig builds");
    (rig, scene)
}

fn bench_rig_tick(c: &mut Criterion) {
    let (mut rig, mut scene) = build();
    let hero = scene.find_by_name("Hero").expect("hero in stage");
    let mut t = 0.0f32;
    c.bench_function("rig_step_follow_cam", |b| {
        b.iter(|| {
            t += 0.016;
            scene.set_position(hero, [t.sin(), 0.0, 5.0 + t.cos()]);
            black_box(rig.step(&mut scene, black_box(0.016)));
        })
    });
}

criterion_group!(benches, bench_rig_tick);
criterion_main!(benches);
