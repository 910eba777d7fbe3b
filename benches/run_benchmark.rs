//! Benchmarks for complete runs and their building blocks.
//!
//! The full simulated run is the hot path of the `batch` command.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use boardroom::autoplay::simulate_run;
use boardroom::content::Content;
use boardroom::game::{create_deck_state, draw_cards, generate_map};
use boardroom::replay::replay;
use boardroom::RulesConfig;
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_single_run(c: &mut Criterion) {
    let content = Content::builtin();
    let rules = RulesConfig::default();

    c.bench_function("single_run_pm", |b| {
        b.iter(|| {
            let result = simulate_run(black_box(42), "pm", content, black_box(&rules));
            black_box(result)
        });
    });
}

fn bench_run_batch(c: &mut Criterion) {
    // 10 runs sequentially (without parallel overhead)
    let content = Content::builtin();
    let rules = RulesConfig::default();

    c.bench_function("10_runs_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = simulate_run(black_box(seed), "analyst", content, &rules);
                let _ = black_box(result);
            }
        });
    });
}

fn bench_replay(c: &mut Criterion) {
    let content = Content::builtin();
    let (_, recording) = simulate_run(7, "pm", content, &RulesConfig::default()).unwrap();

    c.bench_function("replay_run", |b| {
        b.iter(|| black_box(replay(content, black_box(&recording)).is_ok()));
    });
}

fn bench_map_generation(c: &mut Criterion) {
    let config = Content::builtin().map_config();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    c.bench_function("generate_map_8", |b| {
        b.iter(|| black_box(generate_map(black_box(8), config, &mut rng)));
    });
}

fn bench_draw(c: &mut Criterion) {
    let deck: Vec<String> = Content::builtin().class("pm").unwrap().starting_deck.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    c.bench_function("shuffle_and_draw_5", |b| {
        b.iter(|| {
            let state = create_deck_state(black_box(&deck), &mut rng);
            black_box(draw_cards(&state, 5, &mut rng))
        });
    });
}

criterion_group!(
    benches,
    bench_single_run,
    bench_run_batch,
    bench_replay,
    bench_map_generation,
    bench_draw
);
criterion_main!(benches);
