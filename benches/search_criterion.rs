use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use mailbox_chess::game_state::game_state::GameState;
use mailbox_chess::search::board_scoring::{MaterialMobilityScorer, MaterialScorer};
use mailbox_chess::search::minimax::{search, SearchConfig, SearchLimits};

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
    ),
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let limits = SearchLimits::default();
    let mobility = MaterialMobilityScorer::default();

    for (name, fen) in POSITIONS {
        let game = GameState::from_fen(fen).expect("benchmark FEN should parse");

        // The root split must agree with the sequential search before timing it.
        let sequential = search(&game, &mobility, SearchConfig::with_depth(2), &limits);
        let parallel = search(
            &game,
            &mobility,
            SearchConfig {
                depth: 2,
                threads: 4,
            },
            &limits,
        );
        assert_eq!(sequential.best_move, parallel.best_move, "root split disagrees on {name}");

        for threads in [1usize, 4] {
            let config = SearchConfig { depth: 2, threads };
            group.bench_with_input(
                BenchmarkId::new(format!("{name}_mobility_d2"), threads),
                &config,
                |b, config| b.iter(|| black_box(search(black_box(&game), &mobility, *config, &limits))),
            );
        }

        let config = SearchConfig::with_depth(3);
        group.bench_with_input(
            BenchmarkId::new(format!("{name}_material_d3"), 1),
            &config,
            |b, config| b.iter(|| black_box(search(black_box(&game), &MaterialScorer, *config, &limits))),
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
