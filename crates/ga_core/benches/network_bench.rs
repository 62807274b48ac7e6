use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ga_core::clubs::Fixture;
use ga_core::config::AnalysisConfig;
use ga_core::models::{MinuteWindow, RawEvent, TeamId, TeamRef};
use ga_core::network::build_passing_network;
use ga_core::positional::build_positional_map;
use ga_core::preprocess::{preprocess_match, PreparedMatch};

const HOME: u32 = 26;
const AWAY: u32 = 32;

/// Synthetic match: alternating possession spells of short passing chains.
fn synthetic_match(events: usize) -> PreparedMatch {
    let rows: Vec<RawEvent> = (0..events)
        .map(|i| {
            let team = if (i / 8) % 2 == 0 { HOME } else { AWAY };
            let player = (i % 11) as u64 + if team == HOME { 0 } else { 100 };
            let x = (i * 37 % 100) as f64;
            let y = (i * 53 % 100) as f64;
            RawEvent::new(team, "Pass", (i * 95 / events) as u32, x, y)
                .with_player(player, &format!("P{}", player))
                .with_outcome(i % 5 != 0)
                .with_end((x + 10.0).min(100.0), y)
        })
        .collect();

    let fixture = Fixture::new(
        TeamRef {
            team_id: TeamId(HOME),
            name: "Home".to_string(),
        },
        TeamRef {
            team_id: TeamId(AWAY),
            name: "Away".to_string(),
        },
    );
    preprocess_match(&rows, &fixture, None, &AnalysisConfig::default()).expect("synthetic match")
}

fn bench_network(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let mut group = c.benchmark_group("passing_network");

    for &events in &[500usize, 1_500, 3_000] {
        let prepared = synthetic_match(events);
        let window = MinuteWindow::full_match(prepared.max_minute() + 1);
        group.throughput(Throughput::Elements(events as u64));
        group.bench_with_input(BenchmarkId::from_parameter(events), &prepared, |b, prepared| {
            b.iter(|| build_passing_network(black_box(prepared), window, &config))
        });
    }
    group.finish();
}

fn bench_positional(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let prepared = synthetic_match(1_500);
    let window = MinuteWindow::full_match(prepared.max_minute() + 1);

    c.bench_function("positional_map_1500", |b| {
        b.iter(|| build_positional_map(black_box(&prepared), window, &config))
    });
}

criterion_group!(benches, bench_network, bench_positional);
criterion_main!(benches);
