use blockgrid::model::{Block, LayoutConfig};
use blockgrid::pipeline::layout;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rustc_hash::FxHashMap;
use std::hint::black_box;
use std::time::Duration;

/// Synthetic control-flow graph shaped like compiled code: mostly fallthrough chains with
/// conditional branches that reconverge a few blocks later, plus the occasional back edge.
fn build_cfg(block_count: u64, branch_every: u64, loop_every: u64) -> FxHashMap<u64, Block> {
    let mut blocks: FxHashMap<u64, Block> = FxHashMap::default();
    for id in 0..block_count {
        let mut targets: Vec<u64> = Vec::new();
        if id + 1 < block_count {
            targets.push(id + 1);
        }
        // A conditional jump skipping two blocks ahead, merging back into the chain.
        if branch_every != 0 && id % branch_every == 0 && id + 3 < block_count {
            targets.push(id + 3);
        }
        // A back edge forming a loop.
        if loop_every != 0 && id % loop_every == loop_every - 1 && id >= 4 {
            targets.push(id - 4);
        }
        let width = 80 + (id % 7) as i32 * 20;
        let height = 30 + (id % 5) as i32 * 15;
        blocks.insert(id, Block::new(width, height, targets));
    }
    blocks
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("cfg_50", 50u64),
        ("cfg_250", 250u64),
        ("cfg_1000", 1000u64),
    ];
    let config = LayoutConfig::default();

    for (name, block_count) in cases {
        let blocks = build_cfg(block_count, 5, 17);
        group.bench_with_input(BenchmarkId::new("layout", name), &blocks, |b, blocks| {
            b.iter_batched(
                || blocks.clone(),
                |mut blocks| {
                    let size = layout(black_box(&mut blocks), 0, &config).unwrap();
                    black_box(size);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
