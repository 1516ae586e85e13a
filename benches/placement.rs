use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use snapgrid::{LayoutCache, Position, Rect, Size, Widget, find_available_position, resolve};

const CELL: u32 = 25;
const CONTAINER: Size = Size::new(1200, 800);

/// 2x2-cell widgets with scattered holes and a free band on the right.
fn dashboard() -> Vec<Widget> {
    let mut widgets = Vec::new();
    for row in 0..16u32 {
        for col in 0..20u32 {
            if (row + col) % 3 == 0 {
                continue;
            }
            widgets.push(Widget::new(
                format!("w{row}-{col}"),
                Rect::new(col * 2 * CELL, row * 2 * CELL, 2 * CELL, 2 * CELL),
            ));
        }
    }
    widgets
}

fn placement_search(c: &mut Criterion) {
    let widgets = dashboard();
    c.bench_function("find_available_position_dashboard", |b| {
        b.iter(|| {
            find_available_position(
                black_box(CONTAINER),
                black_box(Size::new(4 * CELL, 3 * CELL)),
                CELL,
                black_box(&widgets),
            )
            .expect("search")
        });
    });
}

fn shift_cascade(c: &mut Criterion) {
    let widgets = dashboard();
    let moving = Widget::new("moving", Rect::new(0, 0, 4 * CELL, 4 * CELL));
    c.bench_function("resolve_cascade_from_origin", |b| {
        b.iter(|| {
            resolve(
                black_box(&moving),
                Position::new(0, 0),
                black_box(&widgets),
                CONTAINER,
                CELL,
            )
            .expect("resolve")
        });
    });
}

fn cached_cascade(c: &mut Criterion) {
    let widgets = dashboard();
    let moving = Widget::new("moving", Rect::new(0, 0, 4 * CELL, 4 * CELL));
    let mut cache = LayoutCache::new();
    c.bench_function("resolve_cascade_cached", |b| {
        b.iter(|| {
            cache
                .resolve_cached(
                    black_box(&moving),
                    Position::new(0, 0),
                    black_box(&widgets),
                    CONTAINER,
                    CELL,
                )
                .expect("resolve")
        });
    });
}

criterion_group!(benches, placement_search, shift_cascade, cached_cascade);
criterion_main!(benches);
