// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture throughput: raw pointer streams through a `MultiTouchFrame`.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size};
use understory_gesture::{PointerAction, PointerEvent, RecognizerConfig};
use understory_multitouch::{Config, MultiTouchFrame};

const FRAME: Size = Size::new(1_080.0, 1_920.0);

fn frame() -> MultiTouchFrame {
    let mut frame = MultiTouchFrame::new(Config::default().with_rotation(true))
        .with_fallback_recognizer(RecognizerConfig::default());
    frame.bind(FRAME, FRAME);
    frame.set_scale(2.0);
    frame
}

/// One finger down, `moves` moves along a diagonal, up.
fn drag_stream(moves: usize) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(moves + 2);
    events.push(
        PointerEvent::new(PointerAction::Down, 0).with_pointer(0, Point::new(500.0, 900.0)),
    );
    for i in 1..=moves {
        let d = i as f64;
        events.push(
            PointerEvent::new(PointerAction::Move, i as u64 * 8)
                .with_pointer(0, Point::new(500.0 + d, 900.0 + d)),
        );
    }
    events.push(
        PointerEvent::new(PointerAction::Up, (moves as u64 + 1) * 8)
            .with_pointer(0, Point::new(500.0 + moves as f64, 900.0 + moves as f64)),
    );
    events
}

/// Two fingers down, the second circling the first.
fn rotate_stream(moves: usize) -> Vec<PointerEvent> {
    let center = Point::new(540.0, 960.0);
    let at = |i: usize| {
        let a = (i as f64).to_radians();
        center + 200.0 * kurbo::Vec2::new(a.cos(), a.sin())
    };
    let mut events = Vec::with_capacity(moves + 2);
    events.push(PointerEvent::new(PointerAction::Down, 0).with_pointer(0, center));
    events.push(
        PointerEvent::new(PointerAction::PointerDown, 4)
            .with_pointer(0, center)
            .with_pointer(1, at(0))
            .with_action_index(1),
    );
    for i in 1..=moves {
        events.push(
            PointerEvent::new(PointerAction::Move, i as u64 * 8)
                .with_pointer(0, center)
                .with_pointer(1, at(i)),
        );
    }
    events
}

fn bench_streams(c: &mut Criterion) {
    let mut group = c.benchmark_group("multitouch/handle_pointer");

    for moves in [16usize, 128, 1_024] {
        group.throughput(Throughput::Elements(moves as u64));

        let drag = drag_stream(moves);
        group.bench_with_input(BenchmarkId::new("drag", moves), &drag, |b, events| {
            b.iter_batched(
                frame,
                |mut frame| {
                    for event in events {
                        frame.handle_pointer(event);
                    }
                    black_box(frame.current_translation());
                },
                BatchSize::SmallInput,
            );
        });

        let rotate = rotate_stream(moves);
        group.bench_with_input(BenchmarkId::new("rotate", moves), &rotate, |b, events| {
            b.iter_batched(
                frame,
                |mut frame| {
                    for event in events {
                        frame.handle_pointer(event);
                    }
                    black_box(frame.current_rotation());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_animation(c: &mut Criterion) {
    c.bench_function("multitouch/zoom_in_animation", |b| {
        b.iter_batched(
            || {
                let mut frame = MultiTouchFrame::new(Config::default());
                frame.bind(FRAME, FRAME);
                frame.on_double_tap(Point::new(300.0, 400.0));
                frame
            },
            |mut frame| {
                while frame.advance_animation(16) {}
                black_box(frame.current_scale());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_streams, bench_animation);
criterion_main!(benches);
