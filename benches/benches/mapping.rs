// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_touch_math` and the multitouch point mapper.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_multitouch::{Config, PointMapper, TransformController};
use understory_touch_math::{
    fit_rect_centered, map_point_between, vector_after_rotation, vector_before_rotation,
};

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_math");

    group.bench_function("vector_before_rotation", |b| {
        b.iter(|| {
            black_box(vector_before_rotation(
                black_box(150.0),
                black_box(60.0),
                100.0,
                100.0,
                37.0,
            ))
        });
    });

    group.bench_function("vector_after_rotation", |b| {
        b.iter(|| {
            black_box(vector_after_rotation(
                black_box(150.0),
                black_box(60.0),
                100.0,
                100.0,
                37.0,
            ))
        });
    });

    let src = Rect::new(-150.0, -75.0, 650.0, 525.0);
    let dst = Rect::new(0.0, 0.0, 400.0, 300.0);
    group.bench_function("fit_rect_centered", |b| {
        b.iter(|| black_box(fit_rect_centered(black_box(src), black_box(dst))));
    });
    group.bench_function("map_point_between", |b| {
        b.iter(|| {
            black_box(map_point_between(
                black_box(Point::new(40.0, 90.0)),
                src,
                dst,
            ))
        });
    });

    group.finish();
}

fn bench_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("multitouch/map_point");
    let frame = Size::new(1_080.0, 1_920.0);

    for scale in [1.0, 2.0, 4.0] {
        let mut controller = TransformController::new(Config::default().with_rotation(true));
        controller.bind(frame, frame);
        controller.set_scale(scale);
        controller.translate_by(Vec2::new(120.0, -80.0));
        controller.set_rotation(30.0);

        group.bench_with_input(
            BenchmarkId::new("unrotated", scale),
            &controller,
            |b, controller| {
                b.iter(|| black_box(controller.map_point(black_box(Point::new(300.0, 900.0)))));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rotated", scale),
            &controller,
            |b, controller| {
                b.iter(|| {
                    let p = controller
                        .point_before_rotation(black_box(Point::new(300.0, 900.0)), 30.0);
                    black_box(controller.map_point(p))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_kernel, bench_mapper);
criterion_main!(benches);
