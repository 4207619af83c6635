// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::{DMat4, DVec3};
use kurbo::Size;
use understory_waypoint::hud::{HudLayout, ViewProjection, find_last_on_screen, world_to_screen};
use understory_waypoint::{
    ClampPolicy, DEFAULT_FRAME_RATE, ExplainerPath, Screen, ScreenRig, WaypointPath, project,
};

fn waypoints(len: usize) -> Vec<DVec3> {
    (0..len)
        .map(|i| ExplainerPath.position(i as f64 / DEFAULT_FRAME_RATE))
        .collect()
}

fn bench_clamp_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("waypoint/clamp");
    let screen = Screen::default();
    let raws: Vec<DVec3> = waypoints(4_096)
        .into_iter()
        .map(|w| project(DVec3::ZERO, w, screen.screen_x))
        .collect();
    group.throughput(Throughput::Elements(raws.len() as u64));

    for policy in ClampPolicy::ALL {
        group.bench_with_input(
            BenchmarkId::new(format!("{policy:?}"), raws.len()),
            &raws,
            |b, raws| {
                b.iter(|| {
                    for &raw in raws {
                        black_box(policy.apply(raw, &screen));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_frame_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("waypoint/frames");
    let rig = ScreenRig::default();

    // Hypothesis: a full frame is a handful of vector ops, so a minute of
    // 60 fps animation should sample well under a millisecond.
    for seconds in [1.0_f64, 10.0, 60.0] {
        let len = rig
            .frames(&ExplainerPath, 0.0, seconds, DEFAULT_FRAME_RATE)
            .len();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("explainer", len), &seconds, |b, &s| {
            b.iter(|| {
                for frame in rig.frames(&ExplainerPath, 0.0, s, DEFAULT_FRAME_RATE) {
                    black_box(frame);
                }
            });
        });
    }
    group.finish();
}

fn bench_hud_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("waypoint/hud");
    let viewport = Size::new(1920.0, 1080.0);
    let eye = DVec3::new(0.0, 1.0, 5.0);
    let camera = ViewProjection::new(
        DMat4::look_at_rh(eye, DVec3::ZERO, DVec3::Y),
        DMat4::perspective_rh_gl(75_f64.to_radians(), 1920.0 / 1080.0, 0.1, 500.0),
    );
    let layout = HudLayout::new(viewport);
    let points: Vec<DVec3> = waypoints(1_024).into_iter().map(|w| w * 10.0).collect();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_with_input(BenchmarkId::new("place", points.len()), &points, |b, pts| {
        b.iter(|| {
            for &p in pts {
                black_box(layout.place(world_to_screen(p, &camera, viewport)));
            }
        });
    });
    group.bench_with_input(
        BenchmarkId::new("find_last_on_screen", points.len()),
        &points,
        |b, pts| {
            b.iter(|| {
                for &p in pts {
                    black_box(find_last_on_screen(eye, DVec3::NEG_Z, p, &camera, viewport));
                }
            });
        },
    );
    group.finish();
}

criterion_group!(
    benches,
    bench_clamp_policies,
    bench_frame_sampling,
    bench_hud_placement
);
criterion_main!(benches);
