// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame sampling of a moving waypoint.
//!
//! Nothing here carries state between frames. A [`ScreenRig`] holds the fixed
//! scene parameters and [`ScreenRig::sample`] recomputes every derived value
//! from the waypoint position at the requested time.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use glam::DVec3;

use crate::{ClampPolicy, Indicator, Ray, Screen, make_indicator};

/// Sampling rate used by the explainer scenes, in frames per second.
pub const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Default distance from an indicator's anchor to either end.
pub const DEFAULT_INDICATOR_HALF_LENGTH: f64 = 0.45;

/// A waypoint position as a function of time.
pub trait WaypointPath {
    /// Returns the waypoint position at `time`.
    fn position(&self, time: f64) -> DVec3;
}

impl<F> WaypointPath for F
where
    F: Fn(f64) -> DVec3,
{
    fn position(&self, time: f64) -> DVec3 {
        self(time)
    }
}

/// A waypoint that never moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticWaypoint(pub DVec3);

impl WaypointPath for StaticWaypoint {
    fn position(&self, _time: f64) -> DVec3 {
        self.0
    }
}

/// Looping path that swings in front of and behind a camera at the origin.
///
/// ```text
/// x = 3 + 4 cos(0.5 t)
/// y = 2.2 sin(0.9 t)
/// z = 2.8 sin(0.6 t + 0.7)
/// ```
///
/// X ranges over `[-1, 7]`, so the waypoint regularly crosses both the
/// default screen plane and the camera plane, while Y and Z overshoot the
/// default `half_size` of 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExplainerPath;

impl WaypointPath for ExplainerPath {
    fn position(&self, time: f64) -> DVec3 {
        DVec3::new(
            3.0 + 4.0 * (time * 0.5).cos(),
            2.2 * (time * 0.9).sin(),
            2.8 * (time * 0.6 + 0.7).sin(),
        )
    }
}

/// Fixed scene parameters for projecting a waypoint onto a screen plane.
///
/// Defaults: camera at the origin, [`Screen::default`], indicator half length
/// [`DEFAULT_INDICATOR_HALF_LENGTH`], fallback axis `+X`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRig {
    camera: DVec3,
    screen: Screen,
    indicator_half_length: f64,
    fallback_axis: DVec3,
}

impl Default for ScreenRig {
    fn default() -> Self {
        Self::new(Screen::default())
    }
}

impl ScreenRig {
    /// Creates a rig for `screen` with the remaining parameters at their defaults.
    #[must_use]
    pub const fn new(screen: Screen) -> Self {
        Self {
            camera: DVec3::ZERO,
            screen,
            indicator_half_length: DEFAULT_INDICATOR_HALF_LENGTH,
            fallback_axis: DVec3::X,
        }
    }

    /// Returns a copy with the camera placed at `camera`.
    #[must_use]
    pub const fn with_camera(mut self, camera: DVec3) -> Self {
        self.camera = camera;
        self
    }

    /// Returns a copy with a different indicator half length.
    #[must_use]
    pub const fn with_indicator_half_length(mut self, half_length: f64) -> Self {
        self.indicator_half_length = half_length;
        self
    }

    /// Returns a copy with a different fallback direction for indicators.
    ///
    /// The axis is used as given and should be a unit vector.
    #[must_use]
    pub const fn with_fallback_axis(mut self, axis: DVec3) -> Self {
        self.fallback_axis = axis;
        self
    }

    /// Camera position.
    #[must_use]
    pub const fn camera(&self) -> DVec3 {
        self.camera
    }

    /// Screen plane.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Indicator half length.
    #[must_use]
    pub const fn indicator_half_length(&self) -> f64 {
        self.indicator_half_length
    }

    /// Fallback indicator direction.
    #[must_use]
    pub const fn fallback_axis(&self) -> DVec3 {
        self.fallback_axis
    }

    /// Computes every derived value for `path` at `time`.
    #[must_use]
    pub fn sample<P: WaypointPath + ?Sized>(&self, path: &P, time: f64) -> RenderFrame {
        self.frame(time, path.position(time))
    }

    /// Computes every derived value for a waypoint at `waypoint`.
    #[must_use]
    pub fn frame(&self, time: f64, waypoint: DVec3) -> RenderFrame {
        let ray = Ray::new(self.camera, waypoint);
        let raw = ray.project(self.screen.screen_x);
        let rect_clamped = ClampPolicy::Rectangular.apply(raw, &self.screen);
        let edge_clamped = ClampPolicy::RayEdge.apply(raw, &self.screen);
        RenderFrame {
            time,
            waypoint,
            raw,
            rect_clamped,
            edge_clamped,
            rect_indicator: self.indicator(rect_clamped, waypoint),
            edge_indicator: self.indicator(edge_clamped, waypoint),
            behind: ray.is_behind(),
        }
    }

    /// Samples `path` at a fixed rate from `start` to `end` inclusive.
    ///
    /// Frame `i` is taken at `start + i / fps`. An `end` that falls on a frame
    /// time up to rounding still gets its frame, and no time exceeds `end`.
    /// The iterator is empty when
    /// `end < start`, either bound is not finite, or `fps` is not a finite
    /// positive number.
    pub fn frames<'a, P: WaypointPath + ?Sized>(
        &'a self,
        path: &'a P,
        start: f64,
        end: f64,
        fps: f64,
    ) -> Frames<'a, P> {
        let valid = fps.is_finite()
            && fps > 0.0
            && start.is_finite()
            && end.is_finite()
            && end >= start;
        let count = if valid {
            frame_count(end - start, fps)
        } else {
            0
        };
        Frames {
            rig: self,
            path,
            start,
            end,
            fps,
            next: 0,
            count,
        }
    }

    fn indicator(&self, anchor: DVec3, waypoint: DVec3) -> Indicator {
        make_indicator(
            anchor,
            waypoint,
            self.indicator_half_length,
            self.fallback_axis,
        )
    }
}

const FRAME_COUNT_EPSILON: f64 = 1e-9;

#[expect(
    clippy::cast_possible_truncation,
    reason = "span and rate are finite and non-negative; the cast saturates"
)]
fn frame_count(span: f64, fps: f64) -> usize {
    // `0.29 * 100.0` is just under 29.
    ((span * fps + FRAME_COUNT_EPSILON).floor() as usize).saturating_add(1)
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderFrame {
    /// Sample time.
    pub time: f64,
    /// True waypoint position.
    pub waypoint: DVec3,
    /// Unclamped hit of the camera-to-waypoint line on the screen plane.
    pub raw: DVec3,
    /// `raw` under [`ClampPolicy::Rectangular`].
    pub rect_clamped: DVec3,
    /// `raw` under [`ClampPolicy::RayEdge`].
    pub edge_clamped: DVec3,
    /// Indicator anchored at `rect_clamped`.
    pub rect_indicator: Indicator,
    /// Indicator anchored at `edge_clamped`.
    pub edge_indicator: Indicator,
    /// Whether the waypoint is behind the camera.
    pub behind: bool,
}

impl RenderFrame {
    /// Clamped point for `policy`.
    #[must_use]
    pub fn clamped(&self, policy: ClampPolicy) -> DVec3 {
        match policy {
            ClampPolicy::Rectangular => self.rect_clamped,
            ClampPolicy::RayEdge => self.edge_clamped,
        }
    }

    /// Indicator for `policy`.
    #[must_use]
    pub fn indicator(&self, policy: ClampPolicy) -> Indicator {
        match policy {
            ClampPolicy::Rectangular => self.rect_indicator,
            ClampPolicy::RayEdge => self.edge_indicator,
        }
    }
}

/// Iterator returned by [`ScreenRig::frames`].
#[derive(Debug)]
pub struct Frames<'a, P: ?Sized> {
    rig: &'a ScreenRig,
    path: &'a P,
    start: f64,
    end: f64,
    fps: f64,
    next: usize,
    count: usize,
}

impl<P: WaypointPath + ?Sized> Iterator for Frames<'_, P> {
    type Item = RenderFrame;

    fn next(&mut self) -> Option<RenderFrame> {
        if self.next >= self.count {
            return None;
        }
        let time = (self.start + self.next as f64 / self.fps).min(self.end);
        self.next += 1;
        Some(self.rig.sample(self.path, time))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<P: WaypointPath + ?Sized> ExactSizeIterator for Frames<'_, P> {}
