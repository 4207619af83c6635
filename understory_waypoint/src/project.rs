// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;

/// Below this X extent a ray is treated as parallel to the screen plane.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// A line through `origin` and `target`, parameterized as
/// `p(t) = origin + t * (target - origin)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// Point at `t = 0`, usually the camera.
    pub origin: DVec3,
    /// Point at `t = 1`, usually the waypoint.
    pub target: DVec3,
}

impl Ray {
    /// Creates a ray from `origin` through `target`.
    #[must_use]
    pub const fn new(origin: DVec3, target: DVec3) -> Self {
        Self { origin, target }
    }

    /// Returns `target - origin`.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        self.target - self.origin
    }

    /// Returns the point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction() * t
    }

    /// Returns the parameter where the ray crosses the plane `x = screen_x`.
    ///
    /// Returns `None` when the ray is parallel to the plane. The parameter is
    /// not restricted: negative values lie behind the origin and values above
    /// one lie beyond the target.
    #[must_use]
    pub fn plane_parameter(&self, screen_x: f64) -> Option<f64> {
        let v = self.direction();
        if v.x.abs() < PARALLEL_EPSILON {
            return None;
        }
        Some((screen_x - self.origin.x) / v.x)
    }

    /// Intersects the ray with the plane `x = screen_x`.
    ///
    /// See [`project`].
    #[must_use]
    pub fn project(&self, screen_x: f64) -> DVec3 {
        match self.plane_parameter(screen_x) {
            Some(t) => self.at(t),
            None => DVec3::new(screen_x, 0.0, 0.0),
        }
    }

    /// Returns `true` if the target lies behind the origin for a camera
    /// looking along `+X`.
    #[must_use]
    pub fn is_behind(&self) -> bool {
        is_behind(self.direction(), ForwardSign::Positive)
    }
}

/// Projects `target` onto the plane `x = screen_x` along the ray from `origin`.
///
/// The result always has `x == screen_x`. A ray parallel to the plane has no
/// intersection; in that case the plane center `(screen_x, 0, 0)` is returned
/// so callers never have to handle a missing point.
///
/// The intersection is not limited to the segment between the two points, so a
/// target behind the origin still produces a (mirrored) hit. Use [`is_behind`]
/// to detect that case.
#[must_use]
pub fn project(origin: DVec3, target: DVec3, screen_x: f64) -> DVec3 {
    Ray::new(origin, target).project(screen_x)
}

/// Which way along the X axis the camera looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForwardSign {
    /// The camera looks along `+X`.
    #[default]
    Positive,
    /// The camera looks along `-X`.
    Negative,
}

impl ForwardSign {
    /// Returns `1.0` or `-1.0`.
    #[must_use]
    pub const fn signum(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Returns `true` if `target`, expressed relative to the camera, lies behind it.
///
/// Only the forward (X) coordinate is inspected. A target exactly on the
/// camera plane is not behind.
#[must_use]
pub fn is_behind(target: DVec3, forward: ForwardSign) -> bool {
    target.x * forward.signum() < 0.0
}
