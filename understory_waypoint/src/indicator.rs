// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;

/// Separations shorter than this use the fallback axis instead of normalizing.
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// A short arrow centered on a clamped screen point, aimed at the waypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indicator {
    /// Point the arrow straddles.
    pub anchor: DVec3,
    /// Unit direction from the tail toward the head.
    pub direction: DVec3,
    /// Distance from the anchor to each end of the arrow.
    pub half_length: f64,
}

impl Indicator {
    /// Tail of the arrow.
    #[must_use]
    pub fn start(&self) -> DVec3 {
        self.anchor - self.direction * self.half_length
    }

    /// Head of the arrow.
    #[must_use]
    pub fn end(&self) -> DVec3 {
        self.anchor + self.direction * self.half_length
    }

    /// Tail and head, in that order.
    #[must_use]
    pub fn segment(&self) -> (DVec3, DVec3) {
        (self.start(), self.end())
    }
}

/// Builds an indicator at `anchor` pointing toward `target`.
///
/// When `target` is within [`DIRECTION_EPSILON`] of `anchor` there is no
/// meaningful direction and `fallback_axis` is used as given. Callers should
/// pass a unit vector there.
#[must_use]
pub fn make_indicator(
    anchor: DVec3,
    target: DVec3,
    half_length: f64,
    fallback_axis: DVec3,
) -> Indicator {
    let delta = target - anchor;
    let direction = if delta.length() < DIRECTION_EPSILON {
        fallback_axis
    } else {
        delta.normalize()
    };
    Indicator {
        anchor,
        direction,
        half_length,
    }
}
