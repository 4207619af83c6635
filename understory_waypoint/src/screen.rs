// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;

/// A square screen plane perpendicular to the X axis.
///
/// The plane sits at `x = screen_x` in front of a camera looking along `+X`.
/// Its visible region is the square `[-half_size, half_size]` on both the Y
/// and Z axes, centered on the point where the X axis pierces the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    /// Offset of the plane along the X axis.
    pub screen_x: f64,
    /// Half of the side length of the visible square.
    pub half_size: f64,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(5.0, 2.0)
    }
}

impl Screen {
    /// Creates a screen plane at `x = screen_x` spanning `[-half_size, half_size]`.
    #[must_use]
    pub const fn new(screen_x: f64, half_size: f64) -> Self {
        Self {
            screen_x,
            half_size,
        }
    }

    /// Returns a copy with a different plane offset.
    #[must_use]
    pub const fn with_screen_x(mut self, screen_x: f64) -> Self {
        self.screen_x = screen_x;
        self
    }

    /// Returns a copy with a different half extent.
    #[must_use]
    pub const fn with_half_size(mut self, half_size: f64) -> Self {
        self.half_size = half_size;
        self
    }

    /// Returns the point where the X axis meets the plane.
    #[must_use]
    pub const fn center(&self) -> DVec3 {
        DVec3::new(self.screen_x, 0.0, 0.0)
    }

    /// Returns the four corners of the visible square.
    ///
    /// Corners are ordered `(+h, +h)`, `(+h, -h)`, `(-h, -h)`, `(-h, +h)` in
    /// `(y, z)`, which traces the outline without crossing itself.
    #[must_use]
    pub const fn corners(&self) -> [DVec3; 4] {
        let x = self.screen_x;
        let h = self.half_size;
        [
            DVec3::new(x, h, h),
            DVec3::new(x, h, -h),
            DVec3::new(x, -h, -h),
            DVec3::new(x, -h, h),
        ]
    }

    /// Returns `true` if the in-plane coordinates of `p` lie within the square.
    ///
    /// The boundary counts as inside. The X coordinate is ignored.
    #[must_use]
    pub fn contains(&self, p: DVec3) -> bool {
        p.y.abs() <= self.half_size && p.z.abs() <= self.half_size
    }
}
