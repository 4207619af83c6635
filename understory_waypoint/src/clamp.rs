// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Policies for pulling a raw plane hit back inside the visible square.
//!
//! Both policies keep the X coordinate of the input and only touch the two
//! in-plane coordinates. They differ in what they preserve:
//!
//! - [`clamp_rect`] bounds Y and Z independently. Points far off a corner end
//!   up exactly on that corner, which bends the direction from the center.
//! - [`clamp_edge`] shrinks the offset from the center uniformly, so the
//!   clamped point stays on the line from the center to the raw hit.

use glam::DVec3;

use crate::Screen;

/// In-plane offsets below this are treated as zero by the ray-edge policies.
pub const CENTER_EPSILON: f64 = 1e-9;

/// How a raw plane hit is brought inside the screen bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClampPolicy {
    /// Clip each in-plane coordinate to `[-half_size, half_size]`.
    #[default]
    Rectangular,
    /// Scale the offset from the screen center until it fits the square.
    RayEdge,
}

impl ClampPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 2] = [Self::Rectangular, Self::RayEdge];

    /// Clamps `raw` into `screen` using this policy.
    #[must_use]
    pub fn apply(self, raw: DVec3, screen: &Screen) -> DVec3 {
        match self {
            Self::Rectangular => clamp_rect(raw, screen.half_size),
            Self::RayEdge => clamp_edge(raw, screen.center(), screen.half_size),
        }
    }
}

/// Clips the Y and Z coordinates of `raw` to `[-half_size, half_size]`.
///
/// The X coordinate passes through unchanged.
#[must_use]
pub fn clamp_rect(raw: DVec3, half_size: f64) -> DVec3 {
    DVec3::new(
        raw.x,
        clip(raw.y, -half_size, half_size),
        clip(raw.z, -half_size, half_size),
    )
}

/// Moves `raw` toward `center` until it lies within the square of half extent
/// `half_size` around `center`.
///
/// The result is `center + s * (raw - center)` with `s` in `(0, 1]`. Points
/// already inside the square (boundary included) are returned unchanged. When
/// `raw` coincides with `center`, `center` is returned.
///
/// The coordinate that binds lands exactly on `center ± half_size`, so the
/// result always passes the inside test and a second call returns it as is.
/// An infinite in-plane offset lands where the limiting direction meets the
/// boundary.
#[must_use]
pub fn clamp_edge(raw: DVec3, center: DVec3, half_size: f64) -> DVec3 {
    if is_centered(raw - center) {
        return center;
    }
    if inside(raw, center, half_size) {
        return raw;
    }
    edge_point(raw, center, half_size)
}

/// Moves `raw` along the line from `center` until it touches the square
/// boundary, whether it started inside or outside.
///
/// Unlike [`clamp_edge`] this never leaves a point in the interior: in-bounds
/// points are pushed outward onto the edge. It is useful for indicators that
/// should always sit on the border of the screen.
#[must_use]
pub fn snap_to_edge(raw: DVec3, center: DVec3, half_size: f64) -> DVec3 {
    if is_centered(raw - center) {
        return center;
    }
    edge_point(raw, center, half_size)
}

fn is_centered(d: DVec3) -> bool {
    d.y.abs() < CENTER_EPSILON && d.z.abs() < CENTER_EPSILON
}

fn inside(p: DVec3, center: DVec3, half_size: f64) -> bool {
    let in_range = |v: f64, c: f64| v >= c - half_size && v <= c + half_size;
    in_range(p.y, center.y) && in_range(p.z, center.z)
}

/// Puts the offset of `raw` from `center` on the nearer boundary.
///
/// The dominant axis is written as `±half_size` directly and the other one is
/// clipped, which keeps rounding from leaving the square.
fn edge_point(raw: DVec3, center: DVec3, half_size: f64) -> DVec3 {
    let d = raw - center;
    let (dy, dz) = (d.y.abs(), d.z.abs());
    let (x, y, z) = if dy.is_infinite() || dz.is_infinite() {
        let limit = |v: f64| {
            if v.is_infinite() {
                v.signum() * half_size
            } else {
                0.0
            }
        };
        (0.0, limit(d.y), limit(d.z))
    } else if dy >= dz {
        let s = half_size / dy;
        (d.x * s, d.y.signum() * half_size, d.z * s)
    } else {
        let s = half_size / dz;
        (d.x * s, d.y * s, d.z.signum() * half_size)
    };
    DVec3::new(
        center.x + x,
        clip(center.y + y, center.y - half_size, center.y + half_size),
        clip(center.z + z, center.z - half_size, center.z + half_size),
    )
}

// `f64::clamp` panics on inverted bounds; this stays total.
fn clip(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::DVec3;

    use super::{ClampPolicy, clamp_edge, clamp_rect, snap_to_edge};
    use crate::Screen;

    const CENTER: DVec3 = DVec3::new(5.0, 0.0, 0.0);

    fn samples() -> impl Iterator<Item = DVec3> {
        let coords = [-9.0, -2.5, -2.0, -0.3, 0.0, 0.7, 2.0, 3.1, 40.0];
        coords
            .into_iter()
            .flat_map(move |y| coords.into_iter().map(move |z| DVec3::new(5.0, y, z)))
    }

    #[test]
    fn rect_keeps_depth_and_bounds_plane_coordinates() {
        for raw in samples() {
            let c = clamp_rect(raw, 2.0);
            assert_eq!(c.x, raw.x);
            assert!(c.y.abs() <= 2.0 && c.z.abs() <= 2.0, "{c:?} escaped the square");
        }
    }

    #[test]
    fn rect_pulls_to_corner() {
        assert_eq!(clamp_rect(DVec3::new(5.0, 4.0, 4.0), 2.0), DVec3::new(5.0, 2.0, 2.0));
        assert_eq!(clamp_rect(DVec3::new(5.0, 4.0, 1.0), 2.0), DVec3::new(5.0, 2.0, 1.0));
        assert_eq!(
            clamp_rect(DVec3::new(5.0, -7.0, -0.5), 2.0),
            DVec3::new(5.0, -2.0, -0.5)
        );
    }

    #[test]
    fn rect_is_idempotent() {
        for raw in samples() {
            let once = clamp_rect(raw, 2.0);
            assert_eq!(clamp_rect(once, 2.0), once);
        }
    }

    #[test]
    fn edge_bounds_plane_coordinates() {
        for raw in samples() {
            let c = clamp_edge(raw, CENTER, 2.0);
            assert!(c.y.abs() <= 2.0 && c.z.abs() <= 2.0, "{c:?} escaped the square");
        }
    }

    #[test]
    fn edge_leaves_inside_points_alone() {
        for raw in samples().filter(|p| p.y.abs() <= 2.0 && p.z.abs() <= 2.0) {
            assert_eq!(clamp_edge(raw, CENTER, 2.0), raw);
        }
        // On the boundary the scale is exactly one.
        let edge = DVec3::new(5.0, 2.0, -1.0);
        assert_eq!(clamp_edge(edge, CENTER, 2.0), edge);
    }

    #[test]
    fn edge_preserves_direction_from_center() {
        for raw in samples().filter(|p| p.y.abs() > 2.0 || p.z.abs() > 2.0) {
            let d = raw - CENTER;
            let c = clamp_edge(raw, CENTER, 2.0) - CENTER;
            // Parallel and pointing the same way.
            assert_abs_diff_eq!(d.cross(c).length(), 0.0, epsilon = 1e-9);
            assert!(d.dot(c) > 0.0, "{raw:?} flipped direction");
            assert!(c.length() < d.length(), "{raw:?} was not shortened");
            // Touches the boundary.
            assert_eq!(c.y.abs().max(c.z.abs()), 2.0);
        }
    }

    #[test]
    fn edge_is_idempotent() {
        for raw in samples() {
            let once = clamp_edge(raw, CENTER, 2.0);
            assert_eq!(clamp_edge(once, CENTER, 2.0), once);
        }
    }

    #[test]
    fn edge_scales_by_nearer_boundary() {
        assert_eq!(
            clamp_edge(DVec3::new(5.0, 4.0, 0.0), CENTER, 2.0),
            DVec3::new(5.0, 2.0, 0.0)
        );
        assert_eq!(
            clamp_edge(DVec3::new(5.0, 4.0, 4.0), CENTER, 2.0),
            DVec3::new(5.0, 2.0, 2.0)
        );
        assert_eq!(
            clamp_edge(DVec3::new(5.0, 4.0, 1.0), CENTER, 2.0),
            DVec3::new(5.0, 2.0, 0.5)
        );
    }

    #[test]
    fn edge_lands_exactly_on_boundary_near_the_square() {
        // Points just outside the square, where `h / d` rounds up.
        let clamps: [fn(DVec3, DVec3, f64) -> DVec3; 2] = [clamp_edge, snap_to_edge];
        for half_size in [2.0, 0.3, 1.7, 3.3] {
            let center = DVec3::new(5.0, 0.0, 0.0);
            for i in 1..=200 {
                let over = half_size * (1.0 + f64::from(i) * 0.0037);
                for j in -20..=20 {
                    let across = half_size * f64::from(j) / 20.0;
                    for raw in [
                        DVec3::new(5.0, over, across),
                        DVec3::new(5.0, -over, across),
                        DVec3::new(5.0, across, over),
                        DVec3::new(5.0, across, -over),
                    ] {
                        for clamp in clamps {
                            let c = clamp(raw, center, half_size);
                            assert!(
                                c.y.abs() <= half_size && c.z.abs() <= half_size,
                                "{raw:?} -> {c:?} escaped h={half_size}"
                            );
                            assert_eq!(c.y.abs().max(c.z.abs()), half_size);
                            assert_eq!(clamp_edge(c, center, half_size), c);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn edge_handles_infinite_offsets() {
        assert_eq!(
            clamp_edge(DVec3::new(5.0, f64::INFINITY, 1.0), CENTER, 2.0),
            DVec3::new(5.0, 2.0, 0.0)
        );
        assert_eq!(
            clamp_edge(DVec3::new(5.0, -3.0, f64::NEG_INFINITY), CENTER, 2.0),
            DVec3::new(5.0, 0.0, -2.0)
        );
        assert_eq!(
            snap_to_edge(
                DVec3::new(5.0, f64::NEG_INFINITY, f64::INFINITY),
                CENTER,
                2.0
            ),
            DVec3::new(5.0, -2.0, 2.0)
        );
    }

    #[test]
    fn edge_at_center_returns_center() {
        assert_eq!(clamp_edge(CENTER, CENTER, 2.0), CENTER);
        let nearly = CENTER + DVec3::new(0.0, 1e-10, -1e-10);
        assert_eq!(clamp_edge(nearly, CENTER, 2.0), CENTER);
        assert_eq!(snap_to_edge(nearly, CENTER, 2.0), CENTER);
    }

    #[test]
    fn edge_handles_offset_center() {
        let center = DVec3::new(5.0, 1.0, -1.0);
        let raw = DVec3::new(5.0, 1.0, -7.0);
        assert_eq!(clamp_edge(raw, center, 2.0), DVec3::new(5.0, 1.0, -3.0));
        let once = clamp_edge(DVec3::new(5.0, 9.3, 2.9), center, 2.0);
        assert!(once.y <= 3.0 && once.y >= -1.0 && once.z <= 1.0 && once.z >= -3.0);
        assert_eq!(clamp_edge(once, center, 2.0), once);
    }

    #[test]
    fn policies_diverge_off_axis() {
        let screen = Screen::new(5.0, 2.0);
        let raw = DVec3::new(5.0, 4.0, 1.0);
        let rect = ClampPolicy::Rectangular.apply(raw, &screen);
        let edge = ClampPolicy::RayEdge.apply(raw, &screen);
        assert_eq!(rect, DVec3::new(5.0, 2.0, 1.0));
        assert_eq!(edge, DVec3::new(5.0, 2.0, 0.5));
    }

    #[test]
    fn snap_pushes_inside_points_to_boundary() {
        // This is the behavior `clamp_edge` deliberately avoids.
        let raw = DVec3::new(5.0, 0.5, 0.25);
        assert_eq!(snap_to_edge(raw, CENTER, 2.0), DVec3::new(5.0, 2.0, 1.0));
        assert_eq!(clamp_edge(raw, CENTER, 2.0), raw);
    }

    #[test]
    fn snap_matches_edge_clamp_outside() {
        for raw in samples().filter(|p| p.y.abs() > 2.0 || p.z.abs() > 2.0) {
            assert_eq!(snap_to_edge(raw, CENTER, 2.0), clamp_edge(raw, CENTER, 2.0));
        }
    }
}
