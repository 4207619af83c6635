// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-space placement of an off-screen waypoint arrow.
//!
//! This is the window-space counterpart of the screen-plane clamps: a world
//! point is projected through a view/projection pair into device pixels
//! (y down), and when it falls outside the viewport the arrow is pinned to
//! the border of an inset rectangle along the ray from the viewport center.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use glam::{DMat4, DQuat, DVec3, DVec4};
use kurbo::{Point, Rect, Size};

/// Default arrow glyph size in pixels.
pub const DEFAULT_ARROW_SIZE: f64 = 60.0;

/// Default gap between the arrow and the viewport border, in pixels.
pub const DEFAULT_EDGE_MARGIN: f64 = 20.0;

/// Angular resolution of [`find_last_on_screen`], in radians.
pub const ARC_TOLERANCE: f64 = 0.001;

/// Clip-space `w` values closer to zero than this cannot be divided out.
const W_EPSILON: f64 = 1e-12;

/// A camera's view and projection matrices.
///
/// The projection is expected to map into OpenGL-style clip space, where
/// visible depths land in `[-1, 1]` after the perspective divide.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewProjection {
    /// World to camera transform.
    pub view: DMat4,
    /// Camera to clip transform.
    pub projection: DMat4,
}

impl ViewProjection {
    /// Bundles a view and a projection matrix.
    #[must_use]
    pub const fn new(view: DMat4, projection: DMat4) -> Self {
        Self { view, projection }
    }

    /// Returns `projection * view`.
    #[must_use]
    pub fn combined(&self) -> DMat4 {
        self.projection * self.view
    }
}

/// A point in device pixels plus its normalized depth.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPosition {
    /// Position in pixels, origin at the top left, y down.
    pub point: Point,
    /// Normalized device depth; visible points lie in `[-1, 1]`.
    pub depth: f64,
}

impl ScreenPosition {
    /// Returns `true` if the point is outside the viewport or the depth range.
    ///
    /// The viewport edges count as on screen.
    #[must_use]
    pub fn is_off_screen(&self, viewport: Size) -> bool {
        let Point { x, y } = self.point;
        !(-1.0..=1.0).contains(&self.depth)
            || x < 0.0
            || x > viewport.width
            || y < 0.0
            || y > viewport.height
    }
}

/// Projects `world` into device pixels for a viewport of size `viewport`.
///
/// Points on the camera plane (clip `w` of zero) have no screen position; they
/// are reported at the viewport center with infinite depth, which is always
/// off screen.
#[must_use]
pub fn world_to_screen(world: DVec3, camera: &ViewProjection, viewport: Size) -> ScreenPosition {
    let clip = camera.combined() * DVec4::new(world.x, world.y, world.z, 1.0);
    if clip.w.abs() < W_EPSILON {
        return ScreenPosition {
            point: viewport.to_rect().center(),
            depth: f64::INFINITY,
        };
    }
    let ndc = clip / clip.w;
    ScreenPosition {
        point: Point::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ),
        depth: ndc.z,
    }
}

/// Where and how to draw the waypoint arrow.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudPlacement {
    /// Arrow center in pixels.
    pub position: Point,
    /// Arrow rotation in radians.
    pub rotation: f64,
    /// Whether the waypoint itself is off screen.
    pub off_screen: bool,
}

/// Viewport size and arrow inset used to pin off-screen arrows.
///
/// The arrow is kept `arrow_size / 2 + margin` pixels away from every border
/// so the whole glyph stays visible.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudLayout {
    viewport: Size,
    arrow_size: f64,
    margin: f64,
}

impl HudLayout {
    /// Creates a layout for `viewport` with the default arrow size and margin.
    #[must_use]
    pub const fn new(viewport: Size) -> Self {
        Self {
            viewport,
            arrow_size: DEFAULT_ARROW_SIZE,
            margin: DEFAULT_EDGE_MARGIN,
        }
    }

    /// Returns a copy with a different arrow size.
    #[must_use]
    pub const fn with_arrow_size(mut self, arrow_size: f64) -> Self {
        self.arrow_size = arrow_size;
        self
    }

    /// Returns a copy with a different border margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the viewport size, for example after a window resize.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Viewport size in pixels.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Distance from each border to the arrow center when pinned.
    #[must_use]
    pub fn pad(&self) -> f64 {
        self.arrow_size * 0.5 + self.margin
    }

    /// Rectangle that pinned arrow centers lie on.
    #[must_use]
    pub fn padded_rect(&self) -> Rect {
        let pad = self.pad();
        Rect::new(
            pad,
            pad,
            self.viewport.width - pad,
            self.viewport.height - pad,
        )
    }

    /// Places the arrow for a projected waypoint.
    ///
    /// On-screen positions are used as is, unrotated. Otherwise the arrow is
    /// moved to the nearest crossing of the ray from the viewport center
    /// toward `pos` with the padded rectangle, and rotated along that ray. If
    /// the ray has no crossing (for example `pos` is the center itself), the
    /// arrow sits at the center.
    #[must_use]
    pub fn place(&self, pos: ScreenPosition) -> HudPlacement {
        if !pos.is_off_screen(self.viewport) {
            return HudPlacement {
                position: pos.point,
                rotation: 0.0,
                off_screen: false,
            };
        }

        let center = self.viewport.to_rect().center();
        let d = pos.point - center;
        let rect = self.padded_rect();
        let mut best: Option<(f64, Point)> = None;
        let mut consider = |t: f64, p: Point| {
            if t > 0.0 && best.is_none_or(|(best_t, _)| t < best_t) {
                best = Some((t, p));
            }
        };

        if d.x != 0.0 {
            for edge_x in [rect.x1, rect.x0] {
                let t = (edge_x - center.x) / d.x;
                let y = center.y + d.y * t;
                if y >= rect.y0 && y <= rect.y1 {
                    consider(t, Point::new(edge_x, y));
                }
            }
        }
        if d.y != 0.0 {
            for edge_y in [rect.y1, rect.y0] {
                let t = (edge_y - center.y) / d.y;
                let x = center.x + d.x * t;
                if x >= rect.x0 && x <= rect.x1 {
                    consider(t, Point::new(x, edge_y));
                }
            }
        }

        HudPlacement {
            position: best.map_or(center, |(_, p)| p),
            rotation: d.y.atan2(d.x),
            off_screen: true,
        }
    }
}

/// Finds the on-screen point closest to the waypoint along the arc from the
/// camera's forward direction toward it.
///
/// Directions are rotated from `forward` toward the waypoint and tested at the
/// waypoint's distance from the camera; the largest rotation that still
/// projects on screen (to within [`ARC_TOLERANCE`]) wins. The returned
/// rotation is measured from the viewport center with y pointing up.
///
/// A zero `forward` or a waypoint at the camera yields the viewport center.
#[must_use]
pub fn find_last_on_screen(
    camera_pos: DVec3,
    forward: DVec3,
    waypoint: DVec3,
    camera: &ViewProjection,
    viewport: Size,
) -> HudPlacement {
    let center = viewport.to_rect().center();
    let off_screen = world_to_screen(waypoint, camera, viewport).is_off_screen(viewport);
    let (Some(start), Some(end)) = (
        forward.try_normalize(),
        (waypoint - camera_pos).try_normalize(),
    ) else {
        return HudPlacement {
            position: center,
            rotation: 0.0,
            off_screen,
        };
    };

    let dist = waypoint.distance(camera_pos);
    let max_angle = start.dot(end).clamp(-1.0, 1.0).acos();
    let axis = start
        .cross(end)
        .try_normalize()
        .unwrap_or_else(|| start.any_orthonormal_vector());
    let project_at = |angle: f64| {
        let dir = DQuat::from_axis_angle(axis, angle) * start;
        world_to_screen(camera_pos + dir * dist, camera, viewport)
    };

    let mut low = 0.0;
    let mut high = max_angle;
    let mut best = 0.0;
    while high - low > ARC_TOLERANCE {
        let mid = (low + high) * 0.5;
        if project_at(mid).is_off_screen(viewport) {
            high = mid;
        } else {
            low = mid;
            best = mid;
        }
    }

    let position = project_at(best).point;
    HudPlacement {
        position,
        rotation: (center.y - position.y).atan2(position.x - center.x),
        off_screen,
    }
}
