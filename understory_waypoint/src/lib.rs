// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_waypoint --heading-base-level=0

//! Understory Waypoint: keep a 3D waypoint visible on a screen.
//!
//! This crate answers one question for HUD-style overlays: given a camera, a
//! screen in front of it, and a waypoint somewhere in the world, where on the
//! screen should an indicator go, and which way should it point?
//!
//! The computation has three stages, each a pure function:
//! - [`project`] intersects the camera-to-waypoint line with the screen plane.
//! - [`clamp_rect`] or [`clamp_edge`] pulls that hit back inside the screen.
//!   [`ClampPolicy`] selects between them.
//! - [`make_indicator`] builds a short arrow at the clamped point aimed at the
//!   true waypoint.
//!
//! Every stage is total: parallel rays, points at the screen center and
//! zero-length directions all have defined fallbacks, so per-frame callers
//! never need error handling around them. Whether the waypoint is behind the
//! camera is reported separately by [`is_behind`].
//!
//! The screen is the plane `x = screen_x` for a camera looking along `+X`,
//! limited to the square `|y|, |z| <= half_size` (see [`Screen`]).
//!
//! It does **not** render anything. Callers are expected to:
//! - Sample a [`ScreenRig`] once per frame (or drive [`ScreenRig::frames`]).
//! - Draw the resulting [`RenderFrame`] with their own scene and styling.
//!
//! The [`hud`] module has the same idea in window pixels, for overlays drawn
//! on top of a perspective camera.
//!
//! ## Minimal example
//!
//! ```rust
//! use glam::DVec3;
//! use understory_waypoint::{ClampPolicy, Screen, make_indicator, project};
//!
//! let screen = Screen::new(5.0, 2.0);
//! let waypoint = DVec3::new(3.0, 2.0, 3.0);
//!
//! let raw = project(DVec3::ZERO, waypoint, screen.screen_x);
//! let clamped = ClampPolicy::Rectangular.apply(raw, &screen);
//! assert_eq!(clamped, DVec3::new(5.0, 2.0, 2.0));
//!
//! let arrow = make_indicator(clamped, waypoint, 0.5, DVec3::X);
//! let (tail, head) = arrow.segment();
//! assert!(head.distance(waypoint) < tail.distance(waypoint));
//! ```
//!
//! ## Sampling a moving waypoint
//!
//! ```rust
//! use understory_waypoint::{DEFAULT_FRAME_RATE, ExplainerPath, ScreenRig};
//!
//! let rig = ScreenRig::default();
//! let behind = rig
//!     .frames(&ExplainerPath, 0.0, 10.0, DEFAULT_FRAME_RATE)
//!     .filter(|frame| frame.behind)
//!     .count();
//! assert!(behind > 0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod clamp;
mod frame;
pub mod hud;
mod indicator;
mod project;
mod screen;

pub use clamp::{CENTER_EPSILON, ClampPolicy, clamp_edge, clamp_rect, snap_to_edge};
pub use frame::{
    DEFAULT_FRAME_RATE, DEFAULT_INDICATOR_HALF_LENGTH, ExplainerPath, Frames, RenderFrame,
    ScreenRig, StaticWaypoint, WaypointPath,
};
pub use indicator::{DIRECTION_EPSILON, Indicator, make_indicator};
pub use project::{ForwardSign, PARALLEL_EPSILON, Ray, is_behind, project};
pub use screen::Screen;
