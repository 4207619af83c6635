// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use understory_waypoint::{
    DEFAULT_FRAME_RATE, DEFAULT_INDICATOR_HALF_LENGTH, ExplainerPath, Screen, ScreenRig,
    StaticWaypoint, WaypointPath,
};

use crate::error::{DemoError, DemoResult};

/// Which waypoint motion to sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum PathConfig {
    /// The looping explainer path.
    #[default]
    Explainer,
    /// A waypoint fixed at `position`.
    Static { position: DVec3 },
}

impl WaypointPath for PathConfig {
    fn position(&self, time: f64) -> DVec3 {
        match self {
            Self::Explainer => ExplainerPath.position(time),
            Self::Static { position } => StaticWaypoint(*position).position(time),
        }
    }
}

/// Scene file contents. Missing fields take the explainer scene defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SceneConfig {
    pub(crate) screen: Screen,
    pub(crate) camera: DVec3,
    pub(crate) indicator_half_length: f64,
    pub(crate) path: PathConfig,
    pub(crate) start: f64,
    pub(crate) end: f64,
    pub(crate) fps: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            camera: DVec3::ZERO,
            indicator_half_length: DEFAULT_INDICATOR_HALF_LENGTH,
            path: PathConfig::default(),
            start: 0.0,
            end: 3.0 * core::f64::consts::PI,
            fps: DEFAULT_FRAME_RATE,
        }
    }
}

impl SceneConfig {
    /// Reads a scene from a JSON file.
    pub(crate) fn load(path: &Path) -> DemoResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| DemoError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DemoError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects parameters the sampler would turn into garbage.
    pub(crate) fn validate(&self) -> DemoResult<()> {
        let scalars = [
            ("screen_x", self.screen.screen_x),
            ("half_size", self.screen.half_size),
            ("indicator_half_length", self.indicator_half_length),
            ("start", self.start),
            ("end", self.end),
            ("fps", self.fps),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(DemoError::invalid_scene(format!("{name} must be finite")));
            }
        }
        if !self.camera.is_finite() {
            return Err(DemoError::invalid_scene("camera must be finite"));
        }
        if let PathConfig::Static { position } = self.path
            && !position.is_finite()
        {
            return Err(DemoError::invalid_scene("waypoint position must be finite"));
        }
        if self.screen.half_size <= 0.0 {
            return Err(DemoError::invalid_scene("half_size must be positive"));
        }
        if self.fps <= 0.0 {
            return Err(DemoError::invalid_scene("fps must be positive"));
        }
        if self.end < self.start {
            return Err(DemoError::invalid_scene("end must not precede start"));
        }
        Ok(())
    }

    pub(crate) fn rig(&self) -> ScreenRig {
        ScreenRig::new(self.screen)
            .with_camera(self.camera)
            .with_indicator_half_length(self.indicator_half_length)
    }
}
