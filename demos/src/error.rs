// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for the frame sampler.
pub(crate) type DemoResult<T> = Result<T, DemoError>;

/// Errors surfaced by the frame sampler.
#[derive(Error, Debug)]
pub(crate) enum DemoError {
    /// The scene file could not be read.
    #[error("failed to read scene file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scene file is not valid JSON for a scene.
    #[error("failed to parse scene file {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The scene parameters cannot produce meaningful frames.
    #[error("invalid scene: {reason}")]
    InvalidScene { reason: String },

    /// Writing frames to stdout failed.
    #[error("failed to write frames")]
    Output(#[from] serde_json::Error),

    /// Flushing stdout failed.
    #[error("failed to flush output")]
    Flush(#[from] io::Error),
}

impl DemoError {
    pub(crate) fn invalid_scene(reason: impl Into<String>) -> Self {
        Self::InvalidScene {
            reason: reason.into(),
        }
    }
}
