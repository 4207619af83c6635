// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Samples a waypoint scene and prints one JSON object per frame.
//!
//! ```text
//! waypoint_frames --end 6.28 --fps 30 --policy edge
//! waypoint_frames --config scene.json --waypoint 3,2,3 --full
//! RUST_LOG=debug waypoint_frames --end 1
//! ```

mod config;
mod error;

use std::io::{self, BufWriter, Write as _};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::DVec3;
use log::{debug, info, warn};
use serde::Serialize;
use understory_waypoint::{ClampPolicy, RenderFrame};

use crate::config::{PathConfig, SceneConfig};
use crate::error::DemoResult;

#[derive(Parser, Debug)]
#[command(
    name = "waypoint_frames",
    about = "Project a moving waypoint onto a screen plane and print the clamped indicator per frame"
)]
struct Args {
    /// JSON scene file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Offset of the screen plane along X.
    #[arg(long, allow_negative_numbers = true)]
    screen_x: Option<f64>,

    /// Half extent of the square screen.
    #[arg(long, allow_negative_numbers = true)]
    half_size: Option<f64>,

    /// First sample time.
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f64>,

    /// Last sample time (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    end: Option<f64>,

    /// Samples per unit of time.
    #[arg(long, allow_negative_numbers = true)]
    fps: Option<f64>,

    /// Use a fixed waypoint `x,y,z` instead of the scene's path.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    waypoint: Option<DVec3>,

    /// Clamp policy used for the `clamped` and arrow fields.
    #[arg(long, value_enum, default_value_t = PolicyArg::Rect)]
    policy: PolicyArg,

    /// Print the complete frame (both policies) instead of the summary.
    #[arg(long)]
    full: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Rect,
    Edge,
}

impl From<PolicyArg> for ClampPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Rect => Self::Rectangular,
            PolicyArg::Edge => Self::RayEdge,
        }
    }
}

fn parse_point(s: &str) -> Result<DVec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got {} values", parts.len())),
    }
}

/// What a renderer needs to draw one arrow.
#[derive(Serialize, Debug)]
struct FrameSummary {
    time: f64,
    waypoint: DVec3,
    raw: DVec3,
    clamped: DVec3,
    arrow: [DVec3; 2],
    behind: bool,
}

impl FrameSummary {
    fn new(frame: &RenderFrame, policy: ClampPolicy) -> Self {
        let indicator = frame.indicator(policy);
        Self {
            time: frame.time,
            waypoint: frame.waypoint,
            raw: frame.raw,
            clamped: frame.clamped(policy),
            arrow: [indicator.start(), indicator.end()],
            behind: frame.behind,
        }
    }
}

fn scene_from_args(args: &Args) -> DemoResult<SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => {
            info!("loading scene from {}", path.display());
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };
    if let Some(screen_x) = args.screen_x {
        scene.screen.screen_x = screen_x;
    }
    if let Some(half_size) = args.half_size {
        scene.screen.half_size = half_size;
    }
    if let Some(start) = args.start {
        scene.start = start;
    }
    if let Some(end) = args.end {
        scene.end = end;
    }
    if let Some(fps) = args.fps {
        scene.fps = fps;
    }
    if let Some(position) = args.waypoint {
        scene.path = PathConfig::Static { position };
    }
    scene.validate()?;
    Ok(scene)
}

fn main() -> DemoResult<()> {
    env_logger::init();
    let args = Args::parse();
    let scene = scene_from_args(&args)?;
    let policy = ClampPolicy::from(args.policy);
    let rig = scene.rig();

    info!(
        "screen x={} half_size={}, camera {}, {:?} clamp, t={}..{} at {} fps",
        scene.screen.screen_x,
        scene.screen.half_size,
        scene.camera,
        policy,
        scene.start,
        scene.end,
        scene.fps
    );

    let frames = rig.frames(&scene.path, scene.start, scene.end, scene.fps);
    let total = frames.len();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut was_behind = false;
    let mut behind_frames = 0_usize;

    for frame in frames {
        if frame.behind != was_behind {
            if frame.behind {
                warn!("t={:.3}: waypoint moved behind the camera", frame.time);
            } else {
                info!("t={:.3}: waypoint back in front of the camera", frame.time);
            }
            was_behind = frame.behind;
        }
        behind_frames += usize::from(frame.behind);
        debug!(
            "t={:.3} raw={} rect={} edge={}",
            frame.time, frame.raw, frame.rect_clamped, frame.edge_clamped
        );

        if args.full {
            serde_json::to_writer(&mut out, &frame)?;
        } else {
            serde_json::to_writer(&mut out, &FrameSummary::new(&frame, policy))?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!("wrote {total} frames, {behind_frames} with the waypoint behind the camera");
    Ok(())
}
