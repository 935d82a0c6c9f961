//! Configuration errors
//!
//! The widget core has no recoverable failures; everything that can go wrong
//! happens while building it from `Settings`.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::Phase;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{} duration must be at least one second", .0.as_str())]
    ZeroDuration(Phase),

    #[error("icon must be at least 1x1, got {width}x{height}")]
    EmptyIcon { width: i32, height: i32 },

    #[error("icon {icon_width}x{icon_height} does not fit canvas {canvas_width}x{canvas_height}")]
    IconExceedsCanvas {
        icon_width: i32,
        icon_height: i32,
        canvas_width: i32,
        canvas_height: i32,
    },

    /// A step larger than the icon could jump past the collision margin
    #[error("per-tick step {step_x}x{step_y} is larger than icon {icon_width}x{icon_height}")]
    StepExceedsIcon {
        step_x: i32,
        step_y: i32,
        icon_width: i32,
        icon_height: i32,
    },
}
