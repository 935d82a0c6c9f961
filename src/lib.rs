//! Bounce Pomodoro - a focus/break timer with a bouncing icon
//!
//! Core modules:
//! - `sim`: Deterministic widget core (phase timer, bounce animation, tick)
//! - `driver`: Tick scheduling and change publishing for a front end
//! - `settings`: Construction-time constants and validation
//! - `error`: Configuration errors

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;

pub use driver::{Driver, Observer, Scheduler, SubscriptionId};
pub use error::ConfigError;
pub use settings::Settings;

/// Widget configuration constants
pub mod consts {
    use std::time::Duration;

    /// Interval between driver ticks (1 Hz)
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
    /// Maximum ticks replayed by a single pump after the driver fell behind
    pub const MAX_CATCHUP_TICKS: u32 = 5;

    /// Focus phase length (25 minutes)
    pub const FOCUS_SECS: u32 = 25 * 60;
    /// Break phase length (5 minutes)
    pub const BREAK_SECS: u32 = 5 * 60;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: i32 = 200;
    pub const CANVAS_HEIGHT: i32 = 200;

    /// Icon dimensions
    pub const ICON_WIDTH: i32 = 20;
    pub const ICON_HEIGHT: i32 = 20;

    /// Ticks needed to cross half the canvas
    pub const STEPS_PER_HALF_CANVAS: i32 = 30;
    /// Cosmetic wobble added to the rendered rotation, sign flips every tick
    pub const WOBBLE_DEGREES: i32 = 5;
}

/// Format whole seconds as `M:SS` (minutes unpadded)
#[inline]
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Normalize degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}
