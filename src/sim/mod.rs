//! Deterministic widget core
//!
//! All timer and animation logic lives here. This module must stay pure:
//! - One fixed step per `tick`, no clocks
//! - No threads, no I/O
//! - No rendering or terminal dependencies

pub mod bounce;
pub mod state;
pub mod tick;
pub mod timer;

pub use bounce::{Bounce, BounceAnimator, Direction};
pub use state::{Snapshot, WidgetEvent, WidgetState};
pub use tick::{TickInput, tick};
pub use timer::{Phase, PhaseChange, PhaseTimer};
