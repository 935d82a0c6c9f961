//! Widget state: the timer and the animator driven in lockstep

use glam::IVec2;

use super::bounce::{BounceAnimator, Direction};
use super::timer::{Phase, PhaseTimer};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    Started,
    Paused,
    Reset,
    PhaseChanged { from: Phase, to: Phase },
    Bounced { from: Direction, to: Direction },
}

/// Everything a renderer reads each frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining: u32,
    /// `remaining` as `M:SS`
    pub formatted: String,
    pub running: bool,
    /// Icon top-left corner
    pub pos: IVec2,
    pub rotation_degrees: i32,
    /// Rotation including wobble
    pub rendered_rotation: i32,
    pub active: bool,
}

/// The complete widget core
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub timer: PhaseTimer,
    pub animator: BounceAnimator,
    /// Ticks that ran while the timer was running
    pub time_ticks: u64,
    /// Events since the last drain (oldest first)
    events: Vec<WidgetEvent>,
}

impl WidgetState {
    /// Build a paused widget from validated settings
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            timer: PhaseTimer::new(settings.focus_secs, settings.break_secs),
            animator: BounceAnimator::new(settings.canvas(), settings.icon()),
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Start the countdown and the animation together
    pub fn start(&mut self) {
        self.animator.set_active(true);
        if self.timer.start() {
            log::info!(
                "{} started at {}",
                self.timer.phase().as_str(),
                self.timer.formatted_remaining()
            );
            self.events.push(WidgetEvent::Started);
        }
    }

    /// Stop the countdown and the animation together
    pub fn pause(&mut self) {
        self.animator.set_active(false);
        if self.timer.pause() {
            log::info!(
                "{} paused at {}",
                self.timer.phase().as_str(),
                self.timer.formatted_remaining()
            );
            self.events.push(WidgetEvent::Paused);
        }
    }

    /// Full reset: focus phase, full duration, icon back in its corner
    pub fn reset(&mut self) {
        self.timer.reset();
        self.animator.reset();
        log::info!("Widget reset");
        self.events.push(WidgetEvent::Reset);
    }

    pub(crate) fn push_event(&mut self, event: WidgetEvent) {
        self.events.push(event);
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current read model
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.timer.phase(),
            remaining: self.timer.remaining(),
            formatted: self.timer.formatted_remaining(),
            running: self.timer.is_running(),
            pos: self.animator.pos(),
            rotation_degrees: self.animator.rotation_degrees(),
            rendered_rotation: self.animator.rendered_rotation(),
            active: self.animator.is_active(),
        }
    }
}
