//! Focus/break countdown
//!
//! A single state machine with four states: {Focus, Break} x {running, paused}.
//! Expiry flips the phase and keeps running; only `pause` or `reset` stop it.

use serde::{Deserialize, Serialize};

use crate::format_clock;

/// Which half of the Pomodoro cycle is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
        }
    }

    /// Headline shown above the clock
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus time",
            Phase::Break => "Break Time!",
        }
    }

    /// The phase that follows this one
    pub fn other(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

/// A phase flip caused by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTimer {
    focus_secs: u32,
    break_secs: u32,
    phase: Phase,
    remaining: u32,
    running: bool,
}

impl PhaseTimer {
    /// Paused timer at the start of a focus phase.
    ///
    /// Both durations must be at least one second (`Settings::validate`).
    pub fn new(focus_secs: u32, break_secs: u32) -> Self {
        debug_assert!(focus_secs > 0 && break_secs > 0);
        Self {
            focus_secs,
            break_secs,
            phase: Phase::Focus,
            remaining: focus_secs,
            running: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Full length of the current phase
    pub fn total(&self) -> u32 {
        self.duration_for(self.phase)
    }

    /// Seconds already spent in the current phase
    pub fn elapsed(&self) -> u32 {
        self.total() - self.remaining
    }

    /// Begin counting. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Back to a paused, full-length focus phase from any state
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Focus;
        self.remaining = self.focus_secs;
    }

    /// Advance the countdown by one second.
    ///
    /// The tick that reaches zero also flips the phase and reloads the new
    /// phase's duration, so the old phase's zero is never observable.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        let from = self.phase;
        self.phase = from.other();
        self.remaining = self.total();
        debug_assert!(self.remaining <= self.total());

        Some(PhaseChange {
            from,
            to: self.phase,
        })
    }

    /// Remaining time as `M:SS`
    pub fn formatted_remaining(&self) -> String {
        format_clock(self.remaining)
    }

    #[cfg(test)]
    pub(crate) fn set_remaining(&mut self, remaining: u32) {
        assert!(remaining <= self.total());
        self.remaining = remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(focus: u32, brk: u32) -> PhaseTimer {
        let mut timer = PhaseTimer::new(focus, brk);
        timer.start();
        timer
    }

    #[test]
    fn test_new_is_paused_focus() {
        let timer = PhaseTimer::new(1500, 300);
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining(), 1500);
        assert!(!timer.is_running());
        assert_eq!(timer.formatted_remaining(), "25:00");
    }

    #[test]
    fn test_tick_paused_is_noop() {
        let mut timer = PhaseTimer::new(1500, 300);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 1500);
    }

    #[test]
    fn test_start_does_not_reset_remaining() {
        let mut timer = running(1500, 300);
        timer.tick();
        timer.tick();
        timer.pause();
        assert!(timer.start());
        assert_eq!(timer.remaining(), 1498);
        assert!(!timer.start());
    }

    #[test]
    fn test_expiry_flips_to_break() {
        let mut timer = running(1500, 300);
        timer.set_remaining(1);

        let change = timer.tick();
        assert_eq!(
            change,
            Some(PhaseChange {
                from: Phase::Focus,
                to: Phase::Break
            })
        );
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining(), 300);
        assert!(timer.is_running());
    }

    #[test]
    fn test_full_break_returns_to_focus() {
        let mut timer = running(1500, 300);
        timer.set_remaining(1);
        timer.tick();

        for _ in 0..299 {
            assert_eq!(timer.tick(), None);
            assert_eq!(timer.phase(), Phase::Break);
        }
        assert_eq!(timer.remaining(), 1);

        assert!(timer.tick().is_some());
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining(), 1500);
    }

    #[test]
    fn test_reset_from_break_running() {
        let mut timer = running(10, 5);
        for _ in 0..12 {
            timer.tick();
        }
        assert_eq!(timer.phase(), Phase::Break);

        timer.reset();
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining(), 10);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_pause_and_reset_idempotent() {
        let mut once = running(10, 5);
        once.tick();
        let mut twice = once.clone();

        once.pause();
        assert!(twice.pause());
        assert!(!twice.pause());
        assert_eq!(once, twice);

        once.reset();
        twice.reset();
        twice.reset();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_total_and_elapsed() {
        let mut timer = running(60, 30);
        for _ in 0..15 {
            timer.tick();
        }
        assert_eq!(timer.total(), 60);
        assert_eq!(timer.elapsed(), 15);
        assert_eq!(timer.formatted_remaining(), "0:45");
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Focus.label(), "Focus time");
        assert_eq!(Phase::Break.label(), "Break Time!");
        assert_eq!(Phase::Focus.other(), Phase::Break);
    }

    proptest! {
        #[test]
        fn prop_countdown_is_linear(focus in 2u32..5000, n in 0u32..5000) {
            prop_assume!(n < focus);
            let mut timer = running(focus, 300);
            for _ in 0..n {
                prop_assert_eq!(timer.tick(), None);
            }
            prop_assert_eq!(timer.remaining(), focus - n);
            prop_assert_eq!(timer.phase(), Phase::Focus);
        }

        #[test]
        fn prop_remaining_stays_in_range(focus in 1u32..50, brk in 1u32..50, n in 0usize..500) {
            let mut timer = running(focus, brk);
            for _ in 0..n {
                timer.tick();
                prop_assert!(timer.remaining() >= 1);
                prop_assert!(timer.remaining() <= timer.total());
            }
        }
    }
}
