//! Fixed timestep widget tick
//!
//! One call is one second of widget time. Real time never enters here; the
//! caller decides when a tick is due.

use super::state::{WidgetEvent, WidgetState};

/// One-shot commands applied at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
}

/// Advance the widget by one fixed step.
///
/// Commands apply first, in the order reset, pause, start. The countdown and
/// the animation then step only if the timer is running.
pub fn tick(state: &mut WidgetState, input: &TickInput) {
    if input.reset {
        state.reset();
    }
    if input.pause {
        state.pause();
    }
    if input.start {
        state.start();
    }

    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    if let Some(change) = state.timer.tick() {
        log::info!(
            "{} over, {} for {}",
            change.from.as_str(),
            change.to.as_str(),
            state.timer.formatted_remaining()
        );
        state.push_event(WidgetEvent::PhaseChanged {
            from: change.from,
            to: change.to,
        });
    }

    if let Some(bounce) = state.animator.advance() {
        state.push_event(WidgetEvent::Bounced {
            from: bounce.from,
            to: bounce.to,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::{Direction, Phase};
    use glam::IVec2;

    fn widget(settings: Settings) -> WidgetState {
        WidgetState::new(&settings).unwrap()
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_paused_does_nothing() {
        let mut state = widget(Settings::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.timer.remaining(), 1500);
        assert_eq!(state.animator.pos(), IVec2::new(180, 180));
    }

    #[test]
    fn test_start_then_count() {
        let mut state = widget(Settings::default());
        tick(&mut state, &start());
        for _ in 0..9 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 10);
        assert_eq!(state.timer.remaining(), 1490);
        assert_eq!(state.animator.pos(), IVec2::new(150, 180));
    }

    #[test]
    fn test_phase_change_event() {
        let mut state = widget(Settings {
            focus_secs: 3,
            break_secs: 2,
            ..Default::default()
        });
        tick(&mut state, &start());
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());

        assert_eq!(state.timer.phase(), Phase::Break);
        assert_eq!(state.timer.remaining(), 2);
        assert!(state.is_running());
        assert_eq!(
            state.drain_events(),
            vec![
                WidgetEvent::Started,
                WidgetEvent::PhaseChanged {
                    from: Phase::Focus,
                    to: Phase::Break
                }
            ]
        );
    }

    #[test]
    fn test_bounce_event() {
        let mut state = widget(Settings::default());
        tick(&mut state, &start());
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        let events = state.drain_events();
        assert!(events.contains(&WidgetEvent::Bounced {
            from: Direction::Left,
            to: Direction::Up
        }));
    }

    #[test]
    fn test_pause_input_stops_both() {
        let mut state = widget(Settings::default());
        tick(&mut state, &start());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.timer.remaining(), 1499);
        assert!(!state.animator.is_active());
        assert_eq!(state.animator.pos(), IVec2::new(177, 180));
    }

    #[test]
    fn test_reset_and_start_same_tick() {
        let mut state = widget(Settings::default());
        tick(&mut state, &start());
        tick(&mut state, &TickInput::default());

        let restart = TickInput {
            reset: true,
            start: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.timer.phase(), Phase::Focus);
        assert_eq!(state.timer.remaining(), 1499);
        assert_eq!(state.animator.pos(), IVec2::new(177, 180));
    }

    #[test]
    fn test_determinism() {
        let mut a = widget(Settings::default());
        let mut b = widget(Settings::default());
        let inputs = [start(), TickInput::default(), TickInput::default()];
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
