//! Tick scheduling and change publishing
//!
//! The core never looks at a clock. The `Driver` owns the single tick source
//! (`Scheduler`), turns elapsed real time into whole ticks, and tells
//! observers when anything a renderer reads has changed.

use std::time::{Duration, Instant};

use crate::consts::MAX_CATCHUP_TICKS;
use crate::sim::{Snapshot, TickInput, WidgetEvent, WidgetState, tick};

/// An armed periodic tick stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStream {
    /// Bumped every time a stream replaces another
    pub generation: u64,
    pub interval: Duration,
    pub next_due: Instant,
}

/// Holds at most one tick stream at a time
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    stream: Option<TickStream>,
    generation: u64,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            stream: None,
            generation: 0,
        }
    }

    /// Install a fresh stream, cancelling any existing one
    pub fn arm(&mut self, now: Instant) {
        if let Some(old) = self.stream {
            log::debug!("Replacing tick stream {}", old.generation);
        }
        self.generation += 1;
        self.stream = Some(TickStream {
            generation: self.generation,
            interval: self.interval,
            next_due: now + self.interval,
        });
    }

    /// Cancel the stream; no further ticks come due
    pub fn disarm(&mut self) {
        self.stream = None;
    }

    pub fn is_armed(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stream(&self) -> Option<&TickStream> {
        self.stream.as_ref()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.stream.map(|s| s.next_due)
    }

    /// Number of ticks that came due by `now`, consuming them.
    ///
    /// At most `MAX_CATCHUP_TICKS` are returned; if the caller fell further
    /// behind the rest are dropped and the stream re-phases to `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(stream) = self.stream.as_mut() else {
            return 0;
        };
        if now < stream.next_due {
            return 0;
        }

        let behind = now.duration_since(stream.next_due);
        let elapsed = 1 + behind.as_nanos() / stream.interval.as_nanos();
        if elapsed > MAX_CATCHUP_TICKS as u128 {
            log::warn!(
                "Driver fell {} ticks behind, dropping {}",
                elapsed,
                elapsed - MAX_CATCHUP_TICKS as u128
            );
            stream.next_due = now + stream.interval;
            return MAX_CATCHUP_TICKS;
        }

        // `elapsed` is bounded by MAX_CATCHUP_TICKS here
        let count = elapsed as u32;
        stream.next_due += stream.interval * count;
        count
    }
}

/// Receives the read model whenever it changes
pub trait Observer {
    fn on_change(&mut self, snapshot: &Snapshot, events: &[WidgetEvent]);
}

impl<F> Observer for F
where
    F: FnMut(&Snapshot, &[WidgetEvent]),
{
    fn on_change(&mut self, snapshot: &Snapshot, events: &[WidgetEvent]) {
        self(snapshot, events)
    }
}

/// Handle returned by `Driver::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Runs a widget from real time and publishes its changes
pub struct Driver {
    state: WidgetState,
    scheduler: Scheduler,
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_subscription: u64,
    last_published: Option<Snapshot>,
}

impl Driver {
    pub fn new(state: WidgetState, interval: Duration) -> Self {
        Self {
            state,
            scheduler: Scheduler::new(interval),
            observers: Vec::new(),
            next_subscription: 1,
            last_published: None,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Start the widget and (re)arm the tick source
    pub fn start(&mut self, now: Instant) {
        self.state.start();
        self.scheduler.arm(now);
        self.publish();
    }

    pub fn pause(&mut self) {
        self.state.pause();
        self.scheduler.disarm();
        self.publish();
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.scheduler.disarm();
        self.publish();
    }

    /// Run every tick due by `now`, then publish. Returns the ticks run.
    pub fn pump(&mut self, now: Instant) -> u32 {
        let count = self.scheduler.due(now);
        let input = TickInput::default();
        for _ in 0..count {
            tick(&mut self.state, &input);
        }
        self.publish();
        count
    }

    /// Notify observers if the snapshot changed or events are pending
    pub fn publish(&mut self) {
        let snapshot = self.state.snapshot();
        let changed = self.last_published.as_ref() != Some(&snapshot);
        if !changed && !self.state.has_events() {
            return;
        }

        let events = self.state.drain_events();
        for (_, observer) in &mut self.observers {
            observer.on_change(&snapshot, &events);
        }
        self.last_published = Some(snapshot);
    }
}
