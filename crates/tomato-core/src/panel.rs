//! Host-facing panel controller.
//!
//! A [`Panel`] owns one [`TimerMachine`] and carries out the effects of each
//! transition against the document store, the notifier and the ticker flag.
//! Storage failures are logged and swallowed: the transition that requested
//! them stands.
//!
//! ## Usage
//!
//! ```ignore
//! let mut panel = Panel::open(store, layout, durations, LogNotifier, SystemClock);
//! panel.handle(Input::Start);
//! // Once per second while `panel.is_ticking()`:
//! panel.tick();
//! ```

use chrono::NaiveDate;

use crate::events::Event;
use crate::journal::{DailyCounter, JournalLayout, Staging};
use crate::notify::Notifier;
use crate::storage::{Config, DocumentStore};
use crate::timer::{Durations, Effect, Input, SessionStatus, TimerMachine};
use crate::view::PanelView;
use crate::Clock;

pub struct Panel<S, N, C> {
    machine: TimerMachine,
    counter: DailyCounter<S>,
    staging: Staging<S>,
    notifier: N,
    clock: C,
    notifications_enabled: bool,
    ticking: bool,
    closed: bool,
    /// Last count read for `count_day`.
    count: u32,
    count_day: NaiveDate,
}

impl<S, N, C> Panel<S, N, C>
where
    S: DocumentStore + Clone,
    N: Notifier,
    C: Clock,
{
    /// Open a panel and read today's count, creating the journal if needed.
    pub fn open(
        store: S,
        layout: JournalLayout,
        durations: Durations,
        notifier: N,
        clock: C,
    ) -> Self {
        let now = clock.now();
        let mut panel = Self {
            machine: TimerMachine::new(durations, now),
            counter: DailyCounter::new(store.clone(), layout.clone()),
            staging: Staging::new(store, layout),
            notifier,
            clock,
            notifications_enabled: true,
            ticking: false,
            closed: false,
            count: 0,
            count_day: now.date(),
        };
        panel.refresh_count();
        panel
    }

    pub fn from_config(store: S, config: &Config, notifier: N, clock: C) -> Self {
        Self::open(store, config.layout(), config.durations(), notifier, clock)
            .with_notifications(config.notifications.enabled)
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn machine(&self) -> &TimerMachine {
        &self.machine
    }

    pub fn status(&self) -> SessionStatus {
        self.machine.status()
    }

    /// Today's completed sessions as last read or written.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the host should keep delivering ticks.
    pub fn is_ticking(&self) -> bool {
        self.ticking && !self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn view(&self) -> PanelView {
        PanelView::render(&self.machine, self.count)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Feed one input stamped with the current time. Closed panels ignore input.
    pub fn handle(&mut self, input: Input) -> Option<Event> {
        if self.closed {
            tracing::debug!(?input, "panel closed; input dropped");
            return None;
        }
        let at = self.clock.now();
        let outcome = self.machine.apply(input, at);
        for effect in outcome.effects {
            self.execute(effect);
        }
        outcome.event
    }

    pub fn start(&mut self) -> Option<Event> {
        self.handle(Input::Start)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.handle(Input::Pause)
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.handle(Input::Stop)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.handle(Input::Reset)
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.handle(Input::Tick)
    }

    /// Re-read today's count. Returns the new value only when it differs from
    /// the one already held.
    pub fn refresh_count(&mut self) -> Option<u32> {
        let today = self.clock.now().date();
        match self.counter.get(today) {
            Ok(count) => {
                let changed = count != self.count || today != self.count_day;
                self.count = count;
                self.count_day = today;
                changed.then_some(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, %today, "failed to read daily counter");
                None
            }
        }
    }

    /// Add a line to the staging document of the session in progress.
    /// Returns false when no session is open or the write failed.
    pub fn jot(&self, note: &str) -> bool {
        if !matches!(self.status(), SessionStatus::Running | SessionStatus::Paused) {
            return false;
        }
        match self.staging.jot(note) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, path = self.staging.path(), "failed to stage note");
                false
            }
        }
    }

    /// Tear the panel down: the ticker is disarmed and later input is ignored.
    pub fn close(&mut self) {
        self.ticking = false;
        self.closed = true;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::CreateStaging { at } => {
                if let Err(e) = self.staging.stage_start(at) {
                    tracing::warn!(error = %e, "failed to create staging document");
                }
            }
            Effect::MergeStaging { day } => {
                if let Err(e) = self.staging.stage_merge(day) {
                    tracing::warn!(error = %e, %day, "failed to merge staging document");
                }
            }
            Effect::IncrementCounter { day } => match self.counter.increment(day) {
                Ok(count) => {
                    self.count = count;
                    self.count_day = day;
                }
                Err(e) => tracing::warn!(error = %e, %day, "failed to update daily counter"),
            },
            Effect::ArmTicker => {
                if self.ticking {
                    tracing::debug!("ticker already armed; replacing");
                }
                self.ticking = true;
            }
            Effect::CancelTicker => self.ticking = false,
            Effect::Notify(notice) => {
                if self.notifications_enabled {
                    self.notifier.notify(notice.message());
                }
            }
        }
    }
}
