//! Timer state machine.
//!
//! The machine is a pure, wall-clock-based state machine. It owns no timer
//! and performs no I/O: every input carries its own timestamp, and the caller
//! executes the returned [`Effect`]s. Ticks go through the same [`TimerMachine::apply`]
//! as user input, so the state used to evaluate a tick is always current.
//!
//! ## State Transitions
//!
//! ```text
//! Pending -> Running -> Paused -> Running
//!               |          |
//!               +-> Stopped <-+
//!                     |
//!                     +-> Pending
//! ```
//!
//! `Reset` returns any state to `Pending`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Durations;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Running,
    Paused,
    /// Focus interval is over and the rest interval is counting down.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Input {
    Start,
    Pause,
    Stop,
    Reset,
    Tick,
}

/// User-visible alerts raised by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    TimeUp,
    Ready,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::TimeUp => "Time is up!",
            Notice::Ready => "Ready to start!",
        }
    }
}

/// Side effects requested by a transition, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a fresh staging document headed with `at`.
    CreateStaging { at: NaiveDateTime },
    /// Move the staging document into the journal for `day`.
    MergeStaging { day: NaiveDate },
    IncrementCounter { day: NaiveDate },
    /// Start the periodic tick, replacing any ticker already armed.
    ArmTicker,
    CancelTicker,
    Notify(Notice),
}

/// Result of a single [`TimerMachine::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub event: Option<Event>,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn new(event: Event, effects: Vec<Effect>) -> Self {
        Self {
            event: Some(event),
            effects,
        }
    }

    /// Whether the input changed the session.
    pub fn is_transition(&self) -> bool {
        self.event.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerMachine {
    durations: Durations,
    status: SessionStatus,
    start_time: NaiveDateTime,
    /// Timestamp of the most recent input. Frozen at the pause sample while
    /// paused, so the countdown holds still.
    now: NaiveDateTime,
}

impl TimerMachine {
    pub fn new(durations: Durations, at: NaiveDateTime) -> Self {
        Self {
            durations,
            status: SessionStatus::Pending,
            start_time: at,
            now: at,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// True while the rest interval is counting down.
    pub fn is_rest(&self) -> bool {
        self.status == SessionStatus::Stopped
    }

    /// Length of the interval the current status counts against.
    pub fn total(&self) -> Duration {
        if self.is_rest() {
            self.durations.rest()
        } else {
            self.durations.focus()
        }
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.start_time + self.total()
    }

    /// `end_at - now`. Not clamped: negative once the interval has elapsed.
    pub fn remaining(&self) -> Duration {
        self.end_at() - self.now
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            remaining_ms: self.remaining().num_milliseconds(),
            total_ms: self.total().num_milliseconds(),
            is_rest: self.is_rest(),
            at: self.now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, at: NaiveDateTime) -> Outcome {
        self.apply(Input::Start, at)
    }

    pub fn pause(&mut self, at: NaiveDateTime) -> Outcome {
        self.apply(Input::Pause, at)
    }

    pub fn stop(&mut self, at: NaiveDateTime) -> Outcome {
        self.apply(Input::Stop, at)
    }

    pub fn reset(&mut self, at: NaiveDateTime) -> Outcome {
        self.apply(Input::Reset, at)
    }

    pub fn tick(&mut self, at: NaiveDateTime) -> Outcome {
        self.apply(Input::Tick, at)
    }

    /// Single transition function for user input and ticks alike.
    pub fn apply(&mut self, input: Input, at: NaiveDateTime) -> Outcome {
        use SessionStatus::*;

        let from = self.status;
        let outcome = match (from, input) {
            (Pending, Input::Start) => {
                self.status = Running;
                self.start_time = at;
                Outcome::new(
                    Event::TimerStarted {
                        duration_secs: self.durations.focus().num_seconds(),
                        at,
                    },
                    vec![Effect::CreateStaging { at }, Effect::ArmTicker],
                )
            }
            (Paused, Input::Start) => {
                // Remaining time as last observed, before `now` moves to `at`.
                let remaining = self.remaining();
                self.status = Running;
                self.start_time = at - (self.durations.focus() - remaining);
                Outcome::new(
                    Event::TimerResumed {
                        remaining_ms: remaining.num_milliseconds(),
                        at,
                    },
                    vec![Effect::ArmTicker],
                )
            }
            (Running, Input::Pause) => {
                self.now = at;
                self.status = Paused;
                Outcome::new(
                    Event::TimerPaused {
                        remaining_ms: self.remaining().num_milliseconds(),
                        at,
                    },
                    vec![Effect::CancelTicker],
                )
            }
            (Running | Paused, Input::Stop) => {
                if from == Running {
                    self.now = at;
                }
                let remaining = self.remaining();
                self.status = Stopped;
                self.start_time = at;
                Outcome::new(
                    Event::TimerStopped {
                        remaining_ms: remaining.num_milliseconds(),
                        at,
                    },
                    vec![Effect::MergeStaging { day: at.date() }, Effect::ArmTicker],
                )
            }
            (_, Input::Reset) => {
                self.status = Pending;
                self.start_time = at;
                Outcome::new(Event::TimerReset { at }, vec![Effect::CancelTicker])
            }
            (Running, Input::Tick) if at >= self.end_at() => {
                self.status = Stopped;
                self.start_time = at;
                Outcome::new(
                    Event::FocusCompleted { at },
                    vec![
                        Effect::IncrementCounter { day: at.date() },
                        Effect::Notify(Notice::TimeUp),
                    ],
                )
            }
            (Stopped, Input::Tick) if at >= self.end_at() => {
                self.status = Pending;
                Outcome::new(
                    Event::RestCompleted { at },
                    vec![Effect::CancelTicker, Effect::Notify(Notice::Ready)],
                )
            }
            _ => Outcome::ignored(),
        };
        if self.status != Paused {
            self.now = at;
        }

        if outcome.is_transition() {
            tracing::debug!(?from, to = ?self.status, ?input, "timer transition");
        } else if input != Input::Tick {
            tracing::debug!(status = ?from, ?input, "input ignored");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn machine() -> TimerMachine {
        TimerMachine::new(Durations::default(), t(9, 0, 0))
    }

    #[test]
    fn start_from_pending_creates_staging_and_arms() {
        let mut m = machine();
        let out = m.start(t(9, 15, 0));
        assert_eq!(m.status(), SessionStatus::Running);
        assert_eq!(m.start_time(), t(9, 15, 0));
        assert_eq!(
            out.effects,
            vec![Effect::CreateStaging { at: t(9, 15, 0) }, Effect::ArmTicker]
        );
        assert_eq!(m.remaining(), Duration::minutes(25));
    }

    #[test]
    fn pause_then_start_preserves_remaining() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.tick(t(9, 10, 0));
        m.pause(t(9, 10, 30));
        let before = m.remaining();
        assert_eq!(before, Duration::seconds(14 * 60 + 30));

        let out = m.start(t(11, 0, 0));
        assert_eq!(m.status(), SessionStatus::Running);
        assert_eq!(m.remaining(), before);
        assert_eq!(out.effects, vec![Effect::ArmTicker]);
        assert_eq!(m.end_at(), t(11, 14, 30));
    }

    #[test]
    fn paused_time_is_not_counted() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.pause(t(9, 20, 0));
        m.start(t(10, 0, 0));
        // Five focus minutes were left; four minutes later the session still runs.
        let out = m.tick(t(10, 4, 0));
        assert!(!out.is_transition());
        assert_eq!(m.status(), SessionStatus::Running);
        let out = m.tick(t(10, 5, 0));
        assert_eq!(m.status(), SessionStatus::Stopped);
        assert!(matches!(out.event, Some(Event::FocusCompleted { .. })));
    }

    #[test]
    fn pause_cancels_ticker() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        let out = m.pause(t(9, 1, 0));
        assert_eq!(m.status(), SessionStatus::Paused);
        assert_eq!(out.effects, vec![Effect::CancelTicker]);
    }

    #[test]
    fn stop_from_running_or_paused_enters_rest() {
        let mut running = machine();
        running.start(t(9, 0, 0));
        let out = running.stop(t(9, 5, 0));
        assert_eq!(running.status(), SessionStatus::Stopped);
        assert_eq!(running.start_time(), t(9, 5, 0));
        assert_eq!(
            out.effects,
            vec![
                Effect::MergeStaging {
                    day: t(9, 5, 0).date()
                },
                Effect::ArmTicker
            ]
        );
        assert_eq!(running.remaining(), Duration::minutes(5));

        let mut paused = machine();
        paused.start(t(9, 0, 0));
        paused.pause(t(9, 2, 0));
        paused.stop(t(9, 30, 0));
        assert_eq!(paused.status(), SessionStatus::Stopped);
        assert!(paused.is_rest());
    }

    #[test]
    fn reset_from_every_state_yields_pending() {
        let setups: [fn(&mut TimerMachine); 4] = [
            |_| {},
            |m| {
                m.start(t(9, 0, 0));
            },
            |m| {
                m.start(t(9, 0, 0));
                m.pause(t(9, 1, 0));
            },
            |m| {
                m.start(t(9, 0, 0));
                m.stop(t(9, 1, 0));
            },
        ];
        for setup in setups {
            let mut m = machine();
            setup(&mut m);
            let out = m.reset(t(9, 3, 0));
            assert_eq!(m.status(), SessionStatus::Pending);
            assert_eq!(m.start_time(), t(9, 3, 0));
            assert_eq!(out.effects, vec![Effect::CancelTicker]);
        }
    }

    #[test]
    fn focus_completion_counts_and_starts_rest() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        assert!(!m.tick(t(9, 24, 59)).is_transition());
        let out = m.tick(t(9, 25, 0));
        assert_eq!(m.status(), SessionStatus::Stopped);
        assert_eq!(m.start_time(), t(9, 25, 0));
        assert_eq!(
            out.effects,
            vec![
                Effect::IncrementCounter {
                    day: t(9, 25, 0).date()
                },
                Effect::Notify(Notice::TimeUp)
            ]
        );
    }

    #[test]
    fn rest_completion_returns_to_pending_without_counting() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.tick(t(9, 25, 0));
        assert!(!m.tick(t(9, 29, 59)).is_transition());
        let out = m.tick(t(9, 30, 0));
        assert_eq!(m.status(), SessionStatus::Pending);
        assert_eq!(
            out.effects,
            vec![Effect::CancelTicker, Effect::Notify(Notice::Ready)]
        );
        assert!(!out
            .effects
            .iter()
            .any(|e| matches!(e, Effect::IncrementCounter { .. })));
    }

    #[test]
    fn undefined_inputs_are_ignored() {
        let mut m = machine();
        assert!(!m.pause(t(9, 0, 1)).is_transition());
        assert!(!m.stop(t(9, 0, 2)).is_transition());
        assert!(!m.tick(t(10, 0, 0)).is_transition());
        assert_eq!(m.status(), SessionStatus::Pending);

        m.start(t(10, 0, 0));
        let out = m.start(t(10, 1, 0));
        assert!(out.effects.is_empty());
        assert_eq!(m.start_time(), t(10, 0, 0));
    }

    #[test]
    fn ticks_while_paused_do_not_complete() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.pause(t(9, 1, 0));
        assert!(!m.tick(t(12, 0, 0)).is_transition());
        assert_eq!(m.status(), SessionStatus::Paused);
    }

    #[test]
    fn second_pause_does_not_eat_focus_time() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.pause(t(9, 10, 0));
        assert!(!m.pause(t(9, 22, 0)).is_transition());
        assert_eq!(m.remaining(), Duration::minutes(15));

        m.start(t(9, 23, 0));
        assert_eq!(m.remaining(), Duration::minutes(15));
        assert_eq!(m.end_at(), t(9, 38, 0));
    }

    #[test]
    fn tick_while_paused_keeps_countdown_still() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.pause(t(9, 10, 0));
        m.tick(t(9, 20, 0));
        assert_eq!(m.now(), t(9, 10, 0));
        assert_eq!(m.remaining(), Duration::minutes(15));

        let out = m.start(t(9, 30, 0));
        assert_eq!(
            out.event,
            Some(Event::TimerResumed {
                remaining_ms: 15 * 60 * 1000,
                at: t(9, 30, 0),
            })
        );
        assert_eq!(m.remaining(), Duration::minutes(15));
    }

    #[test]
    fn remaining_goes_negative_unclamped() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.pause(t(9, 1, 0));
        m.start(t(9, 2, 0));
        m.tick(t(9, 26, 0));
        // The tick completed the focus interval; rest counts from the tick.
        assert_eq!(m.remaining(), Duration::minutes(5));

        let mut late = machine();
        late.start(t(9, 0, 0));
        late.stop(t(9, 1, 0));
        late.pause(t(9, 30, 0));
        assert_eq!(late.remaining(), Duration::minutes(-24));
    }

    #[test]
    fn snapshot_reports_rest_interval() {
        let mut m = machine();
        m.start(t(9, 0, 0));
        m.stop(t(9, 10, 0));
        match m.snapshot() {
            Event::StateSnapshot {
                status,
                remaining_ms,
                total_ms,
                is_rest,
                ..
            } => {
                assert_eq!(status, SessionStatus::Stopped);
                assert_eq!(remaining_ms, 5 * 60 * 1000);
                assert_eq!(total_ms, 5 * 60 * 1000);
                assert!(is_rest);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
