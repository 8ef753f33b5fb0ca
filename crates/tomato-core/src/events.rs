use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::timer::SessionStatus;

/// Every state change of the timer produces an Event.
/// Hosts print or log them; the panel forwards them unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: i64,
        at: NaiveDateTime,
    },
    TimerResumed {
        remaining_ms: i64,
        at: NaiveDateTime,
    },
    TimerPaused {
        remaining_ms: i64,
        at: NaiveDateTime,
    },
    /// Focus interval abandoned by the user; the rest period begins.
    TimerStopped {
        remaining_ms: i64,
        at: NaiveDateTime,
    },
    TimerReset {
        at: NaiveDateTime,
    },
    /// Focus interval ran to the end and was counted.
    FocusCompleted {
        at: NaiveDateTime,
    },
    RestCompleted {
        at: NaiveDateTime,
    },
    StateSnapshot {
        status: SessionStatus,
        remaining_ms: i64,
        total_ms: i64,
        is_rest: bool,
        at: NaiveDateTime,
    },
}
