use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Length of the focus and rest intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    focus_ms: i64,
    rest_ms: i64,
}

impl Durations {
    /// Uses saturating arithmetic so oversized configs cannot overflow.
    pub fn from_minutes(focus_min: u32, rest_min: u32) -> Self {
        let to_ms = |min: u32| i64::from(min).saturating_mul(60_000);
        Self {
            focus_ms: to_ms(focus_min),
            rest_ms: to_ms(rest_min),
        }
    }

    pub fn focus(&self) -> Duration {
        Duration::milliseconds(self.focus_ms)
    }

    pub fn rest(&self) -> Duration {
        Duration::milliseconds(self.rest_ms)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_minutes(25, 5)
    }
}
