//! Presentation of the panel state.
//!
//! Pure functions from machine state to what the host draws: the buttons on
//! offer, the countdown label, the progress icon and the day's tally.

use std::fmt;

use chrono::Duration;
use serde::Serialize;

use crate::timer::{Input, SessionStatus, TimerMachine};

/// Button shown on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Pause,
    Stop,
    Reset,
}

impl Action {
    pub fn input(self) -> Input {
        match self {
            Action::Start => Input::Start,
            Action::Pause => Input::Pause,
            Action::Stop => Input::Stop,
            Action::Reset => Input::Reset,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Stop => "stop",
            Action::Reset => "reset",
        }
    }
}

/// Buttons offered in each status.
pub fn buttons(status: SessionStatus) -> &'static [Action] {
    match status {
        SessionStatus::Pending => &[Action::Start],
        SessionStatus::Running => &[Action::Pause, Action::Stop],
        SessionStatus::Paused => &[Action::Start, Action::Stop],
        SessionStatus::Stopped => &[Action::Reset],
    }
}

/// `MM:SS`, or `None` once the interval has run out.
pub fn countdown_label(remaining: Duration) -> Option<String> {
    if remaining < Duration::zero() {
        return None;
    }
    let secs = remaining.num_seconds();
    Some(format!("{:02}:{:02}", secs / 60, secs % 60))
}

/// Icon for the whole minutes left.
pub fn progress_icon(minutes: i64, is_rest: bool) -> Option<&'static str> {
    if is_rest {
        return Some("🍏");
    }
    match minutes {
        m if m < 0 => None,
        m if m > 20 => Some("🌱"),
        m if m > 15 => Some("🌿"),
        m if m > 10 => Some("🪴"),
        _ => Some("🍵"),
    }
}

/// Longest tally drawn one tomato per session.
pub const TALLY_LIMIT: u32 = 20;

/// One tomato per completed session, or `🍅×N` past [`TALLY_LIMIT`].
pub fn tally(count: u32) -> String {
    if count > TALLY_LIMIT {
        return format!("🍅×{count}");
    }
    "🍅".repeat(count as usize)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub icon: Option<&'static str>,
    pub label: String,
}

/// Everything the panel shows at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub status: SessionStatus,
    /// Hidden while pending and once the countdown is negative.
    pub timer: Option<TimerView>,
    pub buttons: Vec<Action>,
    pub tally: String,
}

impl PanelView {
    pub fn render(machine: &TimerMachine, count: u32) -> Self {
        let status = machine.status();
        let timer = if status == SessionStatus::Pending {
            None
        } else {
            let remaining = machine.remaining();
            countdown_label(remaining).map(|label| TimerView {
                icon: progress_icon(remaining.num_minutes(), machine.is_rest()),
                label,
            })
        };
        Self {
            status,
            timer,
            buttons: buttons(status).to_vec(),
            tally: tally(count),
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}]", self.status)?;
        if let Some(timer) = &self.timer {
            match timer.icon {
                Some(icon) => write!(f, " {icon} {}", timer.label)?,
                None => write!(f, " {}", timer.label)?,
            }
        }
        let labels: Vec<&str> = self.buttons.iter().map(|b| b.label()).collect();
        write!(f, "  ({})", labels.join(" | "))?;
        if !self.tally.is_empty() {
            write!(f, "  {}", self.tally)?;
        }
        Ok(())
    }
}
