mod durations;
mod machine;

pub use durations::Durations;
pub use machine::{Effect, Input, Notice, Outcome, SessionStatus, TimerMachine};
