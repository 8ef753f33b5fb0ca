//! # Tomato Core Library
//!
//! Core logic for a Pomodoro panel that keeps its tally in a markdown journal.
//! Hosts (the `tomato` CLI, or an editor embedding) supply storage, a clock
//! and a notifier; everything else lives here.
//!
//! ## Architecture
//!
//! - **Timer**: A wall-clock-based state machine. It holds no timer of its
//!   own; the host delivers ticks while the panel asks for them
//! - **Journal**: Per-day counter in the front matter of
//!   `journals/{yyyy-MM-dd}.md`, and a staging document merged on stop
//! - **Storage**: `DocumentStore` trait with vault and in-memory backends,
//!   TOML-based configuration
//! - **Panel**: Runs the machine's effects against the stores
//!
//! ## Key Components
//!
//! - [`TimerMachine`]: Core timer state machine
//! - [`DailyCounter`]: Completed-session count per day
//! - [`Panel`]: Host-facing controller
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod journal;
pub mod notify;
pub mod panel;
pub mod storage;
pub mod timer;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use journal::{DailyCounter, FrontMatter, JournalLayout, Staging};
pub use notify::{LogNotifier, MemoryNotifier, Notifier};
pub use panel::Panel;
pub use storage::{Config, DocumentStore, MemoryStore, VaultStore};
pub use timer::{Durations, Effect, Input, Notice, Outcome, SessionStatus, TimerMachine};
pub use view::{Action, PanelView};
