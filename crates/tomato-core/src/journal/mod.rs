//! Journal documents: the per-day counter and the staging document.
//!
//! Each day has a markdown document at `journals/{yyyy-MM-dd}.md` whose front
//! matter carries the number of completed focus sessions. Notes taken during a
//! session go to a staging document first and are appended to the day's
//! journal when the session stops.

mod counter;
pub mod frontmatter;
mod layout;
mod staging;

pub use counter::DailyCounter;
pub use frontmatter::{Field, FrontMatter};
pub use layout::JournalLayout;
pub use staging::Staging;
