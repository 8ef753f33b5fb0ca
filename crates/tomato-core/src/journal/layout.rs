use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Path conventions for journal documents inside a vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLayout {
    pub journal_dir: String,
    pub staging_path: String,
    /// Front-matter key holding the daily count.
    pub counter_key: String,
}

impl Default for JournalLayout {
    fn default() -> Self {
        Self {
            journal_dir: "journals".into(),
            staging_path: "p.zen.md".into(),
            counter_key: "🍅".into(),
        }
    }
}

impl JournalLayout {
    /// `journals/2026-10-19.md`
    pub fn day_path(&self, day: NaiveDate) -> String {
        let dir = self.journal_dir.trim_end_matches('/');
        let file = format!("{}.md", day.format("%Y-%m-%d"));
        if dir.is_empty() {
            file
        } else {
            format!("{dir}/{file}")
        }
    }

    /// Content of a freshly created day document.
    pub fn template(&self) -> String {
        format!("---\n{}: \"0\"\n---\n", self.counter_key)
    }

    /// First line of a staging document opened at `at`.
    pub fn staging_header(&self, at: NaiveDateTime) -> String {
        format!("### {}\n", at.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_path_uses_iso_date() {
        let layout = JournalLayout::default();
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(layout.day_path(day), "journals/2026-01-05.md");
    }

    #[test]
    fn day_path_tolerates_trailing_slash_and_root() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut layout = JournalLayout {
            journal_dir: "daily/".into(),
            ..JournalLayout::default()
        };
        assert_eq!(layout.day_path(day), "daily/2026-10-19.md");
        layout.journal_dir.clear();
        assert_eq!(layout.day_path(day), "2026-10-19.md");
    }

    #[test]
    fn template_holds_zero_counter() {
        assert_eq!(JournalLayout::default().template(), "---\n🍅: \"0\"\n---\n");
    }

    #[test]
    fn staging_header_is_hours_and_minutes() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 15, 42)
            .unwrap();
        assert_eq!(JournalLayout::default().staging_header(at), "### 09:15\n");
    }
}
