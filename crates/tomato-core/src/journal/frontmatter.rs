//! Minimal front-matter reader/writer for journal documents.
//!
//! Only the leading `---` fenced block is inspected, and only as flat
//! `key: value` lines. Edits splice the value of one field in place so every
//! other byte of the document survives unchanged.
//!
//! ```text
//! ---
//! 🍅: "2"
//! ---
//! notes here
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `key: value` with the key not starting with whitespace or a comment marker.
static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s#:][^:]*?)\s*:(?:\s+(.+?))?\s*$").unwrap());

/// One `key: value` line of the front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: &'a str,
    /// Raw value text, quotes included.
    pub value: &'a str,
    /// Byte range of `value` in the whole document. For an empty value this
    /// is whatever follows the colon on that line.
    span: Range<usize>,
}

impl Field<'_> {
    /// Value with one layer of matching quotes removed.
    pub fn unquoted(&self) -> &str {
        let v = self.value;
        for q in ['"', '\''] {
            if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
                return &v[1..v.len() - 1];
            }
        }
        v
    }
}

/// Parsed leading metadata block of a document.
#[derive(Debug, Clone)]
pub struct FrontMatter<'a> {
    text: &'a str,
    fields: Vec<Field<'a>>,
    /// Byte offset of the closing fence line.
    close_at: usize,
    newline: &'static str,
}

impl<'a> FrontMatter<'a> {
    /// Returns `None` when the document does not open with a closed `---` block.
    pub fn parse(text: &'a str) -> Option<Self> {
        let mut lines = text.split_inclusive('\n');
        let opening = lines.next()?;
        if strip_eol(opening) != "---" || !opening.ends_with('\n') {
            return None;
        }
        let newline = if opening.ends_with("\r\n") { "\r\n" } else { "\n" };

        let mut offset = opening.len();
        let mut fields = Vec::new();
        for line in lines {
            let content = strip_eol(line);
            if content == "---" {
                return Some(Self {
                    text,
                    fields,
                    close_at: offset,
                    newline,
                });
            }
            if let Some(caps) = FIELD_RE.captures(content) {
                let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let (value, span) = match caps.get(2) {
                    Some(m) => (m.as_str(), offset + m.start()..offset + m.end()),
                    // `key:` with nothing after it; the span covers everything after the colon.
                    None => {
                        let colon = caps.get(0).and_then(|m| m.as_str().find(':'));
                        let start = offset + colon.map_or(content.len(), |c| c + 1);
                        ("", start..offset + content.len())
                    }
                };
                fields.push(Field { key, value, span });
            }
            offset += line.len();
        }
        None
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// First field named `key`.
    pub fn get(&self, key: &str) -> Option<&Field<'a>> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Body text after the closing fence.
    pub fn body(&self) -> &'a str {
        let rest = &self.text[self.close_at..];
        match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => "",
        }
    }

    /// Document with `key` set to `value`, everything else untouched.
    /// A missing field is added as the last line of the block.
    pub fn with_field(&self, key: &str, value: &str) -> String {
        match self.get(key) {
            Some(field) if field.value.is_empty() => format!(
                "{} {value}{}",
                &self.text[..field.span.start],
                &self.text[field.span.end..]
            ),
            Some(field) => format!(
                "{}{value}{}",
                &self.text[..field.span.start],
                &self.text[field.span.end..]
            ),
            None => format!(
                "{}{key}: {value}{}{}",
                &self.text[..self.close_at],
                self.newline,
                &self.text[self.close_at..]
            ),
        }
    }
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Count stored under `key`. `None` when the front matter, the field, or a
/// numeric value is missing.
pub fn read_counter(text: &str, key: &str) -> Option<u32> {
    let fm = FrontMatter::parse(text)?;
    let field = fm.get(key)?;
    match field.unquoted().trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(key, value = field.value, "counter value is not a number");
            None
        }
    }
}

/// Document with the counter under `key` set to `count`.
///
/// Documents without front matter get a new block holding only the counter,
/// written with the document's own line ending.
pub fn write_counter(text: &str, key: &str, count: u32) -> String {
    let value = format!("\"{count}\"");
    match FrontMatter::parse(text) {
        Some(fm) => fm.with_field(key, &value),
        None => {
            let nl = match text.find('\n') {
                Some(i) if text[..i].ends_with('\r') => "\r\n",
                _ => "\n",
            };
            format!("---{nl}{key}: {value}{nl}---{nl}{text}")
        }
    }
}
