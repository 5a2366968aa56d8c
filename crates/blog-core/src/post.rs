//! This module defines the `Post` struct, the only entity of the blog, and
//! the generator that hands out post IDs.

use crate::{BlogError, BlogResult};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use textwrap::core::display_width;
use textwrap::{self, wrap};

/// Width of the text area inside a rendered post card.
const CARD_WIDTH: usize = 50;

/// A single blog post. The `id` is assigned by the store on creation and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Post {
    id: u64,
    pub title: String,
    pub content: String,
}

impl Post {
    /// Create a new post with the given `id`. Both `title` and `content`
    /// must be non-empty.
    pub fn new(id: u64, title: String, content: String) -> BlogResult<Self> {
        verify_fields(&title, &content)?;
        Ok(Post { id, title, content })
    }

    /// Overwrite the title and content of an existing post.
    pub fn update(&mut self, title: String, content: String) -> BlogResult<()> {
        verify_fields(&title, &content)?;
        self.title = title;
        self.content = content;
        Ok(())
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Both fields are required; the title is checked first.
pub fn verify_fields(title: &str, content: &str) -> BlogResult<()> {
    if title.is_empty() {
        return Err(BlogError::EmptyTitle);
    }
    if content.is_empty() {
        return Err(BlogError::EmptyContent);
    }
    Ok(())
}

/// Hands out post IDs derived from the wall clock, in milliseconds since the
/// Unix epoch. IDs are strictly increasing: two posts created within the same
/// millisecond get consecutive IDs.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> u64 {
        self.next_from(time_in_millis(SystemTime::now()))
    }

    fn next_from(&mut self, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last + 1);
        self.last = id;
        id
    }
}

/// A clock set before the epoch yields 0; the generator still moves forward.
pub(crate) fn time_in_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

fn write_row(f: &mut Formatter<'_>, line: &str) -> std::fmt::Result {
    let whitespace = CARD_WIDTH.saturating_sub(display_width(line));
    writeln!(f, "| {}{} |", line, " ".repeat(whitespace))
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let border = format!("+{:-<width$}+", "", width = CARD_WIDTH + 2);
        let wrapping_config = textwrap::Options::new(CARD_WIDTH).break_words(true);

        writeln!(f, "{border}")?;
        for line in wrap(&format!("#{} {}", self.id, self.title), &wrapping_config) {
            write_row(f, &line)?;
        }
        writeln!(f, "|{:-<width$}|", "", width = CARD_WIDTH + 2)?;
        for line in wrap(&self.content, &wrapping_config) {
            write_row(f, &line)?;
        }
        write!(f, "{border}")
    }
}
