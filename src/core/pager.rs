//! # Pager
//!
//! Splits rendered content into screen-sized chunks. The cursor only moves
//! forward, and every chunk boundary falls on a character boundary, so the
//! chunks concatenate back to the original text exactly.
//!
//! Line counting follows the terminal: a `\n` ends a line, and a line that
//! reaches the column limit wraps onto the next one. Wide characters count
//! for their display width.

use unicode_width::UnicodeWidthChar;

/// Rows kept free below each chunk for the status line and prompt.
pub const DEFAULT_STATUS_MARGIN: u16 = 5;

/// Terminal dimensions used to size a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: u16,
    pub columns: u16,
}

impl Viewport {
    pub fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 80)
    }
}

/// One emitted slice of content.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<'a> {
    pub text: &'a str,
    /// Share of the content still unseen after this chunk, 0.0..=100.0.
    pub percent_remaining: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Pager {
    content: String,
    cursor: usize,
    margin: u16,
}

impl Pager {
    pub fn new(content: String, margin: u16) -> Self {
        Self {
            content,
            cursor: 0,
            margin,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.content.len()
    }

    pub fn percent_remaining(&self) -> f64 {
        if self.content.is_empty() {
            return 0.0;
        }
        let remaining = self.content.len() - self.cursor;
        100.0 * remaining as f64 / self.content.len() as f64
    }

    /// Emit the next chunk that fits the viewport and advance past it.
    ///
    /// At least one line is emitted whenever content remains, even if the
    /// viewport is no taller than the margin.
    pub fn next_chunk(&mut self, viewport: Viewport) -> Chunk<'_> {
        let start = self.cursor;
        let max_lines = usize::from(viewport.rows.saturating_sub(self.margin)).max(1);
        let max_columns = usize::from(viewport.columns).max(1);

        let len = fit_lines(&self.content[start..], max_lines, max_columns);
        self.cursor = start + len;

        Chunk {
            text: &self.content[start..self.cursor],
            percent_remaining: self.percent_remaining(),
        }
    }
}

/// Byte length of the longest prefix of `text` that occupies at most
/// `max_lines` terminal lines of `max_columns` columns.
///
/// Always includes the first character of a non-empty `text`.
fn fit_lines(text: &str, max_lines: usize, max_columns: usize) -> usize {
    let mut lines = 0;
    let mut column = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            lines += 1;
            column = 0;
            if lines == max_lines {
                return i + 1;
            }
            continue;
        }

        let width = c.width().unwrap_or(0);
        if column > 0 && column + width > max_columns {
            // Hard wrap: this character starts a new line.
            lines += 1;
            column = 0;
            if lines == max_lines {
                return i;
            }
        }
        column += width;
    }

    text.len()
}
