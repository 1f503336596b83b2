//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;
use watchpost_core::config::{MAX_DISPLAY_COLUMNS, MAX_DISPLAY_ROWS};

/// Largest supported geometry (HD44780 20x4)
pub const MAX_ROWS: usize = MAX_DISPLAY_ROWS as usize;
pub const MAX_COLS: usize = MAX_DISPLAY_COLUMNS as usize;

/// Screen buffer for text-mode displays
///
/// Lines are clipped to the configured width when set. The buffer
/// tracks whether it changed since it was last rendered.
#[derive(Clone)]
pub struct Screen {
    lines: [String<MAX_COLS>; MAX_ROWS],
    cols: usize,
    rows: usize,
    dirty: bool,
}

impl Default for Screen {
    /// 16x2, the LCD1602 geometry
    fn default() -> Self {
        Self::new(16, 2)
    }
}

impl Screen {
    /// Create an empty screen, clamping to [`MAX_COLS`] x [`MAX_ROWS`]
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            cols: (cols as usize).min(MAX_COLS),
            rows: (rows as usize).min(MAX_ROWS),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Rows past the bottom are ignored. Marks the screen dirty only if
    /// the row content changed.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row >= self.rows {
            return;
        }
        let end = text
            .char_indices()
            .nth(self.cols)
            .map_or(text.len(), |(i, _)| i);
        let text = &text[..end];
        if self.lines[row].as_str() == text {
            return;
        }
        self.lines[row].clear();
        let _ = self.lines[row].push_str(text);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        if row < self.rows {
            Some(self.lines[row].as_str())
        } else {
            None
        }
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all visible lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines[..self.rows].iter().map(|s| s.as_str())
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line);
        }
        defmt::write!(f, "]");
    }
}
