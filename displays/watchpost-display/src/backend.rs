//! Display backend trait
//!
//! Defines the interface for character displays.

use heapless::String;

use crate::screen::{Screen, MAX_COLS};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row or column outside the display
    InvalidPosition,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to character
/// displays.
pub trait DisplayBackend {
    /// Bring the controller into a known state
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display, clipped at the right edge
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Draw every row of `screen`, padded to the display width
    ///
    /// Padding overwrites stale characters without a clear, which
    /// would blank the panel for a few milliseconds.
    fn render(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        let (cols, rows) = self.dimensions();
        for (row, line) in screen.lines().enumerate().take(rows as usize) {
            let mut padded: String<MAX_COLS> = String::new();
            for c in line.chars().chain(core::iter::repeat(' ')).take(cols as usize) {
                let _ = padded.push(c);
            }
            self.draw_text(row as u8, 0, &padded)?;
        }
        Ok(())
    }
}
