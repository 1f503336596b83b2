//! HD44780 character LCD behind a PCF8574 I2C expander
//!
//! The expander's eight outputs drive the LCD in 4-bit mode:
//!
//! ```text
//! P7..P4: D7..D4   P3: backlight   P2: EN   P1: RW   P0: RS
//! ```
//!
//! Every byte is sent as two nibbles, each latched by an EN pulse.

use embedded_hal::delay::DelayNs;
use watchpost_core::config::{MAX_DISPLAY_COLUMNS, MAX_DISPLAY_ROWS};
use watchpost_hal::I2cBus;

use crate::backend::{DisplayBackend, DisplayError};

/// Address of most PCF8574 backpacks (0x3F on the PCF8574A variant)
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CTRL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_DDRAM_ADDR: u8 = 0x80;

const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINES: u8 = 0x08;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 over PCF8574
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
    backlight: bool,
}

impl<I2C: I2cBus, D: DelayNs> Lcd1602<I2C, D> {
    /// 16x2 display at `address`
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self::with_geometry(i2c, delay, address, 16, 2)
    }

    /// Any HD44780 geometry up to 20x4
    pub fn with_geometry(i2c: I2C, delay: D, address: u8, cols: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            cols: cols.min(MAX_DISPLAY_COLUMNS),
            rows: rows.clamp(1, MAX_DISPLAY_ROWS),
            backlight: true,
        }
    }

    fn expander_write(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write_byte(self.address, byte)
            .map_err(|_| DisplayError::Communication)
    }

    /// Latch the upper four bits of `nibble`
    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let data = (nibble & 0xF0) | mode | self.backlight_bit();
        self.expander_write(data | EN)?;
        self.delay.delay_us(1);
        self.expander_write(data & !EN)?;
        // Longest regular instruction takes 37us
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, mode)?;
        self.write_nibble(byte << 4, mode)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write_byte(cmd, 0)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            BACKLIGHT
        } else {
            0
        }
    }

    /// Move the cursor; fails outside the display
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(CMD_DDRAM_ADDR | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write characters at the cursor
    ///
    /// Non-ASCII characters are shown as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.write_byte(byte, RS)?;
        }
        Ok(())
    }
}

impl<I2C: I2cBus, D: DelayNs> DisplayBackend for Lcd1602<I2C, D> {
    fn init(&mut self) -> Result<(), DisplayError> {
        // Power-up time
        self.delay.delay_ms(50);

        // Three 8-bit function sets resynchronise the nibble phase
        self.write_nibble(0x30, 0)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_ms(1);

        // Switch to 4-bit
        self.write_nibble(0x20, 0)?;
        self.delay.delay_ms(1);

        self.command(CMD_FUNCTION_SET | TWO_LINES)?;
        self.command(CMD_DISPLAY_CTRL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        let room = (self.cols - col) as usize;
        let end = text.char_indices().nth(room).map_or(text.len(), |(i, _)| i);
        self.print(&text[..end])
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        let bit = self.backlight_bit();
        self.expander_write(bit)
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }
}
