//! HD44780 character LCD on a 4-bit parallel bus
//!
//! The controller is written to only: RS selects command or data, E
//! strobes each nibble, and fixed delays stand in for the busy flag.
//!
//! The driver tracks the cursor itself so that `\n` and line wrapping
//! work with the controller's non-contiguous line addresses.

pub mod command;
mod geometry;
pub mod timing;

pub use geometry::LcdGeometry;

use core::fmt;

use embedded_hal::delay::DelayNs;
use nodiskemu_hal::{NibbleBus, OutputPin};

use timing::*;

/// Character LCD driver
///
/// - `RS`: register select (low = command, high = data)
/// - `E`: enable strobe
/// - `D`: data lines D4-D7
/// - `DL`: delay provider
pub struct Lcd<RS, E, D, DL> {
    rs: RS,
    e: E,
    data: D,
    delay: DL,
    geometry: LcdGeometry,
    x: u8,
    y: u8,
}

impl<RS, E, D, DL> Lcd<RS, E, D, DL>
where
    RS: OutputPin,
    E: OutputPin,
    D: NibbleBus,
    DL: DelayNs,
{
    /// Create a driver. Nothing is sent until [`Lcd::init`].
    pub fn new(rs: RS, e: E, data: D, delay: DL, geometry: LcdGeometry) -> Self {
        Self {
            rs,
            e,
            data,
            delay,
            geometry,
            x: 0,
            y: 0,
        }
    }

    /// Run the power-on handshake and clear the display
    ///
    /// Sequence: outputs low, 15 ms; nibble 0x3 three times (5, 1, 1 ms);
    /// nibble 0x2 for the 4-bit bus (5 ms); function set, display on,
    /// entry mode; clear.
    pub fn init(&mut self) {
        self.e.set_low();
        self.rs.set_low();
        self.data.write_nibble(0);
        self.delay.delay_ms(POWER_ON_DELAY_MS);

        self.data.write_nibble(command::WAKE_NIBBLE);
        for wait_ms in WAKE_DELAYS_MS {
            self.pulse_enable();
            self.delay.delay_ms(wait_ms);
        }

        self.data.write_nibble(command::FOUR_BIT_NIBBLE);
        self.pulse_enable();
        self.delay.delay_ms(FOUR_BIT_DELAY_MS);

        self.send_command(command::FUNCTION_SET_4BIT_2LINE);
        self.send_command(command::DISPLAY_ON_CURSOR_OFF);
        self.send_command(command::ENTRY_MODE_INCREMENT);
        self.clear();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "lcd: {}x{} initialized",
            self.geometry.columns,
            self.geometry.lines
        );
    }

    fn pulse_enable(&mut self) {
        self.e.set_high();
        self.delay.delay_us(ENABLE_PULSE_US);
        self.e.set_low();
    }

    /// Send a byte as two nibbles, high nibble first
    fn write_byte(&mut self, value: u8) {
        self.data.write_nibble(value >> 4);
        self.pulse_enable();
        self.delay.delay_us(DATA_DELAY_US);
        self.data.write_nibble(value & 0x0F);
        self.pulse_enable();
        self.delay.delay_us(DATA_DELAY_US);
    }

    /// Send an instruction byte
    pub fn send_command(&mut self, cmd: u8) {
        self.rs.set_low();
        self.write_byte(cmd);
    }

    /// Move the cursor
    ///
    /// A column past the end moves to the start of the next line; a line
    /// past the end moves back to line 0.
    pub fn locate(&mut self, x: u8, y: u8) {
        let (mut x, mut y) = (x, y);
        if x >= self.geometry.columns {
            x = 0;
            y = y.saturating_add(1);
        }
        if y >= self.geometry.lines {
            y = 0;
        }

        let address = self.geometry.line_address(y).wrapping_add(x);
        self.send_command(command::SET_DDRAM_ADDR | address);
        self.x = x;
        self.y = y;
    }

    /// Write one character at the cursor
    ///
    /// `\n` moves to the start of the next line. Bytes from 0x20 up are
    /// displayed and advance the cursor; other control bytes are
    /// dropped.
    pub fn put_char(&mut self, c: u8) {
        if c == b'\n' {
            self.x = 0;
            self.y = self.y.saturating_add(1);
        }

        self.locate(self.x, self.y);
        if c >= b' ' {
            self.rs.set_high();
            self.write_byte(c);
            self.x = self.x.saturating_add(1);
        }
    }

    /// Write a string
    pub fn put_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    /// Write a NUL-terminated byte string
    pub fn put_cstr(&mut self, s: &[u8]) {
        for &byte in s.iter().take_while(|&&byte| byte != 0) {
            self.put_char(byte);
        }
    }

    /// Clear the display and home the cursor (waits 1 s)
    pub fn clear(&mut self) {
        self.send_command(command::CLEAR);
        self.x = 0;
        self.y = 0;
        self.delay.delay_ms(CLEAR_DELAY_MS);
    }

    /// Home the cursor without clearing
    pub fn home(&mut self) {
        self.send_command(command::HOME);
        self.x = 0;
        self.y = 0;
        self.delay.delay_us(HOME_DELAY_US);
    }
}

impl<RS, E, D, DL> Lcd<RS, E, D, DL> {
    /// Current cursor position as `(column, line)`
    pub fn cursor(&self) -> (u8, u8) {
        (self.x, self.y)
    }

    /// Display geometry this driver was created with
    pub fn geometry(&self) -> &LcdGeometry {
        &self.geometry
    }

    /// Give back the pins and the delay provider
    pub fn release(self) -> (RS, E, D, DL) {
        (self.rs, self.e, self.data, self.delay)
    }
}

impl<RS, E, D, DL> fmt::Write for Lcd<RS, E, D, DL>
where
    RS: OutputPin,
    E: OutputPin,
    D: NibbleBus,
    DL: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}
