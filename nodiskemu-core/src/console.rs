//! Character output on top of the serial queues
//!
//! [`Console`] is the byte-stream surface the rest of the firmware uses:
//! text with `\n` expanded to CRLF, hex bytes, hex dumps and (with the
//! `receive` feature) input. It is a `Copy` handle borrowing a
//! [`Serial`], so any number of them can exist at once.
//!
//! Text entry points ([`Console::put_char`], [`Console::put_str`],
//! `core::fmt::Write`) translate newlines. The binary stream traits
//! (`embedded_io::Write`, [`UartTx`]) pass bytes through untouched.

use core::convert::Infallible;
use core::fmt;

use nodiskemu_hal::{UartPort, UartRx, UartTx};

use crate::serial::Serial;
use crate::trace::{hex_digits, trace_lines};

/// Formatted output handle for a [`Serial`]
pub struct Console<'a, P, const TX: usize, const RX: usize> {
    serial: &'a Serial<P, TX, RX>,
}

impl<P, const TX: usize, const RX: usize> Clone for Console<'_, P, TX, RX> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, const TX: usize, const RX: usize> Copy for Console<'_, P, TX, RX> {}

impl<'a, P: UartPort, const TX: usize, const RX: usize> Console<'a, P, TX, RX> {
    /// Wrap a serial driver
    pub fn new(serial: &'a Serial<P, TX, RX>) -> Self {
        Self { serial }
    }

    /// The underlying serial driver
    pub fn serial(&self) -> &'a Serial<P, TX, RX> {
        self.serial
    }

    /// Write one character, sending `\r` ahead of every `\n`
    pub fn put_char(&self, c: u8) {
        if c == b'\n' {
            self.serial.put_byte(b'\r');
        }
        self.serial.put_byte(c);
    }

    /// Write a string through [`Console::put_char`]
    pub fn put_str(&self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    /// Write a NUL-terminated byte string through [`Console::put_char`]
    ///
    /// Stops at the first NUL, or at the end of the slice if there is none.
    pub fn put_cstr(&self, s: &[u8]) {
        for &byte in s.iter().take_while(|&&byte| byte != 0) {
            self.put_char(byte);
        }
    }

    /// Write a CR LF pair
    pub fn put_crlf(&self) {
        self.serial.put_byte(b'\r');
        self.serial.put_byte(b'\n');
    }

    /// Write a byte as two uppercase hex digits
    pub fn put_hex_byte(&self, value: u8) {
        for digit in hex_digits(value) {
            self.serial.put_byte(digit);
        }
    }

    /// Write a 16-bit value as four uppercase hex digits
    pub fn put_hex_u16(&self, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.put_hex_byte(hi);
        self.put_hex_byte(lo);
    }

    /// Hex dump `len` bytes of `buffer` starting at `start`
    ///
    /// See [`crate::trace`] for the line layout. Each line is flushed
    /// before the next is formatted, so this call blocks until the whole
    /// dump has left the data register.
    pub fn trace_dump(&self, buffer: &[u8], start: u16, len: u16) {
        for line in trace_lines(buffer, start, len) {
            for &byte in line.iter() {
                self.serial.put_byte(byte);
            }
            self.serial.flush();
        }
    }

    /// Spin until all queued output has been sent
    pub fn flush(&self) {
        self.serial.flush();
    }
}

#[cfg(feature = "receive")]
impl<P: UartPort, const TX: usize, const RX: usize> Console<'_, P, TX, RX> {
    /// Take the oldest received byte, if any
    pub fn getc(&self) -> Option<u8> {
        self.serial.try_read()
    }

    /// Spin until a byte arrives (no timeout)
    pub fn blocking_read(&self) -> u8 {
        self.serial.blocking_read()
    }

    /// `true` when no received byte is waiting
    pub fn is_empty(&self) -> bool {
        self.serial.rx_is_empty()
    }
}

impl<P: UartPort, const TX: usize, const RX: usize> fmt::Write for Console<'_, P, TX, RX> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

impl<P, const TX: usize, const RX: usize> embedded_io::ErrorType for Console<'_, P, TX, RX> {
    type Error = Infallible;
}

impl<P: UartPort, const TX: usize, const RX: usize> embedded_io::Write
    for Console<'_, P, TX, RX>
{
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &byte in buf {
            self.serial.put_byte(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.serial.flush();
        Ok(())
    }
}

#[cfg(feature = "receive")]
impl<P: UartPort, const TX: usize, const RX: usize> embedded_io::Read
    for Console<'_, P, TX, RX>
{
    /// Blocks for the first byte, then returns whatever else is queued
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some((first, rest)) = buf.split_first_mut() else {
            return Ok(0);
        };
        *first = self.serial.blocking_read();

        let mut count = 1;
        for slot in rest {
            match self.serial.try_read() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }
}

impl<P: UartPort, const TX: usize, const RX: usize> UartTx for Console<'_, P, TX, RX> {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.serial.put_byte(byte);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.serial.flush();
        Ok(())
    }
}

#[cfg(feature = "receive")]
impl<P: UartPort, const TX: usize, const RX: usize> UartRx for Console<'_, P, TX, RX> {
    type Error = Infallible;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        for slot in buf.iter_mut() {
            *slot = self.serial.blocking_read();
        }
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::serial::tests::{drain, setup, TestSerial};
    use core::fmt::Write as _;
    use core::sync::atomic::{AtomicBool, Ordering};
    use std::vec::Vec;

    /// Run `f` while a background thread plays the drain interrupt
    fn with_drainer(serial: &TestSerial, f: impl FnOnce()) {
        let done = AtomicBool::new(false);
        std::thread::scope(|s| {
            s.spawn(|| {
                while !done.load(Ordering::SeqCst) {
                    serial.on_tx_ready();
                    std::thread::yield_now();
                }
            });
            f();
            done.store(true, Ordering::SeqCst);
        });
    }

    #[test]
    fn test_put_char_expands_newline() {
        let (serial, port) = setup();
        let console = serial.console();
        with_drainer(&serial, || console.put_str("ab\ncd"));
        drain(&serial, &port);
        assert_eq!(port.sent(), b"ab\r\ncd");
    }

    #[test]
    fn test_put_hex_byte() {
        let (serial, port) = setup();
        let console = serial.console();
        console.put_hex_byte(0xA5);
        console.put_hex_byte(0x0F);
        drain(&serial, &port);
        assert_eq!(port.sent(), b"A50F");
    }

    #[test]
    fn test_put_hex_u16() {
        let (serial, port) = setup();
        serial.console().put_hex_u16(0xBEEF);
        drain(&serial, &port);
        assert_eq!(port.sent(), b"BEEF");
    }

    #[test]
    fn test_put_cstr_stops_at_nul() {
        let (serial, port) = setup();
        let console = serial.console();
        console.put_cstr(b"ok\0junk");
        console.put_cstr(b"!");
        drain(&serial, &port);
        assert_eq!(port.sent(), b"ok!");
    }

    #[test]
    fn test_fmt_write_uses_crlf() {
        let (serial, port) = setup();
        let mut console = serial.console();
        write!(console, "x={}\n", 5).unwrap();
        drain(&serial, &port);
        assert_eq!(port.sent(), b"x=5\r\n");
    }

    #[test]
    fn test_embedded_io_write_is_binary() {
        let (serial, port) = setup();
        let mut console = serial.console();
        let written = embedded_io::Write::write(&mut console, b"\n\x00").unwrap();
        assert_eq!(written, 2);
        drain(&serial, &port);
        assert_eq!(port.sent(), b"\n\x00");
    }

    #[test]
    fn test_trace_dump_twenty_bytes() {
        let (serial, port) = setup();
        let console = serial.console();
        let data: [u8; 20] = core::array::from_fn(|i| b'a' + i as u8);

        with_drainer(&serial, || console.trace_dump(&data, 0, 20));

        let expected: Vec<u8> = trace_lines(&data, 0, 20).flatten().collect();
        let sent = port.sent();
        assert_eq!(sent, expected);
        assert_eq!(sent.iter().filter(|&&b| b == b'\n').count(), 2);
        assert!(serial.tx_is_empty());
    }

    #[cfg(feature = "receive")]
    #[test]
    fn test_input_surface() {
        let (serial, _port) = setup();
        let mut console = serial.console();
        assert!(console.is_empty());
        assert_eq!(console.getc(), None);

        serial.receive_byte(b'h');
        serial.receive_byte(b'i');
        assert!(!console.is_empty());

        let mut buf = [0u8; 8];
        let count = embedded_io::Read::read(&mut console, &mut buf).unwrap();
        assert_eq!(&buf[..count], b"hi");

        serial.receive_byte(b'z');
        assert_eq!(console.blocking_read(), b'z');

        serial.receive_byte(b'q');
        assert_eq!(console.read_byte(), Ok(b'q'));
    }
}
