//! Board-agnostic serial console logic for NODISKEMU firmware
//!
//! This crate contains everything above the UART registers:
//!
//! - [`ring::RingBuffer`] - power-of-two byte FIFO
//! - [`serial::Serial`] - transmit and receive queues plus the interrupt
//!   entry points that drain and fill them
//! - [`console::Console`] - character output (CRLF, hex, hex dumps)
//! - [`trace`] - hex dump line formatting
//! - [`config`] - default buffer sizes and UART settings

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod error;
pub mod ring;
pub mod serial;
pub mod trace;

pub use console::Console;
pub use error::SerialError;
pub use ring::RingBuffer;
pub use serial::Serial;
