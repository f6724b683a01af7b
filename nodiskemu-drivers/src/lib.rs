//! Front panel driver implementations
//!
//! This crate drives the peripherals on the front panel through the
//! traits in `nodiskemu-hal`:
//!
//! - Character LCD (HD44780 compatible, 4-bit parallel bus)
//! - Rotary encoder with push button (quadrature decoding, debounce)

#![no_std]
#![deny(unsafe_code)]

pub mod encoder;
pub mod lcd;

pub use encoder::{Encoder, EncoderConfig, InputEvent};
pub use lcd::{Lcd, LcdGeometry};
