//! NODISKEMU Hardware Abstraction Layer
//!
//! This crate defines the register contracts the peripheral drivers rely on.
//! A board support package implements them on top of the real registers;
//! tests implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (board support, ISR vectors)  │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌───────────────────┐   ┌───────────────────┐
//! │  nodiskemu-core   │   │ nodiskemu-drivers │
//! │ (serial, console) │   │  (lcd, encoder)   │
//! └───────────────────┘   └───────────────────┘
//!           │                     │
//!           └──────────┬──────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │  nodiskemu-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::NibbleBus`] - 4-bit parallel data bus
//! - [`uart::UartPort`] - UART register contract
//! - [`uart::UartTx`], [`uart::UartRx`] - Byte streams built on top of it

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, NibbleBus, OutputPin};
pub use uart::{UartConfig, UartPort, UartRx, UartTx};
