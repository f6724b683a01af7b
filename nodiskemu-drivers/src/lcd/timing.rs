//! Controller timing constants
//!
//! All waits go through an `embedded_hal::delay::DelayNs` provider. The
//! 46 us data delay covers the 37 us execution time of every instruction
//! except clear and home.

/// Wait after power-on before the first command
pub const POWER_ON_DELAY_MS: u32 = 15;

/// Waits after each of the three wake-up pulses
pub const WAKE_DELAYS_MS: [u32; 3] = [5, 1, 1];

/// Wait after switching to the 4-bit bus
pub const FOUR_BIT_DELAY_MS: u32 = 5;

/// Enable (E) high time per strobe
pub const ENABLE_PULSE_US: u32 = 20;

/// Wait after each nibble transfer
pub const DATA_DELAY_US: u32 = 46;

/// Settle time after [`super::command::CLEAR`]
pub const CLEAR_DELAY_MS: u32 = 1000;

/// Settle time after [`super::command::HOME`]
///
/// Same number as the clear delay but in microseconds. HD44780 sheets
/// list about 1.52 ms for a home; check the fitted module's datasheet
/// before changing it.
pub const HOME_DELAY_US: u32 = 1000;
