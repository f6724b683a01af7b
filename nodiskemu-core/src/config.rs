//! Compile-time configuration defaults
//!
//! Buffer sizes are const generic parameters of [`crate::serial::Serial`];
//! the constants here are the sizes the firmware builds with unless a
//! board overrides them.

use nodiskemu_hal::UartConfig;

/// Transmit queue size in bytes (power of two)
pub const TX_BUFFER_SIZE: usize = 256;

/// Receive queue size in bytes (power of two)
pub const RX_BUFFER_SIZE: usize = 128;

/// CPU clock of the reference board
pub const DEFAULT_CPU_HZ: u32 = 8_000_000;

/// Console baud rate
pub const DEFAULT_BAUDRATE: u32 = 38_400;

/// UART settings for the reference board
pub const DEFAULT_UART_CONFIG: UartConfig = UartConfig::new(DEFAULT_CPU_HZ, DEFAULT_BAUDRATE);

/// Serial driver with the default queue sizes
pub type DefaultSerial<P> = crate::serial::Serial<P, TX_BUFFER_SIZE, RX_BUFFER_SIZE>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_powers_of_two() {
        assert!(TX_BUFFER_SIZE.is_power_of_two());
        assert!(RX_BUFFER_SIZE.is_power_of_two());
    }

    #[test]
    fn test_default_uart_config_matches_hal_default() {
        assert_eq!(DEFAULT_UART_CONFIG, UartConfig::default());
        assert_eq!(DEFAULT_UART_CONFIG.divisor(), 12);
    }
}
