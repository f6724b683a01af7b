//! UART serial communication abstractions
//!
//! [`UartPort`] is the register-level contract an interrupt-driven
//! driver needs: one data register plus the interrupt enable bits.
//! [`UartTx`] and [`UartRx`] are the byte-stream view the rest of the
//! firmware writes to and reads from.

/// UART register contract
///
/// The implementor has exclusive ownership of the baud-rate, control
/// and data registers of one UART. Frames are always 8N1.
pub trait UartPort {
    /// Program the baud-rate divisor, select 8N1 framing and enable the
    /// transmitter
    fn configure(&mut self, config: &UartConfig);

    /// Enable the receiver and its "receive complete" interrupt
    fn enable_receiver(&mut self);

    /// Write one byte to the transmit data register
    fn write_data(&mut self, byte: u8);

    /// Read the receive data register
    fn read_data(&mut self) -> u8;

    /// Enable or disable the "data register empty" interrupt that drains
    /// the transmit queue
    fn set_tx_interrupt(&mut self, enabled: bool);
}

impl<T: UartPort + ?Sized> UartPort for &mut T {
    fn configure(&mut self, config: &UartConfig) {
        (**self).configure(config);
    }

    fn enable_receiver(&mut self) {
        (**self).enable_receiver();
    }

    fn write_data(&mut self, byte: u8) {
        (**self).write_data(byte);
    }

    fn read_data(&mut self) -> u8 {
        (**self).read_data()
    }

    fn set_tx_interrupt(&mut self, enabled: bool) {
        (**self).set_tx_interrupt(enabled);
    }
}

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Wait until every queued byte has left the data register
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Blocks until the buffer is filled or an error occurs.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// CPU clock feeding the baud-rate generator, in Hz
    pub cpu_hz: u32,
}

impl UartConfig {
    /// Create a configuration for the given clock and baud rate
    pub const fn new(cpu_hz: u32, baudrate: u32) -> Self {
        Self { baudrate, cpu_hz }
    }

    /// Baud-rate register value for 16x oversampling
    ///
    /// `cpu_hz / (16 * baudrate) - 1`, truncated. Saturates at 0 for
    /// baud rates the clock cannot reach and at `u16::MAX` for very slow
    /// ones.
    pub const fn divisor(&self) -> u16 {
        if self.baudrate == 0 {
            return u16::MAX;
        }
        let ticks = self.cpu_hz as u64 / (16 * self.baudrate as u64);
        let value = ticks.saturating_sub(1);
        if value > u16::MAX as u64 {
            u16::MAX
        } else {
            value as u16
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 38_400,
            cpu_hz: 8_000_000,
        }
    }
}
