//! GPIO pin abstractions
//!
//! Provides traits for the digital lines the front panel drivers toggle
//! and sample. Register access is infallible on the targets we run on,
//! so none of these methods return a `Result`.

/// Digital output pin
///
/// Implementations own the data-direction and output-data bits for a
/// single line.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Four data lines sharing one output port
///
/// Used by the character LCD in 4-bit mode. The lines sit in the low
/// nibble of a port whose upper bits belong to other peripherals, so an
/// implementation must update only the low four bits
/// (`port = (port & 0xF0) | (nibble & 0x0F)`).
pub trait NibbleBus {
    /// Drive the four data lines with the low nibble of `nibble`
    fn write_nibble(&mut self, nibble: u8);
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

impl<T: NibbleBus + ?Sized> NibbleBus for &mut T {
    fn write_nibble(&mut self, nibble: u8) {
        (**self).write_nibble(nibble);
    }
}
