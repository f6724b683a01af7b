//! Rotary encoder and push button poller
//!
//! Two entry points advance the state:
//!
//! - [`Encoder::tick`] from a periodic timer (1-5 ms) samples the A/B
//!   channels and updates the position counter
//! - [`Encoder::button_isr`] from the button's pin-change interrupt
//!   records the raw level and when it changed
//!
//! Foreground code reads [`Encoder::position`] / [`Encoder::take_position`]
//! and the debounced button state. When the encoder is shared with an
//! interrupt handler, keep it in a critical-section mutex the same way
//! `nodiskemu_core::Serial` keeps its queues.

mod button;
mod quadrature;

pub use button::{Debouncer, Tick};
pub use quadrature::{Direction, QuadratureDecoder};

use nodiskemu_hal::InputPin;

/// Encoder timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Ticks a button level must hold before it is trusted
    pub debounce_ticks: Tick,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { debounce_ticks: 20 }
    }
}

/// Input events from the front panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder rotated clockwise (1 detent)
    EncoderCw,
    /// Encoder rotated counter-clockwise (1 detent)
    EncoderCcw,
    /// Button pressed (debounced)
    ButtonPressed,
    /// Button released (debounced)
    ButtonReleased,
}

/// Quadrature encoder with an active-low push button
pub struct Encoder<A, B, BTN> {
    a: A,
    b: B,
    button: BTN,
    config: EncoderConfig,
    decoder: QuadratureDecoder,
    debouncer: Debouncer,
    position: i8,
}

impl<A: InputPin, B: InputPin, BTN: InputPin> Encoder<A, B, BTN> {
    /// Create the poller, sampling all three lines at `now`
    pub fn new(a: A, b: B, button: BTN, config: EncoderConfig, now: Tick) -> Self {
        let decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
        let debouncer = Debouncer::new(button.is_low(), now);

        #[cfg(feature = "defmt")]
        defmt::debug!("encoder: debounce {} ticks", config.debounce_ticks);

        Self {
            a,
            b,
            button,
            config,
            decoder,
            debouncer,
            position: 0,
        }
    }

    /// Periodic sampling of the A/B channels
    ///
    /// Returns the rotation event for a completed detent. The position
    /// counter moves by one per detent and wraps like an `i8`.
    pub fn tick(&mut self) -> Option<InputEvent> {
        let direction = self.decoder.update(self.a.is_high(), self.b.is_high())?;
        match direction {
            Direction::Clockwise => {
                self.position = self.position.wrapping_add(1);
                Some(InputEvent::EncoderCw)
            }
            Direction::CounterClockwise => {
                self.position = self.position.wrapping_sub(1);
                Some(InputEvent::EncoderCcw)
            }
        }
    }

    /// Button pin-change handler
    pub fn button_isr(&mut self, now: Tick) {
        self.debouncer.record(self.button.is_low(), now);
    }

    /// Debounced button state, `None` while it is still settling
    pub fn button(&self, now: Tick) -> Option<bool> {
        self.debouncer.stable(now, self.config.debounce_ticks)
    }

    /// Report each debounced press and release once
    pub fn poll_button(&mut self, now: Tick) -> Option<InputEvent> {
        self.debouncer
            .poll(now, self.config.debounce_ticks)
            .map(|pressed| {
                if pressed {
                    InputEvent::ButtonPressed
                } else {
                    InputEvent::ButtonReleased
                }
            })
    }
}

impl<A, B, BTN> Encoder<A, B, BTN> {
    /// Accumulated detents since creation or the last [`Encoder::take_position`]
    pub fn position(&self) -> i8 {
        self.position
    }

    /// Read and reset the position counter
    pub fn take_position(&mut self) -> i8 {
        core::mem::take(&mut self.position)
    }

    /// Tick of the last raw button transition
    pub fn last_button_change(&self) -> Tick {
        self.debouncer.last_change()
    }

    /// Encoder configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}
