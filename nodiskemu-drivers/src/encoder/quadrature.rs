//! Quadrature decoding
//!
//! Detent encoders rest with both channels high. One click runs through
//! all four Gray-code states:
//!
//! ```text
//! CW:  (1,1) -> (0,1) -> (0,0) -> (1,0) -> (1,1)   A falls first
//! CCW: (1,1) -> (1,0) -> (0,0) -> (0,1) -> (1,1)   B falls first
//! ```
//!
//! A step is reported when a channel rises again after both were low.
//! Contact bounce that returns to (1,1) before reaching (0,0) is dropped.

/// Rotation direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Decoder state machine fed with raw channel levels
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: State,
    last_a: bool,
    last_b: bool,
}

impl QuadratureDecoder {
    /// Create a decoder starting from the current channel levels
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last_a: a,
            last_b: b,
        }
    }

    /// Feed one sample; returns a direction when a detent completes
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        if a == self.last_a && b == self.last_b {
            return None;
        }
        self.last_a = a;
        self.last_b = b;

        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // bounce
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 if a || b => {
                self.state = State::Idle;
                Some(Direction::Clockwise)
            }
            State::CcwStep2 if a || b => {
                self.state = State::Idle;
                Some(Direction::CounterClockwise)
            }
            State::CwStep2 | State::CcwStep2 => None,
        }
    }
}
