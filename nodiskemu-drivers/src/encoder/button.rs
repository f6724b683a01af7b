//! Push button debouncing
//!
//! The raw level is recorded with a timestamp on every change. A level
//! is trusted only once it has been stable for the debounce interval.

/// Timer ticks (milliseconds), wrapping
pub type Tick = u32;

/// Debounce state for one button
#[derive(Debug, Clone)]
pub struct Debouncer {
    pressed: bool,
    last_change: Tick,
    reported: bool,
}

impl Debouncer {
    /// Start from a known level; no event is reported for it
    pub const fn new(pressed: bool, now: Tick) -> Self {
        Self {
            pressed,
            last_change: now,
            reported: pressed,
        }
    }

    /// Record a raw sample; returns `true` if the level changed
    pub fn record(&mut self, pressed: bool, now: Tick) -> bool {
        if pressed == self.pressed {
            return false;
        }
        self.pressed = pressed;
        self.last_change = now;
        true
    }

    /// Raw level as last recorded
    pub fn raw(&self) -> bool {
        self.pressed
    }

    /// Tick of the last raw change
    pub fn last_change(&self) -> Tick {
        self.last_change
    }

    /// Debounced level, or `None` while the last change is too recent
    pub fn stable(&self, now: Tick, debounce: Tick) -> Option<bool> {
        if now.wrapping_sub(self.last_change) >= debounce {
            Some(self.pressed)
        } else {
            None
        }
    }

    /// Debounced level, returned once per change
    pub fn poll(&mut self, now: Tick, debounce: Tick) -> Option<bool> {
        let level = self.stable(now, debounce)?;
        if level == self.reported {
            return None;
        }
        self.reported = level;
        Some(level)
    }
}
