//! Fixed-capacity byte ring buffer
//!
//! `RingBuffer<N>` is the storage behind both serial queues. It keeps a
//! write index owned by the producer and a read index owned by the
//! consumer, both wrapped with the mask `N - 1`.
//!
//! # Constraints
//!
//! - `N` must be a power of two and at least 2. This is checked at
//!   compile time when the buffer is constructed.
//! - One slot is always left unused so that "full" and "empty" can be
//!   told apart from the indices alone: the buffer holds at most `N - 1`
//!   bytes.
//! - The type itself does no locking. [`crate::serial::Serial`] wraps it
//!   in a critical-section mutex when it is shared with an interrupt
//!   handler.

/// A fixed-capacity FIFO of bytes.
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize> {
    buf: [u8; N],
    /// Index of the next slot to write to.
    write: usize,
    /// Index of the next slot to read from.
    read: usize,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = N - 1;

    const SIZE_IS_POWER_OF_TWO: () = assert!(
        N >= 2 && N.is_power_of_two(),
        "ring buffer size must be a power of two"
    );

    /// Create a new, empty ring buffer.
    ///
    /// `const` so that buffers may be placed in a `static`.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SIZE_IS_POWER_OF_TWO;
        Self {
            buf: [0; N],
            write: 0,
            read: 0,
        }
    }

    #[inline]
    const fn next(index: usize) -> usize {
        (index + 1) & Self::MASK
    }

    /// Append a byte.
    ///
    /// # Errors
    ///
    /// Returns the byte back if the buffer is full. Queued data is never
    /// overwritten.
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        let next = Self::next(self.write);
        if next == self.read {
            return Err(byte);
        }
        self.buf[self.write] = byte;
        self.write = next;
        Ok(())
    }

    /// Remove and return the oldest byte, or `None` if empty.
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.buf[self.read];
        self.read = Self::next(self.read);
        Some(byte)
    }

    /// Look at the oldest byte without removing it.
    pub fn peek(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.buf[self.read])
        }
    }

    /// `true` when no bytes are queued.
    pub fn is_empty(&self) -> bool {
        self.write == self.read
    }

    /// `true` when another `push` would fail.
    pub fn is_full(&self) -> bool {
        Self::next(self.write) == self.read
    }

    /// Number of bytes currently queued.
    pub fn len(&self) -> usize {
        self.write.wrapping_sub(self.read) & Self::MASK
    }

    /// Maximum number of bytes the buffer can hold (`N - 1`).
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Drop all queued bytes and rewind both indices to 0.
    pub fn reset(&mut self) {
        self.write = 0;
        self.read = 0;
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let ring = RingBuffer::<8>::new();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 7);
    }

    #[test]
    fn test_fifo_order() {
        let mut ring = RingBuffer::<8>::new();
        ring.push(1).unwrap();
        ring.push(2).unwrap();
        ring.push(3).unwrap();

        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), None);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_one_slot_is_sacrificed() {
        let mut ring = RingBuffer::<4>::new();
        assert_eq!(ring.push(10), Ok(()));
        assert_eq!(ring.push(11), Ok(()));
        assert_eq!(ring.push(12), Ok(()));
        assert!(ring.is_full());
        assert_eq!(ring.len(), 3);

        // Full: the byte comes back and nothing is overwritten
        assert_eq!(ring.push(13), Err(13));
        assert_eq!(ring.pop(), Some(10));
        assert_eq!(ring.pop(), Some(11));
        assert_eq!(ring.pop(), Some(12));
    }

    #[test]
    fn test_indices_wrap() {
        let mut ring = RingBuffer::<4>::new();
        for round in 0..10u8 {
            ring.push(round).unwrap();
            ring.push(round.wrapping_add(100)).unwrap();
            assert_eq!(ring.len(), 2);
            assert_eq!(ring.peek(), Some(round));
            assert_eq!(ring.pop(), Some(round));
            assert_eq!(ring.pop(), Some(round.wrapping_add(100)));
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut ring = RingBuffer::<16>::new();
        ring.push(0xAA).unwrap();
        ring.reset();
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);
    }
}
