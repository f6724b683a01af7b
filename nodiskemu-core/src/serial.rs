//! Interrupt-driven UART queues
//!
//! [`Serial`] owns the UART port, the transmit queue and (with the
//! `receive` feature) the receive queue. Foreground code and interrupt
//! handlers share one instance, typically a `static`:
//!
//! ```text
//! foreground                     interrupt handlers
//! ──────────                     ──────────────────
//! put_byte ──► TX ring ──► on_tx_ready  (data register empty)
//! try_read ◄── RX ring ◄── on_rx_complete (receive complete)
//! ```
//!
//! Every index update happens inside a critical section, so the other
//! context only ever sees a fully written index. Blocking calls
//! (`put_byte` on a full queue, `flush`, `blocking_read`) take the
//! critical section once per poll and spin in between, which lets the
//! interrupt handler run. None of them has a timeout.

use core::cell::RefCell;
use core::hint::spin_loop;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nodiskemu_hal::{UartConfig, UartPort};

use crate::console::Console;
use crate::error::SerialError;
use crate::ring::RingBuffer;

struct State<P, const TX: usize, const RX: usize> {
    port: Option<P>,
    tx: RingBuffer<TX>,
    #[cfg(feature = "receive")]
    rx: RingBuffer<RX>,
    #[cfg(feature = "receive")]
    rx_overflows: u8,
}

impl<P: UartPort, const TX: usize, const RX: usize> State<P, TX, RX> {
    #[cfg(feature = "receive")]
    fn store_received(&mut self, byte: u8) {
        if self.rx.push(byte).is_err() {
            self.rx_overflows = self.rx_overflows.saturating_add(1);
        }
    }
}

/// UART driver with a `TX`-byte transmit ring and an `RX`-byte receive ring
///
/// Both sizes must be powers of two. A transmit queue of `TX` bytes holds
/// at most `TX - 1` pending bytes.
///
/// Call [`Serial::init`] exactly once before use. Bytes written before
/// `init` are queued but nothing drains them, and they are discarded by
/// `init`.
pub struct Serial<P, const TX: usize, const RX: usize> {
    state: Mutex<CriticalSectionRawMutex, RefCell<State<P, TX, RX>>>,
}

impl<P, const TX: usize, const RX: usize> Serial<P, TX, RX> {
    /// Create an uninitialised driver with empty queues
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(State {
                port: None,
                tx: RingBuffer::new(),
                #[cfg(feature = "receive")]
                rx: RingBuffer::new(),
                #[cfg(feature = "receive")]
                rx_overflows: 0,
            })),
        }
    }
}

impl<P, const TX: usize, const RX: usize> Default for Serial<P, TX, RX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: UartPort, const TX: usize, const RX: usize> Serial<P, TX, RX> {
    /// Take ownership of the port, program it and reset the queues
    ///
    /// With the `receive` feature the receiver and its interrupt are
    /// enabled as well, and the overflow counter is cleared.
    pub fn init(&self, port: P, config: &UartConfig) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let mut port = port;
            port.configure(config);
            state.tx.reset();

            #[cfg(feature = "receive")]
            {
                state.rx.reset();
                state.rx_overflows = 0;
                port.enable_receiver();
            }

            state.port = Some(port);
        });

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "serial: {} baud, divisor {}, tx {} bytes",
            config.baudrate,
            config.divisor(),
            TX
        );
    }

    /// Get a console handle for formatted output
    pub fn console(&self) -> Console<'_, P, TX, RX> {
        Console::new(self)
    }

    /// Queue a byte without blocking
    ///
    /// The drain interrupt is enabled afterwards whether or not the byte
    /// fit, so a full queue always keeps draining.
    ///
    /// # Errors
    ///
    /// [`SerialError::TxFull`] if there is no free slot. The queue is
    /// left unchanged.
    pub fn try_put_byte(&self, byte: u8) -> Result<(), SerialError> {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let state = &mut *state;
            let result = state.tx.push(byte).map_err(|_| SerialError::TxFull);
            if let Some(port) = state.port.as_mut() {
                port.set_tx_interrupt(true);
            }
            result
        })
    }

    /// Queue a byte, spinning until there is room
    ///
    /// Never drops or overwrites data. Blocks forever if nothing drains
    /// the queue (for instance before [`Serial::init`]).
    pub fn put_byte(&self, byte: u8) {
        while self.try_put_byte(byte).is_err() {
            spin_loop();
        }
    }

    /// Spin until every queued byte has been handed to the data register
    pub fn flush(&self) {
        while !self.tx_is_empty() {
            spin_loop();
        }
    }

    /// `true` when the transmit queue is empty
    pub fn tx_is_empty(&self) -> bool {
        self.state.lock(|state| state.borrow().tx.is_empty())
    }

    /// Number of bytes waiting in the transmit queue
    pub fn tx_pending(&self) -> usize {
        self.state.lock(|state| state.borrow().tx.len())
    }

    /// Drain step, called once per "data register empty" interrupt
    ///
    /// Sends the oldest queued byte, or disables the interrupt when there
    /// is nothing left to send.
    pub fn on_tx_ready(&self) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let State { port, tx, .. } = &mut *state;
            let Some(port) = port.as_mut() else {
                return;
            };
            match tx.pop() {
                Some(byte) => port.write_data(byte),
                None => port.set_tx_interrupt(false),
            }
        });
    }
}

#[cfg(feature = "receive")]
impl<P: UartPort, const TX: usize, const RX: usize> Serial<P, TX, RX> {
    /// Receive step, called once per "receive complete" interrupt
    ///
    /// Reads the data register and queues the byte. When the queue is
    /// full the new byte is dropped and the overflow counter goes up.
    pub fn on_rx_complete(&self) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let Some(byte) = state.port.as_mut().map(|port| port.read_data()) else {
                return;
            };
            state.store_received(byte);
        });
    }

    /// Queue a byte the platform has already read from the UART
    ///
    /// Same overflow behaviour as [`Serial::on_rx_complete`].
    pub fn receive_byte(&self, byte: u8) {
        self.state
            .lock(|state| state.borrow_mut().store_received(byte));
    }

    /// Take the oldest received byte, if any
    pub fn try_read(&self) -> Option<u8> {
        self.state.lock(|state| state.borrow_mut().rx.pop())
    }

    /// Spin until a byte has been received and return it
    ///
    /// There is no timeout. Callers that need bounded latency should
    /// poll [`Serial::try_read`] instead.
    pub fn blocking_read(&self) -> u8 {
        loop {
            if let Some(byte) = self.try_read() {
                return byte;
            }
            spin_loop();
        }
    }

    /// `true` when no received byte is waiting
    pub fn rx_is_empty(&self) -> bool {
        self.state.lock(|state| state.borrow().rx.is_empty())
    }

    /// Number of received bytes waiting to be read
    pub fn rx_pending(&self) -> usize {
        self.state.lock(|state| state.borrow().rx.len())
    }

    /// Bytes dropped because the receive queue was full (saturates at 255)
    pub fn rx_overflows(&self) -> u8 {
        self.state.lock(|state| state.borrow().rx_overflows)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex as StdMutex};
    use std::vec::Vec;

    #[derive(Default)]
    struct PortLog {
        sent: Vec<u8>,
        incoming: VecDeque<u8>,
        tx_irq: bool,
        receiver_enabled: bool,
        divisor: Option<u16>,
    }

    /// Mock UART recording register writes
    #[derive(Clone, Default)]
    pub(crate) struct MockPort {
        log: Arc<StdMutex<PortLog>>,
    }

    impl MockPort {
        pub(crate) fn sent(&self) -> Vec<u8> {
            self.log.lock().unwrap().sent.clone()
        }

        pub(crate) fn tx_irq(&self) -> bool {
            self.log.lock().unwrap().tx_irq
        }

        fn feed(&self, byte: u8) {
            self.log.lock().unwrap().incoming.push_back(byte);
        }
    }

    impl UartPort for MockPort {
        fn configure(&mut self, config: &UartConfig) {
            self.log.lock().unwrap().divisor = Some(config.divisor());
        }

        fn enable_receiver(&mut self) {
            self.log.lock().unwrap().receiver_enabled = true;
        }

        fn write_data(&mut self, byte: u8) {
            self.log.lock().unwrap().sent.push(byte);
        }

        fn read_data(&mut self) -> u8 {
            self.log.lock().unwrap().incoming.pop_front().unwrap_or(0)
        }

        fn set_tx_interrupt(&mut self, enabled: bool) {
            self.log.lock().unwrap().tx_irq = enabled;
        }
    }

    pub(crate) type TestSerial = Serial<MockPort, 8, 8>;

    pub(crate) fn setup() -> (TestSerial, MockPort) {
        let serial = TestSerial::new();
        let port = MockPort::default();
        serial.init(port.clone(), &UartConfig::default());
        (serial, port)
    }

    /// Run the drain interrupt until it switches itself off
    pub(crate) fn drain(serial: &TestSerial, port: &MockPort) {
        while port.tx_irq() {
            serial.on_tx_ready();
        }
    }

    #[test]
    fn test_init_programs_port() {
        let (_serial, port) = setup();
        let log = port.log.lock().unwrap();
        assert_eq!(log.divisor, Some(12));
        assert_eq!(log.receiver_enabled, cfg!(feature = "receive"));
        assert!(!log.tx_irq);
    }

    #[test]
    fn test_put_byte_enables_drain_interrupt() {
        let (serial, port) = setup();
        serial.put_byte(b'x');
        assert!(port.tx_irq());
        assert_eq!(serial.tx_pending(), 1);
        assert!(port.sent().is_empty());
    }

    #[test]
    fn test_drain_round_trip() {
        let (serial, port) = setup();
        for byte in [1, 2, 3] {
            serial.put_byte(byte);
        }

        serial.on_tx_ready();
        serial.on_tx_ready();
        serial.on_tx_ready();

        assert_eq!(port.sent(), [1, 2, 3]);
        assert!(serial.tx_is_empty());
        // Interrupt stays on until a drain step finds the queue empty
        assert!(port.tx_irq());
        serial.on_tx_ready();
        assert!(!port.tx_irq());
    }

    #[test]
    fn test_try_put_byte_on_full_queue() {
        let (serial, port) = setup();
        for byte in 0..7 {
            serial.try_put_byte(byte).unwrap();
        }
        assert_eq!(serial.try_put_byte(99), Err(SerialError::TxFull));
        assert!(port.tx_irq());

        drain(&serial, &port);
        assert_eq!(port.sent(), [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_drain_before_init_is_ignored() {
        let serial = TestSerial::new();
        serial.try_put_byte(5).unwrap();
        serial.on_tx_ready();
        assert_eq!(serial.tx_pending(), 1);
    }

    #[test]
    fn test_put_byte_waits_for_space() {
        let (serial, port) = setup();
        for byte in 0..7 {
            serial.put_byte(byte);
        }

        std::thread::scope(|s| {
            s.spawn(|| {
                // Background "interrupt" frees one slot
                std::thread::sleep(std::time::Duration::from_millis(10));
                serial.on_tx_ready();
            });
            serial.put_byte(7);
        });

        drain(&serial, &port);
        assert_eq!(port.sent(), [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_flush_waits_for_drain() {
        let (serial, port) = setup();
        for &byte in b"hello" {
            serial.put_byte(byte);
        }

        std::thread::scope(|s| {
            s.spawn(|| {
                while port.tx_irq() {
                    serial.on_tx_ready();
                    std::thread::yield_now();
                }
            });
            serial.flush();
            assert_eq!(port.sent(), b"hello");
        });
    }

    #[cfg(feature = "receive")]
    #[test]
    fn test_receive_fifo() {
        let (serial, port) = setup();
        assert!(serial.rx_is_empty());
        assert_eq!(serial.try_read(), None);

        port.feed(b'a');
        port.feed(b'b');
        serial.on_rx_complete();
        serial.on_rx_complete();

        assert!(!serial.rx_is_empty());
        assert_eq!(serial.rx_pending(), 2);
        assert_eq!(serial.try_read(), Some(b'a'));
        assert_eq!(serial.try_read(), Some(b'b'));
        assert!(serial.rx_is_empty());
    }

    #[cfg(feature = "receive")]
    #[test]
    fn test_receive_overflow_keeps_oldest() {
        let (serial, _port) = setup();
        // Eight bytes into an 8-byte ring: seven fit, the last is dropped
        for byte in 0..8 {
            serial.receive_byte(byte);
        }
        assert_eq!(serial.rx_overflows(), 1);

        let mut received = Vec::new();
        while let Some(byte) = serial.try_read() {
            received.push(byte);
        }
        assert_eq!(received, [0, 1, 2, 3, 4, 5, 6]);
    }

    #[cfg(feature = "receive")]
    #[test]
    fn test_overflow_counter_saturates_and_resets() {
        let (serial, port) = setup();
        for _ in 0..300 {
            serial.receive_byte(0x55);
        }
        assert_eq!(serial.rx_overflows(), 255);

        serial.init(port, &UartConfig::default());
        assert_eq!(serial.rx_overflows(), 0);
        assert!(serial.rx_is_empty());
    }

    #[cfg(feature = "receive")]
    #[test]
    fn test_blocking_read_waits_for_byte() {
        let (serial, _port) = setup();
        std::thread::scope(|s| {
            s.spawn(|| {
                std::thread::sleep(std::time::Duration::from_millis(10));
                serial.receive_byte(0x42);
            });
            assert_eq!(serial.blocking_read(), 0x42);
        });
    }
}
