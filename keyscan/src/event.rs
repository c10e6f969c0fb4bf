//! Events emitted by the scanner.
//!
//! The scan core stays decoupled from any logging or transport mechanism:
//! it hands debounced transitions and chatter diagnostics to an injected
//! [`EventSink`]. [`LogSink`] routes them to the logging backend,
//! [`EventQueue`] buffers transitions for a polling firmware loop.

use heapless::Deque;

/// A debounced key state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
}

/// A history window that never settled within the debounce window:
/// mechanical chatter. `history` is the masked shift-register pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChatterEvent {
    pub row: u8,
    pub col: u8,
    pub history: u8,
}

/// Consumer of scanner events, injected into the matrix at construction.
pub trait EventSink {
    fn key_event(&mut self, event: KeyEvent);
    fn chatter(&mut self, event: ChatterEvent);
}

/// Sink that forwards everything to the logging backend.
#[derive(Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn key_event(&mut self, event: KeyEvent) {
        info!(
            "key ({},{}) {}",
            event.row,
            event.col,
            if event.pressed { "pressed" } else { "released" }
        );
    }

    fn chatter(&mut self, event: ChatterEvent) {
        warn!("bounce!: {:08b} at ({},{})", event.history, event.row, event.col);
    }
}

/// Bounded queue sink for firmware loops that poll transitions between
/// scans. Chatter is logged, not queued. A full queue drops the newest
/// event and reports it.
pub struct EventQueue<const N: usize> {
    events: Deque<KeyEvent, N>,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        EventQueue { events: Deque::new() }
    }

    /// Pop the oldest pending transition.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<const N: usize> EventSink for EventQueue<N> {
    fn key_event(&mut self, event: KeyEvent) {
        if self.events.push_back(event).is_err() {
            error!("event queue full, dropping key ({},{})", event.row, event.col);
        }
    }

    fn chatter(&mut self, event: ChatterEvent) {
        warn!("bounce!: {:08b} at ({},{})", event.history, event.row, event.col);
    }
}
