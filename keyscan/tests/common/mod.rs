#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use embassy_time::{Duration, MockDriver};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use keyscan::event::{ChatterEvent, EventSink, KeyEvent};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// The mock time driver is process-global; tests that advance it must hold
/// this lock so parallel tests don't skew each other's elapsed-tick math.
pub fn time_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Advance the mock clock by `ms` milliseconds.
pub fn advance_ms(ms: u64) {
    MockDriver::get().advance(Duration::from_millis(ms));
}

/// Fake embedded-hal pin with a shared electrical level and I/O counters.
/// Clones share the same state, so the test keeps a handle to a pin it
/// moved into the matrix.
#[derive(Clone, Default)]
pub struct TestPin {
    level: Rc<Cell<bool>>,
    reads: Rc<Cell<u32>>,
    writes: Rc<Cell<u32>>,
}

impl TestPin {
    pub fn new(high: bool) -> Self {
        let pin = TestPin::default();
        pin.level.set(high);
        pin
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }

    pub fn is_high_level(&self) -> bool {
        self.level.get()
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl ErrorType for TestPin {
    type Error = core::convert::Infallible;
}

impl InputPin for TestPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        Ok(!self.level.get())
    }
}

impl OutputPin for TestPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.set(self.writes.get() + 1);
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.set(self.writes.get() + 1);
        self.level.set(true);
        Ok(())
    }
}

/// Sink that records every event for later assertions.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub keys: Rc<RefCell<Vec<KeyEvent>>>,
    pub chatter: Rc<RefCell<Vec<ChatterEvent>>>,
}

impl EventSink for RecordingSink {
    fn key_event(&mut self, event: KeyEvent) {
        self.keys.borrow_mut().push(event);
    }

    fn chatter(&mut self, event: ChatterEvent) {
        self.chatter.borrow_mut().push(event);
    }
}
