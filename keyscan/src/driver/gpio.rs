use embedded_hal::digital::{InputPin, OutputPin};

/// Wrapper for an embedded-hal output pin that knows its active level.
/// Row strobe lines go through this so the scan core never deals with
/// polarity directly.
pub(crate) struct OutputController<P: OutputPin> {
    pin: P,
    low_active: bool,
}

impl<P: OutputPin> OutputController<P> {
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    /// Activate the GPIO pin
    pub fn activate(&mut self) {
        if self.low_active {
            self.pin.set_low().ok();
        } else {
            self.pin.set_high().ok();
        }
    }

    /// Deactivate the GPIO pin
    pub fn deactivate(&mut self) {
        if self.low_active {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }
}

/// Input twin of [`OutputController`]: a column read line with a
/// configurable active level.
pub(crate) struct InputController<P: InputPin> {
    pin: P,
    low_active: bool,
}

impl<P: InputPin> InputController<P> {
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    /// Whether the line currently reads active (key pulls it to the
    /// active level while its row is strobed).
    pub fn is_active(&mut self) -> bool {
        if self.low_active {
            self.pin.is_low().ok().unwrap_or_default()
        } else {
            self.pin.is_high().ok().unwrap_or_default()
        }
    }
}
