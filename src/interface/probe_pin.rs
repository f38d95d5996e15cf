//! Probe input backed by an embedded-hal digital pin.

use embedded_hal::digital::InputPin;

use super::{Probe, ProbeDirection};

/// [`Probe`] reading an `InputPin`.
///
/// The pin level is normalized for wiring (`active_low`) and then inverted
/// while probing away from the workpiece, so `is_triggered` always means
/// "stop now".
pub struct PinProbe<P: InputPin> {
    pin: P,
    active_low: bool,
    invert: bool,
}

impl<P: InputPin> PinProbe<P> {
    /// Probe that reads high on contact.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            invert: false,
        }
    }

    /// Probe that pulls the pin low on contact (normally-open to ground).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            invert: false,
        }
    }

    /// Release the underlying pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Probe for PinProbe<P> {
    fn configure(&mut self, direction: ProbeDirection) {
        self.invert = direction == ProbeDirection::Away;
    }

    fn is_triggered(&mut self) -> bool {
        // A pin that cannot be read must not let a probe cycle start
        match self.pin.is_high() {
            Ok(high) => (high != self.active_low) != self.invert,
            Err(_) => true,
        }
    }
}
