//! GPIO status LED

use colorcast_core::traits::StatusLed;
use embassy_rp::gpio::{Level, Output};

/// LED on a push-pull output
///
/// `active_low` inverts the drive level for boards that sink the LED
/// current.
pub struct GpioLed<'d> {
    pin: Output<'d>,
    active_low: bool,
}

impl<'d> GpioLed<'d> {
    /// Wrap an output pin driving the LED
    pub fn new(pin: Output<'d>, active_low: bool) -> Self {
        Self { pin, active_low }
    }
}

impl StatusLed for GpioLed<'_> {
    fn set_on(&mut self, on: bool) {
        let level = if on != self.active_low {
            Level::High
        } else {
            Level::Low
        };
        self.pin.set_level(level);
    }
}
