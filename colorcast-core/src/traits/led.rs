//! Status LED trait

/// Single status LED
pub trait StatusLed {
    /// Drive the LED on or off
    fn set_on(&mut self, on: bool);
}
