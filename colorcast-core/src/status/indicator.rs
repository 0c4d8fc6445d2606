//! Blink period state machine

use crate::config::StatusConfig;
use crate::traits::{ConnectionStatus, StatusLed};

/// Connection events reported by the USB stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionEvent {
    /// Configured by the host
    Mounted,
    /// Detached or reset
    Unmounted,
    /// Bus suspended
    Suspended,
    /// Bus resumed
    Resumed,
}

/// Blink rate classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPeriod {
    #[default]
    NotMounted,
    Mounted,
    Suspended,
}

impl BlinkPeriod {
    /// Period in milliseconds
    pub fn millis(&self, config: &StatusConfig) -> u32 {
        match self {
            BlinkPeriod::NotMounted => config.not_mounted_ms,
            BlinkPeriod::Mounted => config.mounted_ms,
            BlinkPeriod::Suspended => config.suspended_ms,
        }
    }
}

/// Status LED driver state
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    config: StatusConfig,
    period: BlinkPeriod,
    led_on: bool,
}

impl StatusIndicator {
    /// Start in the not-mounted period with the LED off
    pub fn new(config: StatusConfig) -> Self {
        Self {
            config,
            period: BlinkPeriod::NotMounted,
            led_on: false,
        }
    }

    /// Apply a connection event and return the new period
    ///
    /// On resume the period follows the current mount state, so a resume
    /// while detached goes back to the not-mounted rate.
    pub fn on_event<C: ConnectionStatus>(&mut self, event: ConnectionEvent, usb: &C) -> BlinkPeriod {
        self.period = match event {
            ConnectionEvent::Mounted => BlinkPeriod::Mounted,
            ConnectionEvent::Unmounted => BlinkPeriod::NotMounted,
            ConnectionEvent::Suspended => BlinkPeriod::Suspended,
            ConnectionEvent::Resumed if usb.is_mounted() => BlinkPeriod::Mounted,
            ConnectionEvent::Resumed => BlinkPeriod::NotMounted,
        };
        self.period
    }

    /// Current blink period class
    pub fn period(&self) -> BlinkPeriod {
        self.period
    }

    /// Current period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period.millis(&self.config)
    }

    /// Timer callback: flip the LED
    pub fn toggle<L: StatusLed>(&mut self, led: &mut L) {
        self.led_on = !self.led_on;
        led.set_on(self.led_on);
    }

    /// Level set by the last toggle, off before the first one
    pub fn is_led_on(&self) -> bool {
        self.led_on
    }
}
