//! Status LED task
//!
//! Toggles the LED on a ticker whose period follows the USB connection
//! state. Each connection event restarts the ticker at the new period.
//! Events that arrive faster than they are handled collapse to the newest.

use colorcast_core::config::StatusConfig;
use colorcast_core::status::StatusIndicator;
use colorcast_hal_rp2040::GpioLed;
use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use crate::channels::UVC;

#[embassy_executor::task]
pub async fn blinky_task(mut led: GpioLed<'static>, config: StatusConfig) {
    info!("Blinky task started");

    let mut indicator = StatusIndicator::new(config);
    let mut ticker = Ticker::every(period(&indicator));

    loop {
        match select(ticker.next(), UVC.next_event()).await {
            Either::First(()) => indicator.toggle(&mut led),
            Either::Second(event) => {
                let blink = indicator.on_event(event, &UVC);
                info!(
                    "USB {}: blink {} every {} ms",
                    event,
                    blink,
                    indicator.period_ms()
                );
                ticker = Ticker::every(period(&indicator));
            }
        }
    }
}

fn period(indicator: &StatusIndicator) -> Duration {
    Duration::from_millis(indicator.period_ms() as u64)
}
