//! Frame submitter task
//!
//! Ticks the transfer submitter at a fixed cadence. A busy transport is
//! not an error: the same frame is offered again on the next tick.

use colorcast_core::pipeline::{TickOutcome, TransferSubmitter};
use colorcast_hal_rp2040::UvcTransport;
use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::UVC;
use crate::source::Source;

#[embassy_executor::task]
pub async fn video_task(mut submitter: TransferSubmitter<'static, Source>, tick_interval_ms: u32) {
    info!("Video task started ({} ms tick)", tick_interval_ms);

    let mut transport = UvcTransport::new(&UVC);
    let mut ticker = Ticker::every(Duration::from_millis(tick_interval_ms as u64));
    let mut streaming = false;

    loop {
        match submitter.tick(&mut transport) {
            TickOutcome::Idle => {}
            TickOutcome::Stopped => {
                info!("Stream stopped");
                streaming = false;
            }
            TickOutcome::Submitted { phase } => {
                if !streaming {
                    info!("Stream started");
                    streaming = true;
                }
                trace!("Frame {} submitted", phase);
            }
            TickOutcome::Busy { .. } => {}
            TickOutcome::Failed(e) => {
                warn!("Frame submission failed: {}", e);
            }
        }

        ticker.next().await;
    }
}
