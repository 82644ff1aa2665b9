//! Tick task
//!
//! Advances the scheduler at the configured tick period and wakes the main
//! loop when any entry triggered.

use defmt::*;
use embassy_time::{Duration, Ticker};

use hearth_core::scheduler::Scheduler;

use crate::channels::WORK_PENDING;

#[embassy_executor::task]
pub async fn tick_task(scheduler: &'static Scheduler) {
    let period_ms = scheduler.tick_period_ms();
    info!("Tick task started ({} ms)", period_ms);

    // Ticker catches up on missed ticks, so a long dispatch pass delays
    // ticks but never drops them
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));

    loop {
        ticker.next().await;

        if scheduler.tick() {
            WORK_PENDING.signal(());
        }
    }
}
