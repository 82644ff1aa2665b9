//! Main dispatch loop

use defmt::*;

use hearth_core::scheduler::Scheduler;
use hearth_core::traits::{HeaterOutput, StatusOutput, TemperatureSensor};
use hearth_core::Thermostat;

use crate::channels::{BUTTONS, WORK_PENDING};

/// Run dispatch passes forever
///
/// Sleeps until the tick task reports work, then runs every triggered task
/// body in table order. Task failures are logged and never stop the loop.
pub async fn run<S, H, O>(mut thermostat: Thermostat<S, H, O>, scheduler: &'static Scheduler) -> !
where
    S: TemperatureSensor,
    H: HeaterOutput,
    O: StatusOutput,
{
    info!("Controller running");

    loop {
        WORK_PENDING.wait().await;

        let summary = thermostat.dispatch(scheduler, &BUTTONS);
        let state = thermostat.state();
        trace!(
            "Pass: ran={} temp={} setpoint={} heater={}",
            summary.ran,
            state.temperature,
            state.setpoint.value(),
            state.heater
        );

        if let Some(e) = summary.last_error {
            warn!("{} of {} tasks failed, last: {}", summary.failed, summary.ran, e);
        }
        if summary.dropped_lines > 0 {
            warn!("{} diagnostic lines not written", summary.dropped_lines);
        }
    }
}
