//! Button tasks
//!
//! One instance per input. Each falling edge overwrites the pending event;
//! presses between two setpoint passes collapse to the last one.

use defmt::*;
use embassy_rp::gpio::Input;

use hearth_core::state::ButtonEvent;

use crate::channels::BUTTONS;

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut input: Input<'static>, event: ButtonEvent) {
    info!("Button task started for {}", event);

    loop {
        input.wait_for_falling_edge().await;
        BUTTONS.press(event);
        debug!("Button: {}", event);
    }
}
