//! Fatal fault handling

use defmt::*;

use hearth_core::fault::FaultKind;

/// Stop all forward progress
///
/// The caller is responsible for forcing the heater off first if one has
/// been brought up.
pub fn halt(fault: FaultKind) -> ! {
    error!("Fatal {}: halting", fault);
    loop {
        cortex_m::asm::wfi();
    }
}
