//! Hearth - Thermostat Firmware
//!
//! Main firmware binary for RP2040-based thermostat boards.
//!
//! Board wiring:
//! - UART0 TX on GPIO0: status records and diagnostics (115200 8N1 default)
//! - I2C0 SCL/SDA on GPIO5/GPIO4: TMP-family temperature sensor
//! - GPIO25: heater actuator (on-board LED on a Pico)
//! - GPIO14/GPIO15: setpoint increase/decrease buttons, active low

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::uart::{self, UartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hearth_core::fault::FaultKind;
use hearth_core::report::Diagnostic;
use hearth_core::scheduler::Scheduler;
use hearth_core::state::ButtonEvent;
use hearth_core::traits::{HeaterOutput, StatusOutput};
use hearth_core::{Thermostat, ThermostatState};
use hearth_drivers::heater::GpioHeater;
use hearth_drivers::sensor::detect_with_transcript;
use hearth_drivers::serial::UartStatusOutput;
use hearth_hal::uart::{DataBits, Parity, StopBits};
use hearth_hal::{EhI2c, EhOutput, I2cConfig, IoUart, UartConfig};

mod channels;
mod config;
mod controller;
mod fault;
mod tasks;

use crate::fault::halt;

/// Task table shared with the tick task
static SCHEDULER: StaticCell<Scheduler> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hearth thermostat starting...");

    let config = config::load();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Status output first, so bring-up problems reach the console
    let Some(uart_config) = rp_uart_config(&config.uart) else {
        halt(FaultKind::Transport);
    };
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);
    let mut output = UartStatusOutput::new(IoUart::new(tx));
    info!("UART initialized at {} baud", config.uart.baudrate);

    // Sensor bus
    let _ = output.emit(Diagnostic::BusInitStarted);
    let Some(i2c_config) = rp_i2c_config(&config.i2c) else {
        let _ = output.emit(Diagnostic::BusInitResult { passed: false });
        halt(FaultKind::Transport);
    };
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let _ = output.emit(Diagnostic::BusInitResult { passed: true });
    info!("I2C initialized at {} Hz", config.i2c.frequency);

    let detection = detect_with_transcript(EhI2c::new(bus), &mut output);
    let sensor = detection.into_sensor();
    info!(
        "Sensor: TMP{} at {=u8:#x}",
        sensor.model().id,
        sensor.model().address
    );

    // Heater line starts at its off level
    let active_low = config.heater_active_low;
    let off_level = if active_low { Level::High } else { Level::Low };
    let pin = EhOutput::new(Output::new(p.PIN_25, off_level), active_low);
    let heater = GpioHeater::new(pin, active_low);
    if heater.is_on() {
        halt(FaultKind::Actuator);
    }
    info!("Heater initialized (active_low={})", active_low);

    let mut thermostat = Thermostat::new(
        sensor,
        heater,
        output,
        ThermostatState::from_config(&config),
    );

    let scheduler: &'static Scheduler = SCHEDULER.init(Scheduler::from_config(&config));

    let increase = Input::new(p.PIN_14, Pull::Up);
    let decrease = Input::new(p.PIN_15, Pull::Up);

    if let Err(fault) = spawn_tasks(&spawner, scheduler, increase, decrease) {
        thermostat.shutdown();
        halt(fault);
    }
    info!("All tasks spawned, thermostat running");

    controller::run(thermostat, scheduler).await
}

/// Start the tick source and the button inputs
fn spawn_tasks(
    spawner: &Spawner,
    scheduler: &'static Scheduler,
    increase: Input<'static>,
    decrease: Input<'static>,
) -> Result<(), FaultKind> {
    spawner.spawn(tasks::tick_task(scheduler).map_err(|_| FaultKind::TickSource)?);
    spawner.spawn(
        tasks::button_task(increase, ButtonEvent::Increase).map_err(|_| FaultKind::Config)?,
    );
    spawner.spawn(
        tasks::button_task(decrease, ButtonEvent::Decrease).map_err(|_| FaultKind::Config)?,
    );
    Ok(())
}

/// Map the board-agnostic UART settings onto the RP2040 peripheral
///
/// The PL011 has no 9-bit mode.
fn rp_uart_config(cfg: &UartConfig) -> Option<uart::Config> {
    let mut out = uart::Config::default();
    out.baudrate = cfg.baudrate;
    out.data_bits = match cfg.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
        DataBits::Nine => return None,
    };
    out.parity = match cfg.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match cfg.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    Some(out)
}

/// RP2040 I2C tops out at fast-mode plus
fn rp_i2c_config(cfg: &I2cConfig) -> Option<i2c::Config> {
    if cfg.frequency == 0 || cfg.frequency > I2cConfig::FAST_PLUS.frequency {
        return None;
    }
    let mut out = i2c::Config::default();
    out.frequency = cfg.frequency;
    Some(out)
}
