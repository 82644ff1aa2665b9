//! TI TMP-family digital temperature sensors
//!
//! TMP11x/TMP116/TMP006 all expose a 16-bit two's-complement result
//! register with 0.0078125 °C per LSB. Boards shipped with different parts
//! at different addresses, so the driver probes a fixed candidate table at
//! start-up and keeps whichever one answers.

use hearth_core::report::Diagnostic;
use hearth_core::traits::{SensorError, StatusOutput, TemperatureSensor};
use hearth_hal::I2cBus;

/// One candidate part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorModel {
    /// Part suffix as printed after `TMP`
    pub id: &'static str,
    /// 7-bit bus address
    pub address: u8,
    /// Result register pointer
    pub result_register: u8,
}

/// Candidates in probe order
pub const KNOWN_SENSORS: [SensorModel; 3] = [
    SensorModel {
        id: "11X",
        address: 0x48,
        result_register: 0x00,
    },
    SensorModel {
        id: "116",
        address: 0x49,
        result_register: 0x00,
    },
    SensorModel {
        id: "006",
        address: 0x41,
        result_register: 0x01,
    },
];

/// Convert the big-endian result register to whole degrees
///
/// Divides by 128 and truncates toward zero, so `0xFF38` (-1.5625 °C)
/// reads as -1.
pub fn raw_to_celsius(raw: [u8; 2]) -> i16 {
    i16::from_be_bytes(raw) / 128
}

/// TMP sensor bound to one address
pub struct TmpSensor<B> {
    bus: B,
    model: SensorModel,
}

/// Result of probing [`KNOWN_SENSORS`]
pub enum Detection<B> {
    /// A candidate acknowledged
    Found(TmpSensor<B>),
    /// Nothing answered; bound to the last candidate so reads keep failing
    /// visibly instead of the thermostat silently stopping
    NotFound(TmpSensor<B>),
}

impl<B> Detection<B> {
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found(_))
    }

    pub fn into_sensor(self) -> TmpSensor<B> {
        match self {
            Detection::Found(sensor) | Detection::NotFound(sensor) => sensor,
        }
    }
}

impl<B: I2cBus> TmpSensor<B> {
    pub fn new(bus: B, model: SensorModel) -> Self {
        Self { bus, model }
    }

    pub fn model(&self) -> &SensorModel {
        &self.model
    }

    /// Release the bus
    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Probe each known part in order
    ///
    /// A probe writes the result-register pointer; an acknowledge means the
    /// part is present. `on_probe` sees every candidate tried and whether it
    /// answered.
    pub fn detect(mut bus: B, mut on_probe: impl FnMut(&SensorModel, bool)) -> Detection<B> {
        for model in KNOWN_SENSORS {
            let found = bus.write(model.address, &[model.result_register]).is_ok();
            on_probe(&model, found);
            if found {
                return Detection::Found(Self::new(bus, model));
            }
        }

        Detection::NotFound(Self::new(bus, KNOWN_SENSORS[KNOWN_SENSORS.len() - 1]))
    }

    /// Read the raw result register
    pub fn read_raw(&mut self) -> Result<[u8; 2], SensorError> {
        let mut buf = [0u8; 2];
        self.bus
            .write_read(self.model.address, &[self.model.result_register], &mut buf)?;
        Ok(buf)
    }
}

impl<B: I2cBus> TemperatureSensor for TmpSensor<B> {
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_raw().map(raw_to_celsius)
    }
}

/// Detect the sensor and print the probe transcript
///
/// Console output is best effort; a failing sink does not affect detection.
pub fn detect_with_transcript<B, O>(bus: B, out: &mut O) -> Detection<B>
where
    B: I2cBus,
    O: StatusOutput,
{
    let detection = TmpSensor::detect(bus, |model, found| {
        let _ = out.emit(Diagnostic::Probe { id: model.id });
        let _ = out.emit(Diagnostic::ProbeResult { found });
    });

    let _ = match &detection {
        Detection::Found(sensor) => out.emit(Diagnostic::Detected {
            id: sensor.model().id,
            address: sensor.model().address,
        }),
        Detection::NotFound(_) => out.emit(Diagnostic::SensorNotFound),
    };
    detection
}
