//! Temperature sensor implementations

pub mod tmp;

pub use tmp::{
    detect_with_transcript, raw_to_celsius, Detection, SensorModel, TmpSensor, KNOWN_SENSORS,
};
