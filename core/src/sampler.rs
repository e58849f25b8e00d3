//! Sensor sampling with sentinel degradation

use weather_hal::EnvironmentSensor;

use crate::record::Reading;

/// Take one reading, substituting [`Reading::UNAVAILABLE`] on failure
///
/// A failed read is not an error for the caller: the record is still
/// produced and sent, and the out-of-range values make the gap visible at
/// the collector.
pub fn read_environment<S: EnvironmentSensor>(sensor: &mut S) -> Reading {
    match sensor.measure() {
        Ok(raw) => {
            let reading = Reading::from(raw);
            debug!(
                "Sensor: {} C, {} hPa, {} %RH",
                reading.temperature_c,
                reading.pressure_hpa,
                reading.humidity_rh
            );
            reading
        }
        Err(_) => {
            warn!("Sensor read failed, substituting sentinel values");
            Reading::UNAVAILABLE
        }
    }
}
