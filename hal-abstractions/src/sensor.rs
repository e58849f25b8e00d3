//! Environmental sensor driver interface

/// One raw measurement in the driver's native units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawMeasurement {
    /// Air temperature in °C
    pub temperature_c: f32,
    /// Barometric pressure in Pa
    pub pressure_pa: f32,
    /// Relative humidity in %
    pub humidity_rh: f32,
}

/// Combined temperature / pressure / humidity sensor (BME280 class)
pub trait EnvironmentSensor {
    type Error: core::fmt::Debug;

    fn measure(&mut self) -> Result<RawMeasurement, Self::Error>;
}
