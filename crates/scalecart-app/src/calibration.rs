//! Load cell calibration
//!
//! The scale is zeroed with nothing on it, the operator places a reference
//! weight, and the ratio of the mean raw reading to the known grams becomes
//! the conversion factor for every later capture.

use scalecart_domain::device::WeightSensor;
use scalecart_domain::model::CalibrationState;
use scalecart_types::{CalibrationError, SensorError};
use tracing::{debug, info};

pub struct CalibrationManager<'a> {
    sensor: &'a mut dyn WeightSensor,
    samples: u32,
}

impl<'a> CalibrationManager<'a> {
    pub fn new(sensor: &'a mut dyn WeightSensor, samples: u32) -> Self {
        Self {
            sensor,
            samples: samples.max(1),
        }
    }

    /// Tare the empty scale
    pub fn zero(&mut self) -> Result<(), SensorError> {
        info!("zeroing scale");
        self.sensor.zero()
    }

    /// Mean raw reading over the configured sample count
    pub fn measure_mean(&mut self) -> Result<f64, SensorError> {
        let mean = self
            .sensor
            .sample_mean(self.samples)?
            .ok_or(SensorError::NoReading)?;
        debug!(samples = self.samples, mean, "raw mean");
        Ok(mean)
    }

    /// Derive the calibration from the reference weight now on the scale
    pub fn calibrate(&mut self, known_weight_grams: f64) -> Result<CalibrationState, CalibrationError> {
        if !known_weight_grams.is_finite() || known_weight_grams <= 0.0 {
            return Err(CalibrationError::InvalidKnownWeight(known_weight_grams));
        }
        let raw_mean = match self.measure_mean() {
            Ok(mean) => mean,
            Err(SensorError::NoReading) => return Err(CalibrationError::NoReading),
            Err(e) => return Err(e.into()),
        };
        let state = CalibrationState::from_reference(raw_mean, known_weight_grams)?;
        info!(ratio = state.ratio(), known_weight_grams, "calibration complete");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalecart_infra::devices::ScriptedWeightSensor;

    fn sensor(readings: Vec<Option<f64>>) -> ScriptedWeightSensor {
        let mut sensor = ScriptedWeightSensor::new(readings);
        sensor.acquire().unwrap();
        sensor
    }

    #[test]
    fn test_calibrate_ratio() {
        let mut sensor = sensor(vec![Some(42_000.0)]);
        let mut manager = CalibrationManager::new(&mut sensor, 30);
        manager.zero().unwrap();
        let state = manager.calibrate(200.0).unwrap();
        assert!((state.ratio() - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_known_weight_keeps_reading() {
        let mut sensor = sensor(vec![Some(42_000.0)]);
        {
            let mut manager = CalibrationManager::new(&mut sensor, 30);
            assert!(matches!(
                manager.calibrate(0.0),
                Err(CalibrationError::InvalidKnownWeight(_))
            ));
        }
        assert_eq!(sensor.remaining(), 1);
    }

    #[test]
    fn test_missing_reading() {
        let mut sensor = sensor(vec![None]);
        let mut manager = CalibrationManager::new(&mut sensor, 30);
        assert!(matches!(manager.calibrate(200.0), Err(CalibrationError::NoReading)));
    }

    #[test]
    fn test_zero_mean_is_invalid_ratio() {
        let mut sensor = sensor(vec![Some(0.0)]);
        let mut manager = CalibrationManager::new(&mut sensor, 30);
        assert!(matches!(manager.calibrate(200.0), Err(CalibrationError::InvalidRatio(_))));
    }

    #[test]
    fn test_released_sensor() {
        let mut sensor = ScriptedWeightSensor::new(vec![Some(42_000.0)]);
        let mut manager = CalibrationManager::new(&mut sensor, 30);
        assert!(manager.zero().is_err());
        assert!(matches!(manager.calibrate(200.0), Err(CalibrationError::Sensor(_))));
    }
}
