//! Quantized weight capture

use scalecart_domain::device::WeightSensor;
use scalecart_domain::model::CalibrationState;
use scalecart_domain::service::quantize_grams;
use scalecart_types::SensorError;
use tracing::debug;

/// Average `samples` raw readings, convert to grams and round to the quantum
///
/// The sensor must already be zeroed and calibrated. A sensor that produces
/// no reading yields [`SensorError::NoReading`].
pub fn capture_weight(
    sensor: &mut dyn WeightSensor,
    calibration: &CalibrationState,
    samples: u32,
    quantum: u32,
) -> Result<u32, SensorError> {
    let raw = sensor.sample_mean(samples)?.ok_or(SensorError::NoReading)?;
    let grams = calibration.to_grams(raw);
    let weight = quantize_grams(grams, quantum);
    debug!(raw, grams, weight, "captured weight");
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalecart_infra::devices::ScriptedWeightSensor;

    #[test]
    fn test_capture_quantizes() {
        let calibration = CalibrationState::new(210.0).unwrap();
        // 72450 / 210 = 345 g, 12180 / 210 = 58 g -> 60 g
        let mut sensor = ScriptedWeightSensor::new(vec![Some(72_450.0), Some(12_180.0)]);
        sensor.acquire().unwrap();

        assert_eq!(capture_weight(&mut sensor, &calibration, 30, 5).unwrap(), 345);
        assert_eq!(capture_weight(&mut sensor, &calibration, 30, 5).unwrap(), 60);
    }

    #[test]
    fn test_negative_reading_clamps_to_zero() {
        let calibration = CalibrationState::new(210.0).unwrap();
        let mut sensor = ScriptedWeightSensor::new(vec![Some(-400.0)]);
        sensor.acquire().unwrap();
        assert_eq!(capture_weight(&mut sensor, &calibration, 30, 5).unwrap(), 0);
    }

    #[test]
    fn test_no_reading() {
        let calibration = CalibrationState::new(210.0).unwrap();
        let mut sensor = ScriptedWeightSensor::new(vec![None]);
        sensor.acquire().unwrap();
        assert!(matches!(
            capture_weight(&mut sensor, &calibration, 30, 5),
            Err(SensorError::NoReading)
        ));
    }
}
