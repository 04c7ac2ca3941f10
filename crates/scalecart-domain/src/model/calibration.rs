//! Load cell calibration state

use scalecart_types::CalibrationError;
use serde::{Deserialize, Serialize};

/// Raw sensor units per gram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationState {
    ratio: f64,
}

impl CalibrationState {
    /// Ratio must be finite and strictly positive
    pub fn new(ratio: f64) -> Result<Self, CalibrationError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self { ratio })
        } else {
            Err(CalibrationError::InvalidRatio(ratio))
        }
    }

    /// Derive the ratio from a raw reading taken with a reference weight on the scale
    pub fn from_reference(raw_mean: f64, known_weight_grams: f64) -> Result<Self, CalibrationError> {
        if !known_weight_grams.is_finite() || known_weight_grams <= 0.0 {
            return Err(CalibrationError::InvalidKnownWeight(known_weight_grams));
        }
        Self::new(raw_mean / known_weight_grams)
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Convert a raw reading to (unquantized) grams
    pub fn to_grams(&self, raw: f64) -> f64 {
        raw / self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reference() {
        let state = CalibrationState::from_reference(42_000.0, 200.0).unwrap();
        assert!((state.ratio() - 210.0).abs() < f64::EPSILON);
        assert!((state.to_grams(21_000.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_known_weight() {
        assert!(matches!(
            CalibrationState::from_reference(42_000.0, 0.0),
            Err(CalibrationError::InvalidKnownWeight(_))
        ));
        assert!(matches!(
            CalibrationState::from_reference(42_000.0, -5.0),
            Err(CalibrationError::InvalidKnownWeight(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_ratio() {
        assert!(matches!(
            CalibrationState::from_reference(-100.0, 100.0),
            Err(CalibrationError::InvalidRatio(_))
        ));
        assert!(CalibrationState::new(f64::NAN).is_err());
        assert!(CalibrationState::new(0.0).is_err());
    }
}
