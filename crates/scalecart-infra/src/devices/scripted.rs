//! Replayed devices for simulation
//!
//! ```toml
//! [sensor]
//! readings = [42000.0, 72450.0, "absent", 14700.0]
//!
//! [[frames]]
//! labels = ["banana", "banana"]
//!
//! [[frames]]
//! labels = []
//! ```
//!
//! Every `sample_mean` call consumes one reading and every frame request
//! consumes one frame. Once exhausted, the sensor reports no reading and the
//! camera sees an empty scale.

use std::collections::VecDeque;
use std::path::Path;

use scalecart_domain::device::{FrameSource, WeightSensor};
use scalecart_domain::model::Detection;
use scalecart_types::{CameraError, ConfigError, Error, Result, SensorError};
use serde::Deserialize;

const ABSENT_MARKER: &str = "absent";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ScriptReading {
    Value(f64),
    Absent(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SensorScript {
    #[serde(default)]
    readings: Vec<ScriptReading>,
    #[serde(default)]
    unreachable: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct FrameScript {
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationScript {
    #[serde(default)]
    sensor: SensorScript,
    #[serde(default)]
    frames: Vec<FrameScript>,
}

impl SimulationScript {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::FileNotFound(path.display().to_string()))?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        let script: Self = toml::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse simulation script: {}",
                e
            )))
        })?;

        for (index, reading) in script.sensor.readings.iter().enumerate() {
            if let ScriptReading::Absent(marker) = reading {
                if marker != ABSENT_MARKER {
                    return Err(Error::Config(ConfigError::ParseError(format!(
                        "Simulation reading {}: expected a number or \"{}\", got \"{}\"",
                        index, ABSENT_MARKER, marker
                    ))));
                }
            }
        }
        Ok(script)
    }

    pub fn into_devices(self) -> (ScriptedWeightSensor, ScriptedFrameSource) {
        let readings = self
            .sensor
            .readings
            .into_iter()
            .map(|r| match r {
                ScriptReading::Value(v) => Some(v),
                ScriptReading::Absent(_) => None,
            })
            .collect();
        let frames = self
            .frames
            .into_iter()
            .map(|f| f.labels.into_iter().map(Detection::labelled).collect())
            .collect();
        let mut sensor = ScriptedWeightSensor::new(readings);
        sensor.unreachable = self.sensor.unreachable;
        (sensor, ScriptedFrameSource::new(frames))
    }
}

#[derive(Debug, Default)]
pub struct ScriptedWeightSensor {
    readings: VecDeque<Option<f64>>,
    acquired: bool,
    unreachable: bool,
}

impl ScriptedWeightSensor {
    pub fn new(readings: Vec<Option<f64>>) -> Self {
        Self {
            readings: readings.into(),
            acquired: false,
            unreachable: false,
        }
    }

    /// A sensor whose device can never be opened
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }

    fn ensure_acquired(&self) -> std::result::Result<(), SensorError> {
        if self.acquired {
            Ok(())
        } else {
            Err(SensorError::Unreachable("scripted sensor not acquired".to_string()))
        }
    }
}

impl WeightSensor for ScriptedWeightSensor {
    fn acquire(&mut self) -> std::result::Result<(), SensorError> {
        if self.unreachable {
            return Err(SensorError::Unreachable("scripted sensor offline".to_string()));
        }
        self.acquired = true;
        Ok(())
    }

    fn zero(&mut self) -> std::result::Result<(), SensorError> {
        self.ensure_acquired()
    }

    fn sample_mean(&mut self, _samples: u32) -> std::result::Result<Option<f64>, SensorError> {
        self.ensure_acquired()?;
        Ok(self.readings.pop_front().flatten())
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}

#[derive(Debug, Default)]
pub struct ScriptedFrameSource {
    frames: VecDeque<Vec<Detection>>,
    acquired: bool,
}

impl ScriptedFrameSource {
    pub fn new(frames: Vec<Vec<Detection>>) -> Self {
        Self {
            frames: frames.into(),
            acquired: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedFrameSource {
    fn acquire(&mut self) -> std::result::Result<(), CameraError> {
        self.acquired = true;
        Ok(())
    }

    fn next_detections(&mut self) -> std::result::Result<Vec<Detection>, CameraError> {
        if !self.acquired {
            return Err(CameraError::ReadFailed("scripted camera not acquired".to_string()));
        }
        Ok(self.frames.pop_front().unwrap_or_default())
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
[sensor]
readings = [42000.0, "absent", 14700.0]

[[frames]]
labels = ["banana", "banana"]

[[frames]]
labels = []
"#;

    #[test]
    fn test_script_replays_in_order() {
        let (mut sensor, mut camera) = SimulationScript::load_from_str(SCRIPT).unwrap().into_devices();
        sensor.acquire().unwrap();
        camera.acquire().unwrap();

        assert_eq!(sensor.sample_mean(30).unwrap(), Some(42000.0));
        assert_eq!(sensor.sample_mean(30).unwrap(), None);
        assert_eq!(sensor.sample_mean(30).unwrap(), Some(14700.0));
        assert_eq!(sensor.sample_mean(30).unwrap(), None);

        assert_eq!(camera.next_detections().unwrap().len(), 2);
        assert!(camera.next_detections().unwrap().is_empty());
        assert!(camera.next_detections().unwrap().is_empty());
    }

    #[test]
    fn test_released_devices_refuse_reads() {
        let (mut sensor, mut camera) = SimulationScript::load_from_str(SCRIPT).unwrap().into_devices();
        assert!(sensor.zero().is_err());
        assert!(camera.next_detections().is_err());

        sensor.acquire().unwrap();
        sensor.release();
        assert!(matches!(sensor.sample_mean(1), Err(SensorError::Unreachable(_))));
    }

    #[test]
    fn test_misspelled_reading_is_rejected() {
        let err = SimulationScript::load_from_str("[sensor]\nreadings = [42000.0, \"4200O\"]\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(ref msg)) if msg.contains("4200O")));
    }

    #[test]
    fn test_unreachable_sensor() {
        let mut sensor = ScriptedWeightSensor::unreachable();
        assert!(sensor.acquire().is_err());
    }
}
