//! Load cell driven through a helper process
//!
//! Protocol: `zero` -> `ok`, `mean <n>` -> a number or `null`.

use scalecart_domain::device::WeightSensor;
use scalecart_types::SensorError;

use super::line_process::LineProcess;

pub struct CommandWeightSensor {
    process: LineProcess,
}

impl CommandWeightSensor {
    pub fn new(cmd_str: &str) -> Result<Self, SensorError> {
        let process = LineProcess::from_command_line(cmd_str).map_err(SensorError::Unreachable)?;
        Ok(Self { process })
    }

    fn request(&mut self, line: &str) -> Result<String, SensorError> {
        self.process
            .request(line)
            .map_err(|e| SensorError::Unreachable(format!("{}: {}", self.process.program(), e)))
    }
}

/// Parse a `mean` reply; `null` or an empty line means no reading
pub(crate) fn parse_mean_reply(reply: &str) -> Result<Option<f64>, SensorError> {
    let reply = reply.trim();
    if reply.is_empty() || reply.eq_ignore_ascii_case("null") || reply.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match reply.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(SensorError::Protocol(reply.to_string())),
    }
}

impl WeightSensor for CommandWeightSensor {
    fn acquire(&mut self) -> Result<(), SensorError> {
        self.process
            .start()
            .map_err(|e| SensorError::Unreachable(format!("{}: {}", self.process.program(), e)))
    }

    fn zero(&mut self) -> Result<(), SensorError> {
        let reply = self.request("zero")?;
        if reply.trim().eq_ignore_ascii_case("ok") {
            Ok(())
        } else {
            Err(SensorError::Protocol(reply))
        }
    }

    fn sample_mean(&mut self, samples: u32) -> Result<Option<f64>, SensorError> {
        let reply = self.request(&format!("mean {}", samples))?;
        parse_mean_reply(&reply)
    }

    fn release(&mut self) {
        self.process.stop();
    }
}
