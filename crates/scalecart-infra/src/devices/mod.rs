//! Device drivers
//!
//! Subprocess drivers talk a one-line request / one-line reply protocol with
//! a helper program that owns the real hardware. Scripted drivers replay a
//! recorded session and back `run --simulate` and the tests.

mod command_detector;
mod command_sensor;
mod line_process;
mod scripted;

pub use command_detector::CommandFrameSource;
pub use command_sensor::CommandWeightSensor;
pub use line_process::LineProcess;
pub use scripted::{ScriptedFrameSource, ScriptedWeightSensor, SimulationScript};
