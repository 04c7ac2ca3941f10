//! Core types for the scalecart checkout kiosk

mod error;

pub use error::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// How often the load cell is calibrated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalibrationPolicy {
    /// Recalibrate at the start of every customer session
    #[default]
    PerCustomer,
    /// Calibrate for the first customer and reuse the ratio afterwards
    Once,
}

impl std::fmt::Display for CalibrationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationPolicy::PerCustomer => write!(f, "per-customer"),
            CalibrationPolicy::Once => write!(f, "once"),
        }
    }
}

/// What happens when an item class is registered again at a different weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationPolicy {
    /// The class keeps a single cart line, re-keyed to the latest weight
    #[default]
    Overwrite,
    /// Every distinct (class, weight) pair is its own cart line
    PerWeight,
}

impl std::fmt::Display for RegistrationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationPolicy::Overwrite => write!(f, "overwrite"),
            RegistrationPolicy::PerWeight => write!(f, "per-weight"),
        }
    }
}
