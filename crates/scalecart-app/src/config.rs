//! Configuration management for scalecart
//!
//! Config stored at: ~/.config/scalecart/config.json

use scalecart_domain::service::DEFAULT_QUANTUM_GRAMS;
use scalecart_types::{CalibrationPolicy, ConfigError, OutputFormat, RegistrationPolicy, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Price catalog file (.toml or .csv)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Where the current receipt is written for the front-end
    #[serde(default = "default_receipt_path")]
    pub receipt_path: PathBuf,

    /// JSON-lines log of completed checkouts
    #[serde(default = "default_transaction_log_path")]
    pub transaction_log_path: PathBuf,

    /// Camera + classifier helper command
    #[serde(default)]
    pub detector_command: Option<String>,

    /// Load cell helper command
    #[serde(default)]
    pub sensor_command: Option<String>,

    /// Checkout front-end command; the receipt path is appended
    #[serde(default)]
    pub frontend_command: Option<String>,

    #[serde(default)]
    pub calibration_policy: CalibrationPolicy,

    #[serde(default)]
    pub registration_policy: RegistrationPolicy,

    /// Raw readings averaged per weight measurement
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,

    /// Captured weights are rounded to multiples of this
    #[serde(default = "default_quantum_grams")]
    pub quantum_grams: u32,

    /// Reference weight used for calibration; prompted for when unset
    #[serde(default)]
    pub known_weight_grams: Option<f64>,

    #[serde(default = "default_store_name")]
    pub store_name: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("items.toml")
}

fn default_receipt_path() -> PathBuf {
    PathBuf::from("receipt.json")
}

fn default_transaction_log_path() -> PathBuf {
    PathBuf::from("transactions.log")
}

fn default_sample_count() -> u32 {
    30
}

fn default_quantum_grams() -> u32 {
    DEFAULT_QUANTUM_GRAMS
}

fn default_store_name() -> String {
    "SA Supermart".to_string()
}

fn default_currency() -> String {
    "Rs.".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            receipt_path: default_receipt_path(),
            transaction_log_path: default_transaction_log_path(),
            detector_command: None,
            sensor_command: None,
            frontend_command: None,
            calibration_policy: CalibrationPolicy::default(),
            registration_policy: RegistrationPolicy::default(),
            sample_count: default_sample_count(),
            quantum_grams: default_quantum_grams(),
            known_weight_grams: None,
            store_name: default_store_name(),
            currency: default_currency(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("scalecart");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.quantum_grams == 0 {
            return Err(ConfigError::Invalid("quantum_grams must be at least 1".to_string()).into());
        }
        if self.sample_count == 0 {
            return Err(ConfigError::Invalid("sample_count must be at least 1".to_string()).into());
        }
        if let Some(known) = self.known_weight_grams {
            if !known.is_finite() || known <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "known_weight_grams must be positive, got {}",
                    known
                ))
                .into());
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Scalecart Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Catalog:             {}", self.catalog_path.display())?;
        writeln!(f, "Receipt:             {}", self.receipt_path.display())?;
        writeln!(f, "Transaction log:     {}", self.transaction_log_path.display())?;
        writeln!(
            f,
            "Detector command:    {}",
            self.detector_command.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(
            f,
            "Sensor command:      {}",
            self.sensor_command.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(
            f,
            "Front-end command:   {}",
            self.frontend_command.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(f, "Calibration policy:  {}", self.calibration_policy)?;
        writeln!(f, "Registration policy: {}", self.registration_policy)?;
        writeln!(f, "Sample count:        {}", self.sample_count)?;
        writeln!(f, "Quantum:             {} g", self.quantum_grams)?;
        writeln!(
            f,
            "Known weight:        {}",
            self.known_weight_grams
                .map(|w| format!("{} g", w))
                .unwrap_or_else(|| "(prompt)".to_string())
        )?;
        writeln!(f, "Store name:          {}", self.store_name)?;
        writeln!(f, "Currency:            {}", self.currency)?;
        writeln!(f, "Output format:       {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:         {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalecart_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.quantum_grams, 5);
        assert_eq!(config.sample_count, 30);
        assert_eq!(config.calibration_policy, CalibrationPolicy::PerCustomer);
        assert_eq!(config.registration_policy, RegistrationPolicy::Overwrite);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"catalog_path": "/srv/kiosk/items.csv", "calibration_policy": "once", "registration_policy": "per-weight"}"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/srv/kiosk/items.csv"));
        assert_eq!(config.calibration_policy, CalibrationPolicy::Once);
        assert_eq!(config.registration_policy, RegistrationPolicy::PerWeight);
        assert_eq!(config.receipt_path, PathBuf::from("receipt.json"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            known_weight_grams: Some(200.0),
            frontend_command: Some("streamlit run checkout.py".to_string()),
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.known_weight_grams, Some(200.0));
        assert_eq!(loaded.frontend_command.as_deref(), Some("streamlit run checkout.py"));
    }

    #[test]
    fn test_validate_rejects_zero_quantum() {
        let config = Config {
            quantum_grams: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::Invalid(_)))
        ));

        let config = Config {
            known_weight_grams: Some(-1.0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
