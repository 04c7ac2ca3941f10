//! Error types for scalecart

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Load cell driver errors
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("Weight sensor unreachable: {0}")]
    Unreachable(String),

    #[error("Weight sensor returned no reading")]
    NoReading,

    #[error("Unexpected reply from weight sensor: {0}")]
    Protocol(String),
}

/// Camera / classifier errors
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read frame: {0}")]
    ReadFailed(String),
}

/// Calibration errors; all of them abort session start
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Known weight must be a positive number of grams, got {0}")]
    InvalidKnownWeight(f64),

    #[error("Calibration ratio must be strictly positive, got {0}")]
    InvalidRatio(f64),

    #[error("No raw reading available for calibration")]
    NoReading,

    #[error("Sensor error during calibration: {0}")]
    Sensor(#[from] SensorError),
}

/// Errors raised while registering the item currently on the scale
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Two or more different objects detected ({}). Remove items until one remains", labels.join(", "))]
    Ambiguous { labels: Vec<String> },

    #[error("No object detected on the scale")]
    NoObjectDetected,

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Price catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read price catalog: {0}")]
    ReadError(String),

    #[error("Failed to parse price catalog: {0}")]
    ParseError(String),

    #[error("Invalid catalog record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Checkout front-end errors
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("Front-end command is not configured")]
    NotConfigured,

    #[error("Failed to launch front-end: {0}")]
    Launch(String),

    #[error("Front-end exited with status {0}")]
    Exited(String),
}

/// Receipt editing errors
#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("No receipt line at index {0}")]
    NoSuchLine(usize),

    #[error("Line {0} is sold by weight; its quantity cannot be edited")]
    SoldByWeight(usize),

    #[error("Line {0} has no catalog price")]
    Unmatched(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Front-end error: {0}")]
    Frontend(#[from] FrontendError),

    #[error("Receipt error: {0}")]
    Receipt(#[from] ReceiptError),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
