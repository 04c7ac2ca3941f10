//! Hardware and operator ports
//!
//! The session controller owns one implementation of each trait. Camera and
//! load cell handles are released before the checkout front-end runs and
//! acquired again when the next customer session starts.

use rust_decimal::Decimal;
use scalecart_types::{CameraError, Error, FrontendError, SensorError};

use crate::model::{Detection, Receipt};

/// Load cell driver
pub trait WeightSensor {
    /// Open the device; a no-op when already open
    fn acquire(&mut self) -> Result<(), SensorError>;

    /// Establish the no-load baseline
    fn zero(&mut self) -> Result<(), SensorError>;

    /// Mean of `samples` raw readings, `None` when the device produced none
    fn sample_mean(&mut self, samples: u32) -> Result<Option<f64>, SensorError>;

    fn release(&mut self);
}

/// Camera plus object classifier
pub trait FrameSource {
    /// Open the camera; a no-op when already open
    fn acquire(&mut self) -> Result<(), CameraError>;

    /// Grab one frame and return its detections
    fn next_detections(&mut self) -> Result<Vec<Detection>, CameraError>;

    fn release(&mut self);
}

/// External checkout / payment front-end
pub trait CheckoutFrontend {
    /// Run the front-end for this receipt and block until it finishes
    fn hand_off(&mut self, receipt: &Receipt) -> Result<(), FrontendError>;
}

/// Discrete operator actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Register the item currently on the scale
    Register,
    /// Price the cart and hand off to the front-end
    Checkout,
    /// Stop the kiosk
    Shutdown,
}

/// Messages surfaced to the operator
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorNotice {
    Calibrated { ratio: f64 },
    Registered { item_name: String, weight: u32 },
    Rejected { reason: String },
    CheckoutReady { total: Decimal, lines: usize },
    HandoffFailed { reason: String },
    NextCustomer,
}

/// Operator control surface
pub trait OperatorConsole {
    /// Block until the operator issues the next trigger
    fn next_trigger(&mut self) -> Result<Trigger, Error>;

    /// Block until the operator has placed the reference weight on the scale
    fn await_reference_weight(&mut self) -> Result<(), Error>;

    /// Ask the operator for the reference weight in grams
    fn known_weight_grams(&mut self) -> Result<f64, Error>;

    fn notify(&mut self, notice: OperatorNotice);
}
