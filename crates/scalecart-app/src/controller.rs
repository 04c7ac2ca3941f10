//! Session lifecycle controller
//!
//! Drives one customer at a time through
//! `Calibrating -> Detecting -> (Registering | Checkout) -> Handoff -> Reset`
//! and back to `Calibrating`. Operator triggers are the only inputs; the
//! controller is single threaded and blocks on the devices and the front-end.

use chrono::Utc;
use scalecart_domain::device::{
    CheckoutFrontend, FrameSource, OperatorConsole, OperatorNotice, Trigger, WeightSensor,
};
use scalecart_domain::model::{CalibrationState, PriceCatalog, Receipt, ReceiptItem, TransactionRecord};
use scalecart_domain::repository::{PriceCatalogRepository, ReceiptRepository, TransactionLogRepository};
use scalecart_domain::service::{reconcile, single_item_label};
use scalecart_types::{CalibrationError, CalibrationPolicy, CaptureError, RegistrationPolicy, Result};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calibration::CalibrationManager;
use crate::config::Config;
use crate::session::Session;
use crate::weight_capture::capture_weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Calibrating,
    Detecting,
    Registering,
    Checkout,
    Handoff,
    Reset,
    /// Stopped after a fatal error
    Halted,
    /// Stopped by the operator
    ShutDown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandoffResult {
    Completed,
    Failed(String),
}

/// How a customer session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    CheckedOut {
        session_id: Uuid,
        receipt: Receipt,
        handoff: HandoffResult,
    },
    ShutDown,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub calibration_policy: CalibrationPolicy,
    pub registration_policy: RegistrationPolicy,
    pub sample_count: u32,
    pub quantum_grams: u32,
    /// Skip the operator prompt when set
    pub known_weight_grams: Option<f64>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            calibration_policy: config.calibration_policy,
            registration_policy: config.registration_policy,
            sample_count: config.sample_count,
            quantum_grams: config.quantum_grams,
            known_weight_grams: config.known_weight_grams,
        }
    }
}

/// Hardware and operator endpoints
pub struct KioskDevices {
    pub sensor: Box<dyn WeightSensor>,
    pub camera: Box<dyn FrameSource>,
    pub frontend: Box<dyn CheckoutFrontend>,
    pub console: Box<dyn OperatorConsole>,
}

pub struct KioskStores {
    pub catalog: Box<dyn PriceCatalogRepository>,
    pub receipts: Box<dyn ReceiptRepository>,
    pub transactions: Box<dyn TransactionLogRepository>,
}

pub struct SessionController {
    settings: ControllerSettings,
    devices: KioskDevices,
    stores: KioskStores,
    state: SessionState,
    session: Session,
    /// Last successful calibration, reused under `CalibrationPolicy::Once`
    retained_calibration: Option<CalibrationState>,
    /// Checkouts whose receipt reached the front-end
    sessions_completed: usize,
    checkouts: usize,
}

impl SessionController {
    pub fn new(settings: ControllerSettings, devices: KioskDevices, stores: KioskStores) -> Self {
        let session = Session::new(settings.registration_policy);
        Self {
            settings,
            devices,
            stores,
            state: SessionState::Calibrating,
            session,
            retained_calibration: None,
            sessions_completed: 0,
            checkouts: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn sessions_completed(&self) -> usize {
        self.sessions_completed
    }

    /// Receipts issued, including those whose front-end failed
    pub fn checkouts(&self) -> usize {
        self.checkouts
    }

    /// Serve customers until the operator shuts the kiosk down
    ///
    /// Returns the number of customers whose checkout reached the front-end.
    pub fn run(&mut self) -> Result<usize> {
        info!(
            calibration_policy = %self.settings.calibration_policy,
            registration_policy = %self.settings.registration_policy,
            "kiosk started"
        );
        while let SessionOutcome::CheckedOut { .. } = self.run_session()? {}
        info!(
            sessions = self.sessions_completed,
            checkouts = self.checkouts,
            "kiosk stopped"
        );
        Ok(self.sessions_completed)
    }

    /// Serve a single customer from calibration to reset
    ///
    /// Any error returned here is fatal: devices are released and the
    /// controller is left `Halted`.
    pub fn run_session(&mut self) -> Result<SessionOutcome> {
        let result = self.drive_session();
        if let Err(e) = &result {
            error!(session_id = %self.session.id(), error = %e, "session halted");
            self.release_devices();
            self.state = SessionState::Halted;
        }
        result
    }

    fn drive_session(&mut self) -> Result<SessionOutcome> {
        self.state = SessionState::Calibrating;
        let calibration = self.calibrate()?;
        let catalog = self.load_catalog();

        loop {
            self.state = SessionState::Detecting;
            match self.devices.console.next_trigger()? {
                Trigger::Register => {
                    self.state = SessionState::Registering;
                    self.register(&calibration);
                }
                Trigger::Checkout => break,
                Trigger::Shutdown => {
                    self.shut_down();
                    return Ok(SessionOutcome::ShutDown);
                }
            }
        }

        self.state = SessionState::Checkout;
        let receipt = self.checkout(&catalog)?;

        self.state = SessionState::Handoff;
        let handoff = self.hand_off(&receipt);
        let session_id = self.session.id();

        self.state = SessionState::Reset;
        self.reset()?;
        self.checkouts += 1;
        if handoff == HandoffResult::Completed {
            self.sessions_completed += 1;
        }

        Ok(SessionOutcome::CheckedOut {
            session_id,
            receipt,
            handoff,
        })
    }

    fn acquire_devices(&mut self) -> Result<()> {
        self.devices.sensor.acquire()?;
        self.devices.camera.acquire()?;
        Ok(())
    }

    fn release_devices(&mut self) {
        self.devices.camera.release();
        self.devices.sensor.release();
    }

    /// Tare the freshly acquired scale, then measure or reuse the ratio
    fn calibrate(&mut self) -> Result<CalibrationState> {
        self.acquire_devices()?;
        let mut manager = CalibrationManager::new(self.devices.sensor.as_mut(), self.settings.sample_count);
        manager.zero().map_err(CalibrationError::from)?;

        if self.settings.calibration_policy == CalibrationPolicy::Once {
            if let Some(calibration) = self.retained_calibration {
                info!(ratio = calibration.ratio(), "scale tared, reusing calibration");
                self.session.set_calibration(calibration);
                return Ok(calibration);
            }
        }

        info!(session_id = %self.session.id(), "calibration started");
        let known_weight = self.settings.known_weight_grams;
        self.devices.console.await_reference_weight()?;
        let known_weight_grams = match known_weight {
            Some(grams) => grams,
            None => self.devices.console.known_weight_grams()?,
        };
        let calibration = manager.calibrate(known_weight_grams)?;

        self.session.set_calibration(calibration);
        self.retained_calibration = Some(calibration);
        self.devices.console.notify(OperatorNotice::Calibrated {
            ratio: calibration.ratio(),
        });
        Ok(calibration)
    }

    fn load_catalog(&self) -> PriceCatalog {
        match self.stores.catalog.load() {
            Ok(catalog) => {
                info!(tiers = catalog.len(), "price catalog loaded");
                catalog
            }
            Err(e) => {
                error!(error = %e, "price catalog unavailable, every item will be unpriced");
                PriceCatalog::default()
            }
        }
    }

    fn register(&mut self, calibration: &CalibrationState) {
        match self.capture_item(calibration) {
            Ok((item_name, weight)) => {
                let outcome = self.session.ledger_mut().register(&item_name, weight);
                info!(
                    session_id = %self.session.id(),
                    item = %item_name,
                    weight_g = weight,
                    outcome = ?outcome,
                    "item registered"
                );
                self.devices
                    .console
                    .notify(OperatorNotice::Registered { item_name, weight });
            }
            Err(e) => {
                warn!(session_id = %self.session.id(), error = %e, "registration rejected");
                self.devices.console.notify(OperatorNotice::Rejected {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Classify the frame first so an ambiguous scale never costs a weight reading
    fn capture_item(&mut self, calibration: &CalibrationState) -> std::result::Result<(String, u32), CaptureError> {
        let detections = self.devices.camera.next_detections()?;
        let item_name = single_item_label(&detections)?;
        let weight = capture_weight(
            self.devices.sensor.as_mut(),
            calibration,
            self.settings.sample_count,
            self.settings.quantum_grams,
        )?;
        Ok((item_name, weight))
    }

    fn checkout(&mut self, catalog: &PriceCatalog) -> Result<Receipt> {
        if self.session.ledger().is_empty() {
            warn!(session_id = %self.session.id(), "checkout with an empty cart");
        }
        let receipt = reconcile(self.session.ledger().lines(), catalog);
        self.stores.receipts.save(&receipt)?;
        info!(
            session_id = %self.session.id(),
            total = %receipt.total_price,
            lines = receipt.lines.len(),
            unmatched = receipt.unmatched_count(),
            "receipt saved"
        );
        self.devices.console.notify(OperatorNotice::CheckoutReady {
            total: receipt.total_price,
            lines: receipt.lines.len(),
        });
        Ok(receipt)
    }

    fn hand_off(&mut self, receipt: &Receipt) -> HandoffResult {
        self.release_devices();
        info!(session_id = %self.session.id(), "handoff started");
        match self.devices.frontend.hand_off(receipt) {
            Ok(()) => {
                info!(session_id = %self.session.id(), "handoff complete");
                self.record_transaction(receipt);
                HandoffResult::Completed
            }
            Err(e) => {
                error!(session_id = %self.session.id(), error = %e, "checkout front-end failed");
                self.devices.console.notify(OperatorNotice::HandoffFailed {
                    reason: e.to_string(),
                });
                HandoffResult::Failed(e.to_string())
            }
        }
    }

    /// Log the receipt as the front-end left it
    fn record_transaction(&mut self, issued: &Receipt) {
        let receipt = match self.stores.receipts.load_current() {
            Ok(Some(receipt)) => receipt,
            Ok(None) => issued.clone(),
            Err(e) => {
                warn!(error = %e, "could not reload receipt, logging the issued one");
                issued.clone()
            }
        };
        let record = TransactionRecord {
            datetime: Utc::now(),
            session_id: self.session.id().to_string(),
            total_price: receipt.total_price,
            items: receipt.lines.iter().map(ReceiptItem::from).collect(),
        };
        if let Err(e) = self.stores.transactions.append(&record) {
            warn!(session_id = %record.session_id, error = %e, "failed to append transaction log");
        }
    }

    fn reset(&mut self) -> Result<()> {
        let finished = self.session.id();
        self.session.reset();
        self.acquire_devices()?;
        info!(finished = %finished, session_id = %self.session.id(), "session reset");
        self.devices.console.notify(OperatorNotice::NextCustomer);
        self.state = SessionState::Calibrating;
        Ok(())
    }

    fn shut_down(&mut self) {
        self.release_devices();
        self.state = SessionState::ShutDown;
        info!(session_id = %self.session.id(), "shutdown requested");
    }
}
