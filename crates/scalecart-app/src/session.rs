//! One customer session

use chrono::{DateTime, Utc};
use scalecart_domain::model::CalibrationState;
use scalecart_domain::service::CartLedger;
use scalecart_types::RegistrationPolicy;
use uuid::Uuid;

/// State owned by a single customer from calibration to hand-off
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    calibration: Option<CalibrationState>,
    ledger: CartLedger,
}

impl Session {
    pub fn new(policy: RegistrationPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            calibration: None,
            ledger: CartLedger::new(policy),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn calibration(&self) -> Option<&CalibrationState> {
        self.calibration.as_ref()
    }

    pub fn set_calibration(&mut self, calibration: CalibrationState) {
        self.calibration = Some(calibration);
    }

    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut CartLedger {
        &mut self.ledger
    }

    /// Clear the cart and start over for the next customer
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.calibration = None;
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
    }
}
