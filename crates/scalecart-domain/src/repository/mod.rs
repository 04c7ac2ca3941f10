//! Repository trait definitions for data persistence

use scalecart_types::Error;

use crate::model::{PriceCatalog, Receipt, TransactionRecord};

/// Source of the price catalog
pub trait PriceCatalogRepository {
    /// Load every tier in source order
    fn load(&self) -> Result<PriceCatalog, Error>;
}

/// Sink for the current receipt document
///
/// Only one receipt is current at a time; saving replaces it.
pub trait ReceiptRepository {
    /// Persist the receipt, replacing the previous one
    fn save(&self, receipt: &Receipt) -> Result<(), Error>;

    /// Read back the current receipt, if any
    fn load_current(&self) -> Result<Option<Receipt>, Error>;
}

/// Append-only log of completed checkouts
pub trait TransactionLogRepository {
    fn append(&self, record: &TransactionRecord) -> Result<(), Error>;

    fn find_all(&self) -> Result<Vec<TransactionRecord>, Error>;
}
