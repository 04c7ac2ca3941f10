//! Domain model types

pub mod calibration;
pub mod cart;
pub mod detection;
pub mod price_record;
pub mod receipt;
pub mod receipt_document;
pub mod transaction;

pub use calibration::CalibrationState;
pub use cart::{CartKey, CartLine};
pub use detection::Detection;
pub use price_record::{PriceCatalog, PriceRecord};
pub use receipt::{Receipt, ReceiptLine};
pub use receipt_document::{ReceiptDocument, ReceiptItem};
pub use transaction::TransactionRecord;
