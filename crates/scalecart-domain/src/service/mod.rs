//! Domain services

pub mod cart_ledger;
pub mod detection_aggregator;
pub mod quantize;
pub mod receipt_message;
pub mod reconciliation;

pub use cart_ledger::{CartLedger, RegisterOutcome};
pub use detection_aggregator::{distinct_labels, single_item_label};
pub use quantize::{quantize_grams, DEFAULT_QUANTUM_GRAMS};
pub use receipt_message::format_receipt_message;
pub use reconciliation::{nearest_tier, reconcile};
