use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::receipt_document::ReceiptItem;

/// One completed checkout, as appended to the transaction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub datetime: DateTime<Utc>,
    pub session_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub items: Vec<ReceiptItem>,
}
