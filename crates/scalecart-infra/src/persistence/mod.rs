//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_catalog_repo;
mod file_receipt_repo;
mod file_transaction_log;

pub use file_catalog_repo::FileCatalogRepository;
pub use file_receipt_repo::FileReceiptRepository;
pub use file_transaction_log::FileTransactionLog;
