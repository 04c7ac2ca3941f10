//! Repository adapters for persistence layer

use scalecart_infra::persistence::{FileCatalogRepository, FileReceiptRepository, FileTransactionLog};

use crate::config::Config;

/// Open the price catalog configured for this kiosk
pub fn open_catalog_repo(config: &Config) -> FileCatalogRepository {
    FileCatalogRepository::new(config.catalog_path.clone())
}

/// Open the receipt sink shared with the checkout front-end
pub fn open_receipt_repo(config: &Config) -> FileReceiptRepository {
    FileReceiptRepository::new(config.receipt_path.clone())
}

/// Open the checkout transaction log
pub fn open_transaction_log(config: &Config) -> FileTransactionLog {
    FileTransactionLog::new(config.transaction_log_path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_repos_follow_config_paths() {
        let config = Config {
            catalog_path: PathBuf::from("/srv/kiosk/items.csv"),
            receipt_path: PathBuf::from("/srv/kiosk/receipt.json"),
            ..Config::default()
        };
        assert_eq!(open_catalog_repo(&config).path(), PathBuf::from("/srv/kiosk/items.csv"));
        assert_eq!(open_receipt_repo(&config).path(), PathBuf::from("/srv/kiosk/receipt.json"));
    }
}
