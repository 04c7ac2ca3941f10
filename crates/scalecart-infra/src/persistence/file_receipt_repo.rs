//! File-based receipt sink (`receipt.json`)

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use scalecart_domain::model::{Receipt, ReceiptDocument};
use scalecart_domain::repository::ReceiptRepository;
use scalecart_types::Error;
use tempfile::NamedTempFile;
use tracing::info;

/// Current receipt stored as a JSON document for the front-end to pick up
pub struct FileReceiptRepository {
    path: PathBuf,
}

impl FileReceiptRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl ReceiptRepository for FileReceiptRepository {
    /// Write to a temp file beside the target, then rename over it, so readers
    /// only ever see a complete document.
    fn save(&self, receipt: &Receipt) -> Result<(), Error> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let document = ReceiptDocument::from(receipt);
        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        info!(path = %self.path.display(), total = %receipt.total_price, "receipt saved");
        Ok(())
    }

    fn load_current(&self) -> Result<Option<Receipt>, Error> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let document: ReceiptDocument = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(Receipt::from(document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use scalecart_domain::model::ReceiptLine;
    use tempfile::tempdir;

    fn receipt(total_item: rust_decimal::Decimal) -> Receipt {
        Receipt::from_lines(vec![ReceiptLine {
            item_name: "rice".to_string(),
            captured_weight: 600,
            matched_tier: Some(500),
            unit_price: total_item,
            sold_by_weight: false,
            count: 1,
            line_total: total_item,
            unmatched: false,
        }])
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let repo = FileReceiptRepository::new(dir.path().join("receipt.json"));
        assert!(repo.load_current().unwrap().is_none());

        repo.save(&receipt(dec!(40))).unwrap();
        let loaded = repo.load_current().unwrap().unwrap();
        assert_eq!(loaded.total_price, dec!(40));
        assert_eq!(loaded.lines[0].item_name, "rice");
    }

    #[test]
    fn test_later_checkout_overwrites() {
        let dir = tempdir().unwrap();
        let repo = FileReceiptRepository::new(dir.path().join("out").join("receipt.json"));
        repo.save(&receipt(dec!(40))).unwrap();
        repo.save(&receipt(dec!(75))).unwrap();

        let loaded = repo.load_current().unwrap().unwrap();
        assert_eq!(loaded.total_price, dec!(75));
        assert_eq!(loaded.lines.len(), 1);

        let leftovers = std::fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
