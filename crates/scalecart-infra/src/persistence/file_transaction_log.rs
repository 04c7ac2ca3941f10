//! JSON-lines transaction log

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use scalecart_domain::model::TransactionRecord;
use scalecart_domain::repository::TransactionLogRepository;
use scalecart_types::Error;
use tracing::warn;

/// One JSON object per line, appended after each completed checkout
pub struct FileTransactionLog {
    path: PathBuf,
}

impl FileTransactionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TransactionLogRepository for FileTransactionLog {
    fn append(&self, record: &TransactionRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Lines that fail to parse are skipped with a warning
    fn find_all(&self) -> Result<Vec<TransactionRecord>, Error> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = idx + 1, error = %e, "skipping malformed transaction entry"),
            }
        }
        Ok(records)
    }
}
