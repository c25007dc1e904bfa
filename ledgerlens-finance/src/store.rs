//! Flat CSV store of extracted transactions: `Date,Amount,Type,Description,Bank`.

use anyhow::{Context, Result};
use ledgerlens_core::{RECORD_HEADER, StatementDate, Transaction, TxnKind};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Append-only transaction file. Appends are serialized within the process by a mutex and
/// across processes by an exclusive lock on the file.
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TransactionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append rows, writing the header first when the file is missing or empty.
    /// Returns the number of rows written.
    pub fn append(&self, txns: &[Transaction]) -> Result<usize> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        // the header check and the append happen under one exclusive file lock
        file.lock()
            .with_context(|| format!("locking {}", self.path.display()))?;
        let needs_header = file.metadata()?.len() == 0;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&file);
        if needs_header {
            wtr.write_record(RECORD_HEADER)?;
        }
        for t in txns {
            wtr.write_record(t.to_record())?;
        }
        wtr.flush()
            .with_context(|| format!("writing {}", self.path.display()))?;
        drop(wtr);
        file.unlock()?;

        debug!(path = %self.path.display(), rows = txns.len(), needs_header, "appended to store");
        Ok(txns.len())
    }

    /// Every readable row. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        load_csv(&self.path)
    }
}

/// Write a new CSV (header plus rows), replacing whatever was at `path`.
pub fn write_fresh(path: &Path, txns: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(RECORD_HEADER)?;
    for t in txns {
        wtr.write_record(t.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read transactions from a store file, skipping rows whose amount or type can't be read.
pub fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut txns = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, "unreadable store row");
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let raw_amount: String = field(1).chars().filter(|c| !matches!(c, ',' | '$')).collect();
        let Some(amount) = raw_amount.parse::<f64>().ok().filter(|v| v.is_finite()) else {
            warn!(line, amount = field(1), "skipping store row with bad amount");
            continue;
        };
        let kind = match field(2).parse::<TxnKind>() {
            Ok(k) => k,
            Err(e) => {
                warn!(line, error = %e, "skipping store row with bad type");
                continue;
            }
        };

        txns.push(Transaction::new(
            StatementDate::from_stored(field(0)),
            amount,
            kind,
            field(3),
            field(4),
        ));
    }

    Ok(txns)
}
