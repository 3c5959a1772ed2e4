// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The CSV-backed [`LedgerStore`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use ledger_sync_model::{
    ledger::Ledger,
    record::{CSV_FIELDS, TransactionRecord},
};
use tempfile::Builder;
use thiserror::Error;

/// An error raised while reading or writing the ledger file.
#[derive(Debug, Error)]
pub enum LedgerStoreError {
    /// A filesystem operation failed.
    #[error("I/O error on ledger {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file could not be parsed or encoded as CSV.
    #[error("CSV error on ledger {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The fully written temporary file could not replace the ledger.
    #[error("Failed to replace ledger {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Positions of the ledger columns within a file's header, in [`CSV_FIELDS`] order.
#[derive(Debug)]
struct ColumnIndex([Option<usize>; CSV_FIELDS.len()]);

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        Self(CSV_FIELDS.map(|name| headers.iter().position(|header| header == name)))
    }

    fn field<'a>(&self, row: &'a StringRecord, column: usize) -> &'a str {
        self.0[column]
            .and_then(|position| row.get(position))
            .unwrap_or_default()
    }

    fn record(&self, row: &StringRecord) -> TransactionRecord {
        TransactionRecord {
            timestamp: self.field(row, 0).to_string(),
            quantity: self.field(row, 1).to_string(),
            price_currency: self.field(row, 2).to_string(),
            price: self.field(row, 3).to_string(),
            subtotal: self.field(row, 4).to_string(),
            total: self.field(row, 5).to_string(),
            fees: self.field(row, 6).to_string(),
            exchange: self.field(row, 7).to_string(),
        }
    }
}

/// Reads and writes a ledger CSV file at a fixed path.
///
/// The file is treated as exclusively owned by the process for the duration of a run, no
/// locking is performed.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Creates a new [`LedgerStore`] for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the ledger file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every row of the ledger file, in file order.
    ///
    /// A missing file yields an empty ledger. Each row is normalized (fields trimmed, missing
    /// columns empty, blank `Price Currency` set to `USD`) and rows without a timestamp are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Ledger, LedgerStoreError> {
        if !self.path.exists() {
            tracing::info!("No ledger at {}, starting empty", self.path.display());
            return Ok(Ledger::default());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_path(&self.path)
            .map_err(|source| self.csv_error(source))?;

        let columns = ColumnIndex::new(reader.headers().map_err(|source| self.csv_error(source))?);

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in reader.records() {
            let row = row.map_err(|source| self.csv_error(source))?;
            let record = columns.record(&row).normalized();
            if record.timestamp.is_empty() {
                dropped += 1;
                continue;
            }
            records.push(record);
        }

        if dropped > 0 {
            tracing::warn!("Dropped {dropped} ledger row(s) without a timestamp");
        }
        tracing::debug!(
            "Loaded {} ledger row(s) from {}",
            records.len(),
            self.path.display()
        );

        Ok(Ledger::new(records))
    }

    /// Replaces the ledger file with `ledger`, header included, in the ledger's current order.
    ///
    /// Rows are written to a temporary file alongside the target which is then renamed over it,
    /// so readers never observe a partially written ledger. An existing ledger's permissions carry
    /// over to the replacement.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or moved into place.
    pub fn write(&self, ledger: &Ledger) -> Result<(), LedgerStoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| self.io_error(source))?;

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            // Subject to the process umask, like a plain create
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut temp = builder
            .tempfile_in(&dir)
            .map_err(|source| self.io_error(source))?;

        // Keep the mode of the ledger being replaced
        if let Ok(metadata) = fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|source| self.io_error(source))?;
        }

        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(temp.as_file_mut());

            writer
                .write_record(CSV_FIELDS)
                .map_err(|source| self.csv_error(source))?;
            for record in ledger {
                writer
                    .serialize(record)
                    .map_err(|source| self.csv_error(source))?;
            }
            writer.flush().map_err(|source| self.io_error(source))?;
        }

        temp.as_file()
            .sync_all()
            .map_err(|source| self.io_error(source))?;
        temp.persist(&self.path)
            .map_err(|source| LedgerStoreError::Persist {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Wrote {} ledger row(s) to {}",
            ledger.len(),
            self.path.display()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> LedgerStoreError {
        LedgerStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> LedgerStoreError {
        LedgerStoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
