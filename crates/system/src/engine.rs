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

//! The synchronization pipeline: load, fetch, normalize, reconcile and persist.

use ledger_sync_model::{fill::FillSource, normalize::FillNormalizer, record::TransactionRecord};
use ledger_sync_persistence::{LedgerStore, LedgerStoreError};
use thiserror::Error;

use crate::{
    config::{ConfigError, SyncConfig},
    report::SyncReport,
};

/// Errors which abort a synchronization run.
///
/// The ledger file is never modified when a run fails.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to fetch fills for {product_id}: {source}")]
    Fetch {
        product_id: String,
        source: anyhow::Error,
    },
    #[error(transparent)]
    Ledger(#[from] LedgerStoreError),
}

/// Drives a single synchronization run against a [`FillSource`].
#[derive(Debug)]
pub struct SyncEngine<S> {
    config: SyncConfig,
    source: S,
    store: LedgerStore,
    normalizer: FillNormalizer,
}

impl<S: FillSource> SyncEngine<S> {
    /// Creates a new [`SyncEngine`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: SyncConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let store = LedgerStore::new(&config.ledger_path);
        let normalizer = FillNormalizer::new(source.venue());

        Ok(Self {
            config,
            source,
            store,
            normalizer,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the pipeline once.
    ///
    /// Products are fetched sequentially in configured order. The ledger is rewritten only
    /// when at least one new row was accepted and the run is not a dry run.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read or written, or if fetching any product
    /// fails. A fetch failure aborts the run before anything is written.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let mut ledger = self.store.load()?;
        tracing::debug!(
            "Loaded {} existing rows from {}",
            ledger.len(),
            self.store.path().display()
        );

        let mut report = SyncReport::new(self.source.venue(), self.config.dry_run);
        let mut candidates: Vec<TransactionRecord> = Vec::new();

        for product_id in &self.config.product_ids {
            let fills = self
                .source
                .fetch_fills(product_id, self.config.page_size, self.config.max_pages)
                .await
                .map_err(|source| SyncError::Fetch {
                    product_id: product_id.clone(),
                    source,
                })?;

            let mut accepted = 0;
            for fill in &fills {
                match self.normalizer.normalize(fill, Some(product_id)) {
                    Ok(record) => {
                        candidates.push(record);
                        accepted += 1;
                    }
                    Err(rejection) => {
                        tracing::debug!("Rejected {product_id} fill: {rejection}");
                        report.rejected += 1;
                    }
                }
            }

            tracing::info!(
                "Fetched {} {product_id} fills, {accepted} eligible for the ledger",
                fills.len()
            );
            report.products += 1;
            report.fetched += fills.len();
        }

        let outcome = ledger.merge(candidates);
        report.added = outcome.accepted;
        report.duplicates = outcome.duplicates;

        if !outcome.has_changes() {
            return Ok(report);
        }

        if self.config.dry_run {
            tracing::info!(
                "Dry run, skipping write of {} rows to {}",
                ledger.len(),
                self.store.path().display()
            );
            return Ok(report);
        }

        self.store.write(&ledger)?;
        report.written = true;
        tracing::info!(
            "Wrote {} rows to {}",
            ledger.len(),
            self.store.path().display()
        );

        Ok(report)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        path::{Path, PathBuf},
        sync::Mutex,
    };

    use async_trait::async_trait;
    use ledger_sync_model::fill::RawFill;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "Timestamp,Quantity Transacted,Price Currency,Price at Transaction,Subtotal,Total,Fees,Exchange\n";

    #[derive(Debug, Default)]
    struct StubFillSource {
        fills: HashMap<String, Vec<RawFill>>,
        failing: Vec<String>,
        calls: Mutex<Vec<(String, u32, u32)>>,
    }

    impl StubFillSource {
        fn with_fills(mut self, product_id: &str, fills: Vec<RawFill>) -> Self {
            self.fills.insert(product_id.to_string(), fills);
            self
        }

        fn with_failure(mut self, product_id: &str) -> Self {
            self.failing.push(product_id.to_string());
            self
        }

        fn calls(&self) -> Vec<(String, u32, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FillSource for StubFillSource {
        fn venue(&self) -> &str {
            "Coinbase"
        }

        async fn fetch_fills(
            &self,
            product_id: &str,
            page_size: u32,
            max_pages: u32,
        ) -> anyhow::Result<Vec<RawFill>> {
            self.calls
                .lock()
                .unwrap()
                .push((product_id.to_string(), page_size, max_pages));

            if self.failing.iter().any(|id| id == product_id) {
                anyhow::bail!("Unexpected HTTP status code 500: boom");
            }
            Ok(self.fills.get(product_id).cloned().unwrap_or_default())
        }
    }

    fn buy(product_id: &str, size: &str, price: &str, commission: &str, time: &str) -> RawFill {
        RawFill {
            side: Some("BUY".to_string()),
            product_id: Some(product_id.to_string()),
            size: Some(size.to_string()),
            price: Some(price.to_string()),
            commission: Some(commission.to_string()),
            trade_time: Some(time.to_string()),
        }
    }

    #[fixture]
    fn ledger_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn ledger_path(dir: &TempDir) -> PathBuf {
        dir.path().join("transactions.csv")
    }

    fn config(path: &Path) -> SyncConfig {
        SyncConfig::new("key", "secret").with_ledger_path(path)
    }

    #[rstest]
    fn test_new_validates_config() {
        let result = SyncEngine::new(SyncConfig::default(), StubFillSource::default());

        assert_eq!(result.err(), Some(ConfigError::MissingCredentials));
    }

    #[rstest]
    #[tokio::test]
    async fn test_run_writes_new_buy_fill(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        let source = StubFillSource::default().with_fills(
            "BTC-USD",
            vec![buy("BTC-USD", "0.5", "60000", "1.50", "2024-01-01T12:00:00Z")],
        );
        let engine = SyncEngine::new(config(&path), source).unwrap();

        let report = engine.run().await.unwrap();

        assert_eq!(report.added, 1);
        assert!(report.written);
        assert_eq!(report.status_line(), "Added 1 new Coinbase transaction row(s).");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!(
                "{HEADER}2024-01-01 12:00:00,0.50000000,USD,\"$60,000.00\",\"$30,000.00\",\"$30,001.50\",$1.50,Coinbase\n"
            )
        );
        assert_eq!(engine.source().calls(), vec![("BTC-USD".to_string(), 100, 10)]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_rerun_is_idempotent_and_skips_write(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        let source = StubFillSource::default().with_fills(
            "BTC-USD",
            vec![buy("BTC-USD", "0.5", "60000", "1.50", "2024-01-01T12:00:00Z")],
        );
        let engine = SyncEngine::new(config(&path), source).unwrap();
        engine.run().await.unwrap();
        let first = std::fs::read(&path).unwrap();
        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

        let report = engine.run().await.unwrap();

        assert_eq!(report.added, 0);
        assert_eq!(report.duplicates, 1);
        assert!(!report.written);
        assert_eq!(report.status_line(), "No new Coinbase fills found.");
        assert_eq!(std::fs::read(&path).unwrap(), first);
        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
    }

    #[rstest]
    #[tokio::test]
    async fn test_fetch_failure_leaves_ledger_untouched(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        let existing = format!(
            "{HEADER}2023-06-01 08:00:00,0.10000000,USD,\"$25,000.00\",\"$2,500.00\",\"$2,501.00\",$1.00,Coinbase\n"
        );
        std::fs::write(&path, &existing).unwrap();
        let source = StubFillSource::default()
            .with_fills(
                "BTC-USD",
                vec![buy("BTC-USD", "0.5", "60000", "1.50", "2024-01-01T12:00:00Z")],
            )
            .with_failure("ETH-USD");
        let engine =
            SyncEngine::new(config(&path).with_product_ids("BTC-USD,ETH-USD"), source).unwrap();

        let err = engine.run().await.unwrap_err();

        match &err {
            SyncError::Fetch { product_id, .. } => assert_eq!(product_id, "ETH-USD"),
            other => panic!("expected Fetch error, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Failed to fetch fills for ETH-USD: Unexpected HTTP status code 500: boom"
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), existing);
    }

    #[rstest]
    #[tokio::test]
    async fn test_dry_run_does_not_write(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        let source = StubFillSource::default().with_fills(
            "BTC-USD",
            vec![buy("BTC-USD", "0.5", "60000", "1.50", "2024-01-01T12:00:00Z")],
        );
        let engine = SyncEngine::new(config(&path).with_dry_run(true), source).unwrap();

        let report = engine.run().await.unwrap();

        assert_eq!(report.added, 1);
        assert!(!report.written);
        assert!(!path.exists());
    }

    #[rstest]
    #[tokio::test]
    async fn test_ineligible_fills_are_rejected(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        let mut sell = buy("BTC-USD", "0.5", "60000", "1.50", "2024-01-01T12:00:00Z");
        sell.side = Some("SELL".to_string());
        let source = StubFillSource::default().with_fills(
            "BTC-USD",
            vec![
                sell,
                buy("BTC-USD", "0", "60000", "1.50", "2024-01-01T12:00:00Z"),
                buy("BTC-USD", "0.5", "-1", "1.50", "2024-01-01T12:00:00Z"),
                buy("ETH-USD", "0.5", "3000", "1.50", "2024-01-01T12:00:00Z"),
                buy("BTC-USD", "0.5", "60000", "1.50", "   "),
            ],
        );
        let engine = SyncEngine::new(config(&path), source).unwrap();

        let report = engine.run().await.unwrap();

        assert_eq!(report.fetched, 5);
        assert_eq!(report.rejected, 5);
        assert_eq!(report.added, 0);
        assert!(!path.exists());
    }

    #[rstest]
    #[tokio::test]
    async fn test_merged_ledger_is_sorted_newest_first(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        std::fs::write(
            &path,
            format!(
                "{HEADER}2024-01-01 10:00:00,0.10000000,USD,\"$40,000.00\",\"$4,000.00\",\"$4,001.00\",$1.00,Coinbase\n"
            ),
        )
        .unwrap();
        let source = StubFillSource::default()
            .with_fills(
                "BTC-USD",
                vec![
                    buy("BTC-USD", "0.2", "42000", "0", "2024-01-01T09:00:00Z"),
                    buy("btc-usd", "0.3", "43000", "0", "2024-01-01T11:00:00Z"),
                ],
            )
            .with_fills(
                "BTC-EUR",
                vec![buy("BTC-EUR", "0.4", "39000", "0", "2024-01-02T00:00:00Z")],
            );
        let engine =
            SyncEngine::new(config(&path).with_product_ids("btc-usd, btc-eur"), source).unwrap();

        let report = engine.run().await.unwrap();

        assert_eq!(report.products, 2);
        assert_eq!(report.added, 3);
        let timestamps: Vec<String> = LedgerStore::new(&path)
            .load()
            .unwrap()
            .iter()
            .map(|record| record.timestamp.clone())
            .collect();
        assert_eq!(
            timestamps,
            vec![
                "2024-01-02 00:00:00",
                "2024-01-01 11:00:00",
                "2024-01-01 10:00:00",
                "2024-01-01 09:00:00",
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_duplicate_fills_within_run_are_added_once(ledger_dir: TempDir) {
        let path = ledger_path(&ledger_dir);
        let fill = buy("BTC-USD", "0.5", "60000", "1.50", "2024-01-01T12:00:00Z");
        let source =
            StubFillSource::default().with_fills("BTC-USD", vec![fill.clone(), fill]);
        let engine = SyncEngine::new(config(&path), source).unwrap();

        let report = engine.run().await.unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(LedgerStore::new(&path).load().unwrap().len(), 1);
    }
}
