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

//! The canonical persisted ledger row and its deduplication key.

use std::fmt::Display;

use serde::Serialize;

/// The ledger column names, in the fixed order they are persisted.
pub const CSV_FIELDS: [&str; 8] = [
    "Timestamp",
    "Quantity Transacted",
    "Price Currency",
    "Price at Transaction",
    "Subtotal",
    "Total",
    "Fees",
    "Exchange",
];

/// The currency recorded when a row carries none.
pub const DEFAULT_PRICE_CURRENCY: &str = "USD";

/// A single BTC purchase as persisted in the ledger.
///
/// Every column is held in its rendered string form so rows loaded from disk round-trip
/// byte-for-byte. Rows created from fills carry a UTC `YYYY-MM-DD HH:MM:SS` timestamp, an
/// eight-decimal quantity and `$`-prefixed, comma-grouped, two-decimal currency amounts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Quantity Transacted")]
    pub quantity: String,
    #[serde(rename = "Price Currency")]
    pub price_currency: String,
    #[serde(rename = "Price at Transaction")]
    pub price: String,
    #[serde(rename = "Subtotal")]
    pub subtotal: String,
    #[serde(rename = "Total")]
    pub total: String,
    #[serde(rename = "Fees")]
    pub fees: String,
    #[serde(rename = "Exchange")]
    pub exchange: String,
}

impl TransactionRecord {
    /// Returns a copy with every field trimmed and a blank currency defaulted to `USD`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let price_currency = match self.price_currency.trim() {
            "" => DEFAULT_PRICE_CURRENCY.to_string(),
            currency => currency.to_string(),
        };

        Self {
            timestamp: self.timestamp.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            price_currency,
            price: self.price.trim().to_string(),
            subtotal: self.subtotal.trim().to_string(),
            total: self.total.trim().to_string(),
            fees: self.fees.trim().to_string(),
            exchange: self.exchange.trim().to_string(),
        }
    }

    /// Returns the composite key identifying this transaction within a ledger.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self)
    }
}

/// A composite identity over `(Timestamp, Quantity, Price, Total, Exchange)`.
///
/// Venue trade ids are never persisted, so two rows are the same transaction exactly when these
/// five rendered columns agree after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey(String);

impl DedupKey {
    /// Separator placed between the key components.
    pub const SEPARATOR: &'static str = "|";

    /// Creates a new [`DedupKey`] for the given `record`.
    #[must_use]
    pub fn new(record: &TransactionRecord) -> Self {
        Self(
            [
                record.timestamp.trim(),
                record.quantity.trim(),
                record.price.trim(),
                record.total.trim(),
                record.exchange.trim(),
            ]
            .join(Self::SEPARATOR),
        )
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn record() -> TransactionRecord {
        TransactionRecord {
            timestamp: "2024-01-01 12:00:00".to_string(),
            quantity: "0.50000000".to_string(),
            price_currency: "USD".to_string(),
            price: "$60,000.00".to_string(),
            subtotal: "$30,000.00".to_string(),
            total: "$30,001.50".to_string(),
            fees: "$1.50".to_string(),
            exchange: "Coinbase".to_string(),
        }
    }

    #[rstest]
    fn test_dedup_key_format(record: TransactionRecord) {
        assert_eq!(
            record.dedup_key().as_str(),
            "2024-01-01 12:00:00|0.50000000|$60,000.00|$30,001.50|Coinbase"
        );
    }

    #[rstest]
    fn test_dedup_key_ignores_surrounding_whitespace(record: TransactionRecord) {
        let mut padded = record.clone();
        padded.timestamp = format!("  {}  ", record.timestamp);
        padded.exchange = format!("{} ", record.exchange);
        assert_eq!(padded.dedup_key(), record.dedup_key());
    }

    #[rstest]
    fn test_dedup_key_ignores_subtotal_fees_and_currency(record: TransactionRecord) {
        let mut other = record.clone();
        other.subtotal = "$1.00".to_string();
        other.fees = "$0.00".to_string();
        other.price_currency = "EUR".to_string();
        assert_eq!(other.dedup_key(), record.dedup_key());
    }

    #[rstest]
    fn test_dedup_key_distinguishes_exchange(record: TransactionRecord) {
        let mut other = record.clone();
        other.exchange = "Kraken".to_string();
        assert_ne!(other.dedup_key(), record.dedup_key());
    }

    #[rstest]
    fn test_normalized_trims_and_defaults_currency() {
        let raw = TransactionRecord {
            timestamp: " 2024-01-01 12:00:00 ".to_string(),
            quantity: "0.1 ".to_string(),
            price_currency: "  ".to_string(),
            exchange: "Coinbase\t".to_string(),
            ..Default::default()
        };

        let normalized = raw.normalized();

        assert_eq!(normalized.timestamp, "2024-01-01 12:00:00");
        assert_eq!(normalized.quantity, "0.1");
        assert_eq!(normalized.price_currency, "USD");
        assert_eq!(normalized.price, "");
        assert_eq!(normalized.exchange, "Coinbase");
    }

    #[rstest]
    fn test_normalized_keeps_explicit_currency(record: TransactionRecord) {
        let mut other = record;
        other.price_currency = "USDC".to_string();
        assert_eq!(other.normalized().price_currency, "USDC");
    }
}
