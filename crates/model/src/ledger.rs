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

//! The in-memory ledger and its reconciliation against newly fetched records.

use std::{cmp::Reverse, collections::HashSet};

use crate::{
    datetime::parse_timestamp,
    record::{DedupKey, TransactionRecord},
};

/// The result of merging candidate records into a [`Ledger`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Candidates appended to the ledger.
    pub accepted: usize,
    /// Candidates dropped because their key was already present.
    pub duplicates: usize,
}

impl MergeOutcome {
    /// Returns `true` if at least one candidate was appended.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.accepted > 0
    }
}

/// An ordered collection of [`TransactionRecord`]s, unique by [`DedupKey`] among merged rows.
///
/// Rows loaded from disk are kept verbatim even if they duplicate each other; uniqueness is only
/// enforced for candidates merged in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    /// Creates a new [`Ledger`] from `records`, preserving their order.
    #[must_use]
    pub const fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the ledger holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records in their current order.
    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Returns an iterator over the records in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Consumes the ledger, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }

    /// Returns the set of dedup keys over all records.
    #[must_use]
    pub fn keys(&self) -> HashSet<DedupKey> {
        self.records.iter().map(TransactionRecord::dedup_key).collect()
    }

    /// Merges `candidates` into the ledger.
    ///
    /// Candidates are visited in the given order. A candidate is appended only if its key is
    /// absent from both the existing rows and the candidates already accepted by this call.
    /// The ledger is then stably sorted by parsed timestamp, newest first, so rows sharing a
    /// timestamp keep their relative order (existing rows ahead of new ones).
    pub fn merge<I>(&mut self, candidates: I) -> MergeOutcome
    where
        I: IntoIterator<Item = TransactionRecord>,
    {
        let mut seen = self.keys();
        let mut outcome = MergeOutcome::default();

        for candidate in candidates {
            if seen.insert(candidate.dedup_key()) {
                tracing::debug!("Accepted {}", candidate.dedup_key());
                self.records.push(candidate);
                outcome.accepted += 1;
            } else {
                tracing::debug!("Duplicate {}", candidate.dedup_key());
                outcome.duplicates += 1;
            }
        }

        self.sort_descending();
        outcome
    }

    /// Stably sorts the records by parsed timestamp, newest first.
    ///
    /// Unparsable timestamps sort last.
    pub fn sort_descending(&mut self) {
        self.records
            .sort_by_cached_key(|record| Reverse(parse_timestamp(&record.timestamp)));
    }
}

impl From<Vec<TransactionRecord>> for Ledger {
    fn from(records: Vec<TransactionRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Merges `candidates` into a copy of `existing`, returning the reconciled ledger.
#[must_use]
pub fn merge<I>(existing: &Ledger, candidates: I) -> Ledger
where
    I: IntoIterator<Item = TransactionRecord>,
{
    let mut ledger = existing.clone();
    ledger.merge(candidates);
    ledger
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
