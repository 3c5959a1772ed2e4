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

//! Outcome summary of a synchronization run.

use std::fmt::Display;

/// Summary of a completed synchronization run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Exchange label the fills were sourced from.
    pub venue: String,
    /// Number of products fetched.
    pub products: usize,
    /// Raw fills returned by the source.
    pub fetched: usize,
    /// Fills rejected by the normalizer.
    pub rejected: usize,
    /// Normalized rows already present in the ledger.
    pub duplicates: usize,
    /// Rows added to the ledger.
    pub added: usize,
    /// Whether the ledger file was rewritten.
    pub written: bool,
    /// Whether the run skipped writing by request.
    pub dry_run: bool,
}

impl SyncReport {
    #[must_use]
    pub fn new(venue: impl Into<String>, dry_run: bool) -> Self {
        Self {
            venue: venue.into(),
            dry_run,
            ..Self::default()
        }
    }

    /// Returns the one line status summary printed at the end of a run.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.added == 0 {
            format!("No new {} fills found.", self.venue)
        } else if self.dry_run {
            format!(
                "Found {} new {} transaction row(s), ledger not written (dry run).",
                self.added, self.venue
            )
        } else {
            format!(
                "Added {} new {} transaction row(s).",
                self.added, self.venue
            )
        }
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.status_line())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, false, "No new Coinbase fills found.")]
    #[case(0, true, "No new Coinbase fills found.")]
    #[case(1, false, "Added 1 new Coinbase transaction row(s).")]
    #[case(3, false, "Added 3 new Coinbase transaction row(s).")]
    #[case(
        2,
        true,
        "Found 2 new Coinbase transaction row(s), ledger not written (dry run)."
    )]
    fn test_status_line(#[case] added: usize, #[case] dry_run: bool, #[case] expected: &str) {
        let report = SyncReport {
            added,
            ..SyncReport::new("Coinbase", dry_run)
        };

        assert_eq!(report.status_line(), expected);
        assert_eq!(report.to_string(), expected);
    }
}
