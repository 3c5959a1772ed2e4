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

//! Lenient numeric parsing for venue-supplied decimal strings.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses `value` as a decimal, defaulting to zero when it cannot be interpreted.
///
/// Accepts plain (`"0.5"`, `"-1.25"`) and scientific (`"5e-1"`) notation. A single malformed field
/// must not fail a whole synchronization run, so the zero default is deliberate: callers apply
/// positivity checks which then reject the affected fill.
#[must_use]
pub fn parse_decimal_or_zero(value: &str) -> Decimal {
    parse_decimal(value).unwrap_or_else(|| {
        tracing::debug!("Unparsable decimal {value:?}, defaulting to zero");
        Decimal::ZERO
    })
}

/// Parses `value` as a decimal, returning `None` when it cannot be interpreted.
#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
