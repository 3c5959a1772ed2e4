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

//! Half-up rounding and currency rendering for USD amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use thousands::Separable;

/// The number of fractional digits carried by every currency column.
pub const CENT_SCALE: u32 = 2;

/// The symbol prefixed to every rendered currency amount.
pub const USD_SYMBOL: &str = "$";

/// Rounds `value` to `dp` fractional digits, with midpoints rounded away from zero.
///
/// The result always carries exactly `dp` fractional digits, so `60000` rounded to two places
/// renders as `60000.00`.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Renders `value` as a USD amount, e.g. `$30,001.50`.
///
/// The amount is rounded half-up to the cent first. Negative amounts keep the sign after the
/// symbol (`$-1.50`), which is how rebates have historically been recorded in the ledger.
#[must_use]
pub fn format_usd(value: Decimal) -> String {
    let rounded = round_half_up(value, CENT_SCALE);
    format!("{USD_SYMBOL}{}", rounded.to_string().separate_with_commas())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
