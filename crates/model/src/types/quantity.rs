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

//! Rendering for the `Quantity Transacted` column.

use rust_decimal::{Decimal, RoundingStrategy};

/// The number of fractional digits rendered for a BTC quantity.
pub const QUANTITY_SCALE: u32 = 8;

/// Renders `value` with exactly eight fractional digits, e.g. `0.50000000`.
///
/// Excess precision is rounded to nearest with ties to even, trailing zeros are always kept.
#[must_use]
pub fn format_quantity(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(QUANTITY_SCALE);
    rounded.to_string()
}
