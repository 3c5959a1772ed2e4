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

//! Enumerations for the ledger domain model.

use strum::{AsRefStr, Display, EnumString};

/// The side of an executed fill.
///
/// Only [`FillSide::Buy`] fills are ever recorded in the ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum FillSide {
    Buy,
    Sell,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("BUY", FillSide::Buy)]
    #[case("buy", FillSide::Buy)]
    #[case("Buy", FillSide::Buy)]
    #[case("SELL", FillSide::Sell)]
    #[case("sell", FillSide::Sell)]
    fn test_fill_side_from_str(#[case] input: &str, #[case] expected: FillSide) {
        assert_eq!(FillSide::from_str(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("UNKNOWN_ORDER_SIDE")]
    #[case(" BUY")]
    fn test_fill_side_rejects_unknown(#[case] input: &str) {
        assert!(FillSide::from_str(input).is_err());
    }

    #[rstest]
    fn test_fill_side_display() {
        assert_eq!(FillSide::Buy.to_string(), "BUY");
        assert_eq!(FillSide::Sell.as_ref(), "SELL");
    }
}
