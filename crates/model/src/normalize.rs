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

//! Conversion of raw venue fills into canonical ledger records.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    datetime::canonicalize_timestamp,
    enums::FillSide,
    fill::RawFill,
    parsing::parse_decimal_or_zero,
    record::{DEFAULT_PRICE_CURRENCY, TransactionRecord},
    types::{CENT_SCALE, format_quantity, format_usd, round_half_up},
};

/// The reason a raw fill was not converted into a ledger record.
///
/// Rules are evaluated in declaration order and the first failing rule is reported.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FillRejection {
    /// Only buys are ledgered.
    #[error("side {0:?} is not BUY")]
    NotBuy(String),
    /// The fill belongs to a product other than the one requested.
    #[error("product {actual:?} does not match expected {expected:?}")]
    ProductMismatch { expected: String, actual: String },
    /// The size was zero, negative or unparsable.
    #[error("size {0:?} is not strictly positive")]
    NonPositiveSize(String),
    /// The price was zero, negative or unparsable.
    #[error("price {0:?} is not strictly positive")]
    NonPositivePrice(String),
    /// The trade time was absent or blank.
    #[error("missing trade time")]
    MissingTradeTime,
    /// The derived amounts exceed the representable decimal range.
    #[error("amount overflow deriving subtotal from size {size} and price {price}")]
    AmountOverflow { size: Decimal, price: Decimal },
}

/// Converts [`RawFill`]s into [`TransactionRecord`]s for a single exchange.
///
/// Derived amounts:
/// - `Subtotal = round_half_up(size * price, 2)`
/// - `Total = round_half_up(Subtotal + commission, 2)`
/// - `Fees = round_half_up(commission, 2)`
#[derive(Clone, Debug)]
pub struct FillNormalizer {
    exchange: String,
    price_currency: String,
}

impl FillNormalizer {
    /// Creates a new [`FillNormalizer`] recording rows against `exchange` in USD.
    #[must_use]
    pub fn new(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            price_currency: DEFAULT_PRICE_CURRENCY.to_string(),
        }
    }

    /// Sets the currency code written to the `Price Currency` column.
    #[must_use]
    pub fn with_price_currency(mut self, price_currency: impl Into<String>) -> Self {
        self.price_currency = price_currency.into();
        self
    }

    /// Returns the exchange label written to the `Exchange` column.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Converts `fill` into a ledger record.
    ///
    /// When `expected_product_id` is given (and non-empty) the fill's product must match it,
    /// ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns a [`FillRejection`] naming the first acceptance rule the fill failed.
    pub fn normalize(
        &self,
        fill: &RawFill,
        expected_product_id: Option<&str>,
    ) -> Result<TransactionRecord, FillRejection> {
        match FillSide::from_str(fill.side()) {
            Ok(FillSide::Buy) => {}
            _ => return Err(FillRejection::NotBuy(fill.side().to_string())),
        }

        if let Some(expected) = expected_product_id.filter(|id| !id.is_empty())
            && !fill.product_id().eq_ignore_ascii_case(expected)
        {
            return Err(FillRejection::ProductMismatch {
                expected: expected.to_string(),
                actual: fill.product_id().to_string(),
            });
        }

        let size = parse_decimal_or_zero(fill.size());
        let price = parse_decimal_or_zero(fill.price());
        let commission = parse_decimal_or_zero(fill.commission());

        if size <= Decimal::ZERO {
            return Err(FillRejection::NonPositiveSize(fill.size().to_string()));
        }
        if price <= Decimal::ZERO {
            return Err(FillRejection::NonPositivePrice(fill.price().to_string()));
        }

        let trade_time = fill.trade_time().trim();
        if trade_time.is_empty() {
            return Err(FillRejection::MissingTradeTime);
        }

        let overflow = || FillRejection::AmountOverflow { size, price };
        let subtotal = round_half_up(size.checked_mul(price).ok_or_else(overflow)?, CENT_SCALE);
        let total = round_half_up(
            subtotal.checked_add(commission).ok_or_else(overflow)?,
            CENT_SCALE,
        );

        Ok(TransactionRecord {
            timestamp: canonicalize_timestamp(trade_time),
            quantity: format_quantity(size),
            price_currency: self.price_currency.clone(),
            price: format_usd(price),
            subtotal: format_usd(subtotal),
            total: format_usd(total),
            fees: format_usd(commission),
            exchange: self.exchange.clone(),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
