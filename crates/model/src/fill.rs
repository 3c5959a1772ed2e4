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

//! Venue-agnostic raw fills and the seam through which they are fetched.

use async_trait::async_trait;

/// A single executed trade as reported by a venue, before any validation.
///
/// Every field is optional and carried verbatim: venues may omit, null out or malform any of
/// them. Numeric fields hold the venue's decimal string representation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFill {
    /// Trade side, e.g. `"BUY"` or `"SELL"`.
    pub side: Option<String>,
    /// Product identifier, e.g. `"BTC-USD"`.
    pub product_id: Option<String>,
    /// Executed size in base currency units.
    pub size: Option<String>,
    /// Execution price in quote currency units.
    pub price: Option<String>,
    /// Commission charged in quote currency units.
    pub commission: Option<String>,
    /// Execution time, ISO-8601 or `YYYY-MM-DD HH:MM:SS`.
    pub trade_time: Option<String>,
}

impl RawFill {
    /// Returns the side, or an empty string when absent.
    #[must_use]
    pub fn side(&self) -> &str {
        self.side.as_deref().unwrap_or_default()
    }

    /// Returns the product identifier, or an empty string when absent.
    #[must_use]
    pub fn product_id(&self) -> &str {
        self.product_id.as_deref().unwrap_or_default()
    }

    /// Returns the size, or an empty string when absent.
    #[must_use]
    pub fn size(&self) -> &str {
        self.size.as_deref().unwrap_or_default()
    }

    /// Returns the price, or an empty string when absent.
    #[must_use]
    pub fn price(&self) -> &str {
        self.price.as_deref().unwrap_or_default()
    }

    /// Returns the commission, or an empty string when absent.
    #[must_use]
    pub fn commission(&self) -> &str {
        self.commission.as_deref().unwrap_or_default()
    }

    /// Returns the trade time, or an empty string when absent.
    #[must_use]
    pub fn trade_time(&self) -> &str {
        self.trade_time.as_deref().unwrap_or_default()
    }
}

/// A source of raw fills for a venue.
///
/// Implementations own pagination and payload decoding. Payload-shape problems must be absorbed
/// by truncating the result, while transport and API failures are returned as errors and abort
/// the caller's synchronization run.
#[async_trait]
pub trait FillSource: Send + Sync {
    /// Returns the exchange label recorded against every ledger row from this source.
    fn venue(&self) -> &str;

    /// Fetches up to `max_pages` pages of at most `page_size` fills for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails at the transport or API level.
    async fn fetch_fills(
        &self,
        product_id: &str,
        page_size: u32,
        max_pages: u32,
    ) -> anyhow::Result<Vec<RawFill>>;
}
