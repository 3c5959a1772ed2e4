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

//! Core constants shared across the Coinbase Advanced Trade adapter components.

use std::sync::LazyLock;

/// Venue name written to the `Exchange` column of every record sourced from Coinbase.
pub const COINBASE_VENUE: &str = "Coinbase";

pub const COINBASE_HTTP_URL: &str = "https://api.coinbase.com";
pub const COINBASE_API_VERSION: &str = "v3";
pub const COINBASE_FILLS_ENDPOINT: &str = "brokerage/orders/historical/fills";

/// Lifetime of a signed request token in seconds.
pub const JWT_EXPIRY_SECS: i64 = 120;
pub const JWT_ISSUER: &str = "cdp";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every HTTP request.
pub static COINBASE_USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("ledger-sync/{}", env!("CARGO_PKG_VERSION")));
