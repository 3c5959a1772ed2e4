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

//! Configuration structures for the Coinbase adapter.

use std::fmt::Debug;

use crate::common::consts::{COINBASE_HTTP_URL, DEFAULT_HTTP_TIMEOUT_SECS};

/// Configuration for the Coinbase Advanced Trade HTTP client.
#[derive(Clone)]
pub struct CoinbaseHttpConfig {
    /// API key name (`organizations/{org}/apiKeys/{key}`).
    pub api_key: String,
    /// PEM encoded EC private key matching `api_key`.
    pub api_secret: String,
    /// Override for the REST base URL.
    pub base_url_http: Option<String>,
    /// HTTP timeout in seconds.
    pub http_timeout_secs: Option<u64>,
}

impl Debug for CoinbaseHttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(CoinbaseHttpConfig))
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url_http", &self.base_url_http)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl CoinbaseHttpConfig {
    /// Creates a new configuration with the given credentials and default endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url_http: None,
            http_timeout_secs: Some(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_base_url_http(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_http = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_http_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.http_timeout_secs = Some(timeout_secs);
        self
    }

    /// Returns the HTTP base URL, respecting any override.
    #[must_use]
    pub fn http_url(&self) -> String {
        self.base_url_http
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| COINBASE_HTTP_URL.to_string())
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
