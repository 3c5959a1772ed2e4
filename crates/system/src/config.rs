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

//! Configuration for a ledger synchronization run.

use std::{fmt::Debug, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_PRODUCT_ID: &str = "BTC-USD";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 10;
pub const DEFAULT_LEDGER_PATH: &str = "transactions.csv";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Errors raised when a [`SyncConfig`] cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("COINBASE_API_KEY and COINBASE_API_SECRET are required.")]
    MissingCredentials,
    #[error("Invalid page size {0}: must be at least 1")]
    InvalidPageSize(u32),
}

/// Configuration for a single synchronization run.
///
/// Built once at the process edge and passed by value into the engine.
#[derive(Clone)]
pub struct SyncConfig {
    /// Venue API key name.
    pub api_key: String,
    /// Venue API secret.
    pub api_secret: String,
    /// Products to synchronize, in request order.
    pub product_ids: Vec<String>,
    /// Maximum number of fills requested per page.
    pub page_size: u32,
    /// Maximum number of pages requested per product.
    pub max_pages: u32,
    /// Path of the ledger CSV file.
    pub ledger_path: PathBuf,
    /// Override for the venue REST base URL.
    pub base_url_http: Option<String>,
    /// HTTP timeout in seconds.
    pub http_timeout_secs: u64,
    /// When true new rows are reported but the ledger is not written.
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            product_ids: vec![DEFAULT_PRODUCT_ID.to_string()],
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            base_url_http: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            dry_run: false,
        }
    }
}

impl Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(SyncConfig))
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("product_ids", &self.product_ids)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("ledger_path", &self.ledger_path)
            .field("base_url_http", &self.base_url_http)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl SyncConfig {
    /// Creates a new configuration with the given credentials and default settings.
    ///
    /// Surrounding whitespace is trimmed from both credentials.
    #[must_use]
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        Self {
            api_key: api_key.trim().to_string(),
            api_secret: api_secret.trim().to_string(),
            ..Self::default()
        }
    }

    /// Sets the products from a comma separated list, see [`parse_product_ids`].
    #[must_use]
    pub fn with_product_ids(mut self, product_ids: &str) -> Self {
        self.product_ids = parse_product_ids(product_ids);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn with_ledger_path(mut self, ledger_path: impl Into<PathBuf>) -> Self {
        self.ledger_path = ledger_path.into();
        self
    }

    #[must_use]
    pub fn with_base_url_http(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_http = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_http_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.http_timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Checks the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns an error if either credential is blank or the page size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() || self.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

/// Parses a comma separated product list.
///
/// Entries are trimmed and upper-cased and blanks dropped. An effectively empty list yields
/// [`DEFAULT_PRODUCT_ID`].
#[must_use]
pub fn parse_product_ids(raw: &str) -> Vec<String> {
    let product_ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_uppercase)
        .collect();

    if product_ids.is_empty() {
        vec![DEFAULT_PRODUCT_ID.to_string()]
    } else {
        product_ids
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
    #[case("BTC-USD", vec!["BTC-USD"])]
    #[case("btc-usd, eth-usd", vec!["BTC-USD", "ETH-USD"])]
    #[case(" btc-usd ,, ,eth-eur,", vec!["BTC-USD", "ETH-EUR"])]
    #[case("", vec!["BTC-USD"])]
    #[case(" , ,", vec!["BTC-USD"])]
    fn test_parse_product_ids(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_product_ids(raw), expected);
    }

    #[rstest]
    fn test_defaults() {
        let config = SyncConfig::new("key", "secret");

        assert_eq!(config.product_ids, vec!["BTC-USD"]);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.ledger_path, PathBuf::from("transactions.csv"));
        assert_eq!(config.base_url_http, None);
        assert_eq!(config.http_timeout_secs, 30);
        assert!(!config.dry_run);
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case("", "secret")]
    #[case("key", "")]
    #[case("  ", "\n")]
    fn test_validate_requires_credentials(#[case] api_key: &str, #[case] api_secret: &str) {
        let config = SyncConfig::new(api_key, api_secret);

        assert_eq!(config.validate(), Err(ConfigError::MissingCredentials));
    }

    #[rstest]
    fn test_validate_rejects_zero_page_size() {
        let config = SyncConfig::new("key", "secret").with_page_size(0);

        assert_eq!(config.validate(), Err(ConfigError::InvalidPageSize(0)));
    }

    #[rstest]
    fn test_zero_max_pages_is_valid() {
        let config = SyncConfig::new("key", "secret").with_max_pages(0);

        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    fn test_credentials_are_trimmed() {
        let config = SyncConfig::new("  key\n", "\tsecret ");

        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
    }

    #[rstest]
    fn test_debug_redacts_secret() {
        let config = SyncConfig::new("key", "super-secret-material");

        let dbg_out = format!("{config:?}");

        assert!(dbg_out.contains("api_secret: \"<redacted>\""));
        assert!(!dbg_out.contains("super-secret-material"));
    }
}
