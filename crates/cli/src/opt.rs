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

//! Command-line options for the `ledger-sync` binary.

use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use ledger_sync_system::config::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LEDGER_PATH, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_PRODUCT_ID, SyncConfig,
};

/// Main CLI structure for parsing command-line arguments and options.
///
/// Every option falls back to an environment variable, and a `.env` file in the working
/// directory is loaded before parsing.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct LedgerSyncCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands.
#[derive(Parser, Debug)]
pub enum Commands {
    Sync(SyncOpt),
}

/// Options for synchronizing Coinbase fills into the ledger.
#[derive(Parser, Debug, Clone)]
#[command(about = "Sync Coinbase Advanced Trade BTC fills into the ledger", long_about = None)]
pub struct SyncOpt {
    /// Coinbase API key name.
    #[arg(long, env = "COINBASE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Coinbase API secret (EC private key PEM, `\n` escapes allowed).
    #[arg(long, env = "COINBASE_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,
    /// Comma separated product identifiers.
    #[arg(long, env = "COINBASE_PRODUCT_IDS", default_value = DEFAULT_PRODUCT_ID)]
    pub product_ids: String,
    /// Maximum number of fills per page.
    #[arg(long, env = "COINBASE_FILLS_LIMIT", default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,
    /// Maximum number of pages per product.
    #[arg(long, env = "COINBASE_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,
    /// Path of the ledger CSV file.
    #[arg(long, env = "LEDGER_PATH", default_value = DEFAULT_LEDGER_PATH)]
    pub ledger: PathBuf,
    /// Override for the Coinbase REST base URL.
    #[arg(long, env = "COINBASE_BASE_URL")]
    pub base_url: Option<String>,
    /// HTTP timeout in seconds.
    #[arg(long, env = "COINBASE_HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    /// Report new rows without writing the ledger.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncOpt {
    /// Converts the parsed options into a [`SyncConfig`].
    #[must_use]
    pub fn into_config(self) -> SyncConfig {
        let config = SyncConfig::new(
            self.api_key.as_deref().unwrap_or_default(),
            self.api_secret.as_deref().unwrap_or_default(),
        )
        .with_product_ids(&self.product_ids)
        .with_page_size(self.limit)
        .with_max_pages(self.max_pages)
        .with_ledger_path(self.ledger)
        .with_http_timeout_secs(self.timeout_secs)
        .with_dry_run(self.dry_run);

        match self.base_url {
            Some(base_url) if !base_url.trim().is_empty() => config.with_base_url_http(base_url),
            _ => config,
        }
    }
}

/// Returns whether an argument parsing error should fail the process.
///
/// Help and version requests surface as errors from clap but are successful runs.
#[must_use]
pub fn is_parse_failure(error: &clap::Error) -> bool {
    !matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse_sync(args: &[&str]) -> SyncOpt {
        let cli = LedgerSyncCli::try_parse_from(
            ["ledger-sync", "sync"].iter().chain(args.iter()).copied(),
        )
        .unwrap();
        match cli.command {
            Commands::Sync(opt) => opt,
        }
    }

    #[rstest]
    fn test_sync_options_from_arguments() {
        let opt = parse_sync(&[
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "--product-ids",
            "btc-usd,eth-usd",
            "--limit",
            "50",
            "--max-pages",
            "3",
            "--ledger",
            "data/ledger.csv",
            "--base-url",
            "http://127.0.0.1:9999",
            "--timeout-secs",
            "5",
            "--dry-run",
        ]);

        let config = opt.into_config();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(config.product_ids, vec!["BTC-USD", "ETH-USD"]);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.ledger_path, PathBuf::from("data/ledger.csv"));
        assert_eq!(config.base_url_http.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(config.http_timeout_secs, 5);
        assert!(config.dry_run);
    }

    #[rstest]
    fn test_blank_base_url_is_ignored() {
        let opt = parse_sync(&["--api-key", "key", "--api-secret", "secret", "--base-url", " "]);

        assert_eq!(opt.into_config().base_url_http, None);
    }

    #[rstest]
    #[case(&["ledger-sync", "sync", "--limit", "many"])]
    #[case(&["ledger-sync", "sync", "--max-pages", "-1"])]
    #[case(&["ledger-sync", "sync", "--timeout-secs", "soon"])]
    #[case(&["ledger-sync", "reconcile"])]
    fn test_malformed_arguments_are_failures(#[case] args: &[&str]) {
        let error = LedgerSyncCli::try_parse_from(args.iter().copied()).unwrap_err();

        assert!(is_parse_failure(&error));
    }

    #[rstest]
    #[case(&["ledger-sync", "--help"])]
    #[case(&["ledger-sync", "sync", "--help"])]
    #[case(&["ledger-sync", "--version"])]
    fn test_help_and_version_are_not_failures(#[case] args: &[&str]) {
        let error = LedgerSyncCli::try_parse_from(args.iter().copied()).unwrap_err();

        assert!(!is_parse_failure(&error));
    }
}
