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

//! Command-line entry point for the BTC ledger synchronization engine.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

pub mod logging;
pub mod opt;

use ledger_sync_coinbase::{CoinbaseHttpClient, CoinbaseHttpConfig};
use ledger_sync_system::{SyncEngine, SyncReport};

use crate::opt::{Commands, LedgerSyncCli, SyncOpt};

/// Runs the parsed command, printing its status line on success.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn run(opt: LedgerSyncCli) -> anyhow::Result<()> {
    match opt.command {
        Commands::Sync(sync_opt) => {
            let report = run_sync(sync_opt).await?;
            println!("{report}");
        }
    }
    Ok(())
}

/// Synchronizes Coinbase fills into the ledger.
///
/// # Errors
///
/// Returns an error if the configuration or credentials are invalid, any product fails to
/// fetch, or the ledger cannot be read or written.
pub async fn run_sync(opt: SyncOpt) -> anyhow::Result<SyncReport> {
    let config = opt.into_config();
    config.validate()?;

    let mut http_config = CoinbaseHttpConfig::new(&config.api_key, &config.api_secret)
        .with_http_timeout_secs(config.http_timeout_secs);
    if let Some(base_url) = &config.base_url_http {
        http_config = http_config.with_base_url_http(base_url);
    }
    let client = CoinbaseHttpClient::new(&http_config)?;

    tracing::debug!("Starting sync with {config:?}");

    let engine = SyncEngine::new(config, client)?;
    Ok(engine.run().await?)
}
