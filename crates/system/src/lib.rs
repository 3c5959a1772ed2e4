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

//! Orchestration of a ledger synchronization run.
//!
//! The `ledger-sync-system` crate wires a [`FillSource`](ledger_sync_model::fill::FillSource),
//! the fill normalizer, the reconciliation engine and the ledger store into a single
//! [`SyncEngine::run`](engine::SyncEngine::run) pass, configured by an immutable
//! [`SyncConfig`](config::SyncConfig).

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod report;

pub use crate::{
    config::{ConfigError, SyncConfig},
    engine::{SyncEngine, SyncError},
    report::SyncReport,
};
