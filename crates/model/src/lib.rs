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

//! Domain model for reconciling a local BTC purchase ledger with venue trade fills.
//!
//! The `ledger-sync-model` crate defines the canonical [`record::TransactionRecord`], the
//! venue-agnostic [`fill::RawFill`], the rules which turn one into the other
//! ([`normalize::FillNormalizer`]) and the in-memory [`ledger::Ledger`] which deduplicates and
//! orders records before they are persisted.
//!
//! All monetary arithmetic uses [`rust_decimal::Decimal`], values are never routed through
//! floating point.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod datetime;
pub mod enums;
pub mod fill;
pub mod ledger;
pub mod normalize;
pub mod parsing;
pub mod record;
pub mod types;
