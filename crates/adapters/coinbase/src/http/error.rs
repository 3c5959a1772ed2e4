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

//! Error structures and enumerations for the Coinbase integration.

use thiserror::Error;

use crate::{common::credential::CredentialError, http::query::GetFillsParamsBuilderError};

/// A typed error enumeration for the Coinbase HTTP client.
#[derive(Debug, Clone, Error)]
pub enum CoinbaseHttpError {
    /// The client configuration cannot be used, for example an unparsable base URL.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Credential loading or request signing failed.
    #[error("Authentication error: {0}")]
    Auth(#[from] CredentialError),
    /// Query parameters could not be built.
    #[error("Build error: {0}")]
    BuildError(String),
    /// Connection, TLS or timeout failure before a response was received.
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Any non-success HTTP status returned by Coinbase.
    #[error("Unexpected HTTP status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    /// Failure during JSON deserialization.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// The response decoded as JSON but is not the expected shape.
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl From<reqwest::Error> for CoinbaseHttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError(error.to_string())
    }
}

impl From<serde_json::Error> for CoinbaseHttpError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl From<GetFillsParamsBuilderError> for CoinbaseHttpError {
    fn from(error: GetFillsParamsBuilderError) -> Self {
        Self::BuildError(error.to_string())
    }
}
