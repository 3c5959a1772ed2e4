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

//! Provides an ergonomic client for the Coinbase Advanced Trade REST API.
//!
//! Every request is authenticated with a freshly signed ES256 bearer token. Only the historical
//! fills endpoint is exposed, with cursor pagination handled by
//! [`CoinbaseHttpClient::request_fills`].

use std::time::Duration;

use async_trait::async_trait;
use ledger_sync_model::fill::{FillSource, RawFill};
use reqwest::{
    Method,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::{
    error::CoinbaseHttpError,
    models::FillsPage,
    query::{GetFillsParams, GetFillsParamsBuilder},
};
use crate::{
    common::{
        consts::{
            COINBASE_API_VERSION, COINBASE_FILLS_ENDPOINT, COINBASE_USER_AGENT, COINBASE_VENUE,
        },
        credential::Credential,
    },
    config::CoinbaseHttpConfig,
};

/// Provides a HTTP client for the Coinbase Advanced Trade REST API.
#[derive(Debug, Clone)]
pub struct CoinbaseHttpClient {
    base_url: String,
    host: String,
    credential: Credential,
    client: reqwest::Client,
}

impl CoinbaseHttpClient {
    /// Creates a new [`CoinbaseHttpClient`] from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed, the credentials cannot be loaded or
    /// the underlying HTTP client cannot be built.
    pub fn new(config: &CoinbaseHttpConfig) -> Result<Self, CoinbaseHttpError> {
        let base_url = config.http_url();
        let host = request_host(&base_url)?;
        let credential = Credential::new(config.api_key.clone(), &config.api_secret)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .user_agent(COINBASE_USER_AGENT.as_str())
            .build()?;

        Ok(Self {
            base_url,
            host,
            credential,
            client,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_request<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: &P,
    ) -> Result<Value, CoinbaseHttpError> {
        let jwt = self
            .credential
            .generate_jwt(method.as_str(), &self.host, path)?;
        let url = format!("{}{path}", self.base_url);

        tracing::trace!("Sending {method} {url}");

        let response = self
            .client
            .request(method, url)
            .bearer_auth(jwt)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CoinbaseHttpError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Requests a single page of historical fills.
    ///
    /// Returns `Ok(None)` when the response carries no `fills` array.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Coinbase responds with a non-success status, or
    /// the body is not a JSON object.
    ///
    /// # References
    ///
    /// <https://docs.cdp.coinbase.com/advanced-trade/reference/retailbrokerageapi_getfills>
    pub async fn http_get_fills(
        &self,
        params: &GetFillsParams,
    ) -> Result<Option<FillsPage>, CoinbaseHttpError> {
        let path = format!("/api/{COINBASE_API_VERSION}/{COINBASE_FILLS_ENDPOINT}");
        let payload = self.send_request(Method::GET, &path, params).await?;
        FillsPage::decode(&payload)
    }

    /// Requests up to `max_pages` pages of fills for `product_id`, following cursors.
    ///
    /// Pagination stops early when a page has no `fills` array, is empty, or carries no
    /// cursor. Fills from completed pages are kept in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails. Fills gathered from earlier pages are
    /// discarded.
    pub async fn request_fills(
        &self,
        product_id: &str,
        page_size: u32,
        max_pages: u32,
    ) -> Result<Vec<RawFill>, CoinbaseHttpError> {
        let mut fills = Vec::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=max_pages {
            let mut builder = GetFillsParamsBuilder::default();
            builder.product_ids(product_id).limit(page_size);
            if let Some(cursor) = cursor.take() {
                builder.cursor(cursor);
            }
            let params = builder.build()?;

            let Some(page) = self.http_get_fills(&params).await? else {
                tracing::warn!(
                    "Fills page {page_number} for {product_id} has no fills array, stopping"
                );
                break;
            };

            if page.skipped > 0 {
                tracing::debug!(
                    "Skipped {} malformed entries on fills page {page_number} for {product_id}",
                    page.skipped
                );
            }

            tracing::debug!(
                "Received {} fills on page {page_number} for {product_id}",
                page.fills.len()
            );

            let is_empty = page.is_empty();
            fills.extend(page.fills);
            cursor = page.cursor;

            if cursor.is_none() || is_empty {
                break;
            }
        }

        Ok(fills)
    }
}

#[async_trait]
impl FillSource for CoinbaseHttpClient {
    fn venue(&self) -> &str {
        COINBASE_VENUE
    }

    async fn fetch_fills(
        &self,
        product_id: &str,
        page_size: u32,
        max_pages: u32,
    ) -> anyhow::Result<Vec<RawFill>> {
        Ok(self
            .request_fills(product_id, page_size, max_pages)
            .await?)
    }
}

/// Returns the `host[:port]` a request token must be bound to.
fn request_host(base_url: &str) -> Result<String, CoinbaseHttpError> {
    let url = Url::parse(base_url).map_err(|e| {
        CoinbaseHttpError::InvalidConfig(format!("invalid base URL '{base_url}': {e}"))
    })?;

    let host = url.host_str().ok_or_else(|| {
        CoinbaseHttpError::InvalidConfig(format!("base URL '{base_url}' has no host"))
    })?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://api.coinbase.com", "api.coinbase.com")]
    #[case("http://127.0.0.1:8080", "127.0.0.1:8080")]
    #[case("https://api.coinbase.com:443", "api.coinbase.com")]
    fn test_request_host(#[case] base_url: &str, #[case] expected: &str) {
        assert_eq!(request_host(base_url).unwrap(), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("unix:/var/run/socket")]
    fn test_request_host_rejects_invalid_urls(#[case] base_url: &str) {
        let result = request_host(base_url);

        assert!(matches!(result, Err(CoinbaseHttpError::InvalidConfig(_))));
    }

    #[rstest]
    fn test_new_rejects_invalid_secret() {
        let config = CoinbaseHttpConfig::new("key", "not a key");

        let result = CoinbaseHttpClient::new(&config);

        assert!(matches!(result, Err(CoinbaseHttpError::Auth(_))));
    }
}
