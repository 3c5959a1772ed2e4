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

//! Query parameter builders for the Coinbase REST endpoints.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Parameters for listing historical fills.
#[derive(Clone, Debug, Deserialize, Serialize, Builder)]
#[builder(setter(into, strip_option))]
pub struct GetFillsParams {
    /// Product to list fills for, e.g. `BTC-USD`.
    pub product_ids: String,
    /// Maximum number of fills per page.
    pub limit: u32,
    /// Opaque pagination cursor returned by the previous page.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn test_first_page_omits_cursor() {
        let params = GetFillsParamsBuilder::default()
            .product_ids("BTC-USD")
            .limit(100u32)
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"product_ids": "BTC-USD", "limit": 100})
        );
    }

    #[rstest]
    fn test_next_page_carries_cursor() {
        let params = GetFillsParamsBuilder::default()
            .product_ids("BTC-USD")
            .limit(50u32)
            .cursor("abc123")
            .build()
            .unwrap();

        assert_eq!(params.cursor.as_deref(), Some("abc123"));
    }

    #[rstest]
    fn test_missing_product_fails_to_build() {
        let result = GetFillsParamsBuilder::default().limit(50u32).build();

        assert!(result.is_err());
    }
}
