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

//! Data transfer objects for decoding Coinbase Advanced Trade HTTP responses.

use ledger_sync_model::fill::RawFill;
use serde_json::{Map, Value};

use super::error::CoinbaseHttpError;

/// A single page of the historical fills listing.
///
/// Fills are decoded leniently: entries which are not JSON objects are skipped and counted, and
/// scalar fields are carried verbatim as strings for the normalizer to validate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillsPage {
    /// Object entries of the `fills` array, in response order.
    pub fills: Vec<RawFill>,
    /// Number of `fills` entries which were not objects.
    pub skipped: usize,
    /// Cursor for the next page, `None` when absent, empty or not a string.
    pub cursor: Option<String>,
}

impl FillsPage {
    /// Decodes a fills page from a JSON payload.
    ///
    /// Returns `Ok(None)` when the payload carries no `fills` array, which ends pagination
    /// without failing the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object.
    pub fn decode(payload: &Value) -> Result<Option<Self>, CoinbaseHttpError> {
        let Value::Object(body) = payload else {
            return Err(CoinbaseHttpError::UnexpectedPayload(format!(
                "expected a JSON object, was {}",
                value_kind(payload)
            )));
        };

        let Some(Value::Array(entries)) = body.get("fills") else {
            return Ok(None);
        };

        let mut fills = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for entry in entries {
            match entry {
                Value::Object(fields) => fills.push(decode_fill(fields)),
                _ => skipped += 1,
            }
        }

        let cursor = match body.get("cursor") {
            Some(Value::String(cursor)) if !cursor.is_empty() => Some(cursor.clone()),
            _ => None,
        };

        Ok(Some(Self {
            fills,
            skipped,
            cursor,
        }))
    }

    /// Returns the number of entries in the page's `fills` array, including skipped ones.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.fills.len() + self.skipped
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_len() == 0
    }
}

fn decode_fill(fields: &Map<String, Value>) -> RawFill {
    RawFill {
        side: scalar(fields, "side"),
        product_id: scalar(fields, "product_id"),
        size: scalar(fields, "size"),
        price: scalar(fields, "price"),
        commission: scalar(fields, "commission"),
        trade_time: scalar(fields, "trade_time"),
    }
}

// Coinbase sends decimals as strings but numbers are accepted too
fn scalar(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
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
    fn test_decode_page() {
        let payload = json!({
            "fills": [
                {
                    "entry_id": "e1",
                    "trade_id": "t1",
                    "order_id": "o1",
                    "trade_time": "2024-01-01T12:00:00Z",
                    "trade_type": "FILL",
                    "price": "60000",
                    "size": "0.5",
                    "commission": "1.50",
                    "product_id": "BTC-USD",
                    "side": "BUY"
                }
            ],
            "cursor": "next-page"
        });

        let page = FillsPage::decode(&payload).unwrap().unwrap();

        assert_eq!(page.cursor.as_deref(), Some("next-page"));
        assert_eq!(page.skipped, 0);
        assert_eq!(
            page.fills,
            vec![RawFill {
                side: Some("BUY".to_string()),
                product_id: Some("BTC-USD".to_string()),
                size: Some("0.5".to_string()),
                price: Some("60000".to_string()),
                commission: Some("1.50".to_string()),
                trade_time: Some("2024-01-01T12:00:00Z".to_string()),
            }]
        );
    }

    #[rstest]
    fn test_decode_skips_non_object_entries() {
        let payload = json!({"fills": [42, "x", null, {"side": "BUY"}], "cursor": ""});

        let page = FillsPage::decode(&payload).unwrap().unwrap();

        assert_eq!(page.fills.len(), 1);
        assert_eq!(page.skipped, 3);
        assert_eq!(page.raw_len(), 4);
        assert!(!page.is_empty());
        assert_eq!(page.cursor, None);
    }

    #[rstest]
    fn test_decode_numeric_fields_as_strings() {
        let payload = json!({"fills": [{"size": 0.25, "price": 60000, "side": null}]});

        let page = FillsPage::decode(&payload).unwrap().unwrap();

        let fill = &page.fills[0];
        assert_eq!(fill.size.as_deref(), Some("0.25"));
        assert_eq!(fill.price.as_deref(), Some("60000"));
        assert_eq!(fill.side, None);
        assert_eq!(fill.commission, None);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"fills": "nope"}))]
    #[case(json!({"fills": null, "cursor": "abc"}))]
    #[case(json!({"fills": {"side": "BUY"}}))]
    fn test_decode_without_fills_array_ends_pagination(#[case] payload: Value) {
        assert_eq!(FillsPage::decode(&payload).unwrap(), None);
    }

    #[rstest]
    #[case(json!([]), "an array")]
    #[case(json!("fills"), "a string")]
    #[case(Value::Null, "null")]
    fn test_decode_non_object_payload_is_error(#[case] payload: Value, #[case] kind: &str) {
        let err = FillsPage::decode(&payload).unwrap_err();

        assert!(matches!(err, CoinbaseHttpError::UnexpectedPayload(_)));
        assert!(err.to_string().contains(kind));
    }

    #[rstest]
    #[case(json!({"fills": [], "cursor": 123}))]
    #[case(json!({"fills": []}))]
    fn test_decode_non_string_cursor_is_none(#[case] payload: Value) {
        let page = FillsPage::decode(&payload).unwrap().unwrap();

        assert!(page.is_empty());
        assert_eq!(page.cursor, None);
    }
}
