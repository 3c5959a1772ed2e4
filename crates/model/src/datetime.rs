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

//! Common data and time functions for the `Timestamp` column.
//!
//! Ledger timestamps are always rendered in UTC as `YYYY-MM-DD HH:MM:SS`. Venue timestamps arrive
//! in a handful of ISO-8601 flavours and are canonicalized into that form.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// The canonical rendering of a ledger timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive layouts accepted after the canonical one, all interpreted as UTC.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Layouts carrying an explicit UTC offset.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// The sentinel returned for empty or unrecognised timestamps (`0001-01-01 00:00:00 UTC`).
///
/// Records carrying the sentinel sort after every real record in a descending ledger.
pub static MIN_TIMESTAMP: LazyLock<DateTime<Utc>> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::MIN_UTC, |naive| naive.and_utc())
});

/// Parses `value` into a UTC datetime, returning `None` when no accepted layout matches.
///
/// Accepts the canonical `YYYY-MM-DD HH:MM:SS` form (assumed UTC), RFC 3339 with a trailing `Z`
/// or numeric offset, naive ISO-8601 datetimes with optional fractional seconds (assumed UTC)
/// and bare `YYYY-MM-DD` dates (midnight UTC).
#[must_use]
pub fn parse_timestamp_opt(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }

    let with_offset = match value.strip_suffix(['Z', 'z']) {
        Some(stripped) => format!("{stripped}+00:00"),
        None => value.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_offset) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses `value` into a UTC datetime, falling back to [`MIN_TIMESTAMP`].
#[must_use]
pub fn parse_timestamp(value: &str) -> DateTime<Utc> {
    parse_timestamp_opt(value).unwrap_or(*MIN_TIMESTAMP)
}

/// Renders `dt` in the canonical ledger form, dropping any fractional seconds.
#[must_use]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Converts any accepted timestamp layout into the canonical ledger form.
///
/// Unrecognised input renders as the sentinel `0001-01-01 00:00:00`.
#[must_use]
pub fn canonicalize_timestamp(value: &str) -> String {
    format_timestamp(parse_timestamp(value))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2024-01-01 12:00:00", "2024-01-01 12:00:00")]
    #[case("2024-01-01T12:00:00Z", "2024-01-01 12:00:00")]
    #[case("2024-01-01T12:00:00.123456Z", "2024-01-01 12:00:00")]
    #[case("2024-01-01T12:00:00.999Z", "2024-01-01 12:00:00")]
    #[case("2024-01-01T14:30:00+02:00", "2024-01-01 12:30:00")]
    #[case("2023-12-31T22:00:00-05:00", "2024-01-01 03:00:00")]
    #[case("2024-01-01T12:00:00", "2024-01-01 12:00:00")]
    #[case("2024-01-01T12:00:00.5", "2024-01-01 12:00:00")]
    #[case("2024-01-01", "2024-01-01 00:00:00")]
    #[case("  2024-01-01 12:00:00  ", "2024-01-01 12:00:00")]
    fn test_canonicalize_timestamp(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonicalize_timestamp(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("yesterday")]
    #[case("01/02/2024")]
    #[case("2024-13-01T00:00:00Z")]
    fn test_unrecognised_maps_to_sentinel(#[case] input: &str) {
        assert!(parse_timestamp_opt(input).is_none());
        assert_eq!(parse_timestamp(input), *MIN_TIMESTAMP);
        assert_eq!(canonicalize_timestamp(input), "0001-01-01 00:00:00");
    }

    #[rstest]
    fn test_sentinel_sorts_before_real_timestamps() {
        let real = parse_timestamp("1970-01-01 00:00:00");
        assert!(*MIN_TIMESTAMP < real);
    }
}
