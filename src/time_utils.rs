// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for parsing server timestamps.

use chrono::{DateTime, NaiveDateTime};

/// Parse a server timestamp to epoch milliseconds for sort comparisons.
///
/// The API emits naive UTC datetimes without an offset, while RFC 3339
/// values appear in older rows. Missing or unparseable values compare as 0.
pub fn timestamp_millis(value: Option<&str>) -> i64 {
    let Some(raw) = value else { return 0 };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc().timestamp_millis();
    }

    0
}
