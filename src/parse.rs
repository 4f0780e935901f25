//! Defensive extraction of the hot board API response.
//!
//! The API returns a loosely-typed payload: an object whose `data` field
//! holds another object whose own `data` field carries the actual
//! `word_list` and `trending_list` arrays. Every read here is a typed
//! probe with a default, so a malformed payload degrades to an
//! unsuccessful `ParsedBoard` instead of an error.

use serde_json::Value;

use crate::types::{HotEntry, ParsedBoard};

/// Shown in place of a missing or non-string `word` field.
pub const MISSING_WORD: &str = "(untitled)";

const SUCCESS_MESSAGE: &str = "hot board parsed";
const MISSING_OUTER_DATA: &str = "unexpected response shape: missing outer data field";
const MISSING_INNER_DATA: &str = "unexpected response shape: missing inner data field";

// --- Value formatter ---

/// Format a popularity score the way Douyin displays it: `亿` for
/// hundred-millions, `万` for ten-thousands, grouped digits below that.
pub fn format_hot_value(hot_value: u64) -> String {
    if hot_value > 100_000_000 {
        format!("{:.1}亿", hot_value as f64 / 100_000_000.0)
    } else if hot_value > 10_000 {
        format!("{:.1}万", hot_value as f64 / 10_000.0)
    } else {
        group_thousands(hot_value)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// --- Response parser ---

/// Extract the ranked hot list and trending words from a raw API payload.
///
/// Total over arbitrary JSON: missing or mistyped fields fall back to
/// defaults, and only the two `data` nesting checks can mark the result
/// unsuccessful. Input order of both lists is preserved.
pub fn parse_board(raw: &Value) -> ParsedBoard {
    let mut board = ParsedBoard {
        success: false,
        message: String::new(),
        hot_list: Vec::new(),
        trending_list: Vec::new(),
        total_count: 0,
        response_time: string_field(raw, "time"),
        status: string_field(raw, "msg"),
    };

    let outer = match raw.get("data") {
        Some(value) if value.is_object() => value,
        _ => {
            board.message = MISSING_OUTER_DATA.to_string();
            return board;
        }
    };
    let inner = match outer.get("data") {
        Some(value) if value.is_object() => value,
        _ => {
            board.message = MISSING_INNER_DATA.to_string();
            return board;
        }
    };

    if let Some(word_list) = inner.get("word_list").and_then(Value::as_array) {
        for item in word_list {
            // Non-object elements are skipped, not an error.
            let entry = match item.as_object() {
                Some(entry) => entry,
                None => continue,
            };
            let hot_value = entry.get("hot_value").and_then(Value::as_u64).unwrap_or(0);
            board.hot_list.push(HotEntry {
                position: entry.get("position").and_then(Value::as_i64).unwrap_or(0),
                word: entry
                    .get("word")
                    .and_then(Value::as_str)
                    .unwrap_or(MISSING_WORD)
                    .to_string(),
                hot_value,
                hot_display: format_hot_value(hot_value),
                label: entry
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            });
        }
        board.total_count = board.hot_list.len();
    }

    if let Some(trending) = inner.get("trending_list").and_then(Value::as_array) {
        for item in trending {
            if item.is_object() {
                board.trending_list.push(
                    item.get("word")
                        .and_then(Value::as_str)
                        .unwrap_or(MISSING_WORD)
                        .to_string(),
                );
            }
        }
    }

    board.success = true;
    board.message = SUCCESS_MESSAGE.to_string();
    board
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}
