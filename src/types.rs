//! Core data types used throughout douyin-hot-mcp.
//!
//! `BoardRequest` is the JSON body of the outbound API call; `HotEntry`
//! and `ParsedBoard` are the extracted view of the response.

use serde::Serialize;

// --- Outbound request ---

/// Request body for the hot board endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BoardRequest {
    /// Board type, "0" is the main hot board.
    pub board_type: String,
    /// Board sub-type, usually empty.
    pub board_sub_type: String,
    /// Upstream proxy setting, usually empty.
    pub proxy: String,
}

impl Default for BoardRequest {
    fn default() -> Self {
        Self {
            board_type: "0".to_string(),
            board_sub_type: String::new(),
            proxy: String::new(),
        }
    }
}

// --- Parsed response ---

/// One ranked entry of the hot board.
#[derive(Debug, Clone, PartialEq)]
pub struct HotEntry {
    /// Rank reported by the API, 0 when absent
    pub position: i64,
    /// Display text of the trending topic
    pub word: String,
    /// Popularity score, 0 when absent
    pub hot_value: u64,
    /// `hot_value` rendered through the value formatter
    pub hot_display: String,
    /// Short classification tag, empty when absent
    pub label: String,
}

/// The hot board response after tolerant extraction.
///
/// `success` is true only when both `data` nesting levels were present
/// as objects; otherwise `message` carries the diagnostic and the lists
/// stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBoard {
    pub success: bool,
    pub message: String,
    pub hot_list: Vec<HotEntry>,
    pub trending_list: Vec<String>,
    /// Number of entries extracted into `hot_list`.
    pub total_count: usize,
    /// Top-level `time` field, "unknown" when absent.
    pub response_time: String,
    /// Top-level `msg` field, "unknown" when absent.
    pub status: String,
}
