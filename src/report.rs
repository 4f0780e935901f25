//! Rendering of a parsed hot board into text reports.
//!
//! `render_board` produces the plain report; `render_with_analysis`
//! appends aggregate statistics. Both collapse to a failure notice when
//! parsing did not succeed.

use std::collections::HashMap;

use crate::parse::format_hot_value;
use crate::types::ParsedBoard;

/// How many trending words the report shows at most.
const TRENDING_SHOWN: usize = 5;
/// How many labels the analysis block lists at most.
const LABELS_SHOWN: usize = 5;

/// Failure notice for an unsuccessfully parsed board.
pub fn render_failure(board: &ParsedBoard) -> String {
    format!("❌ Failed to parse hot board data: {}", board.message)
}

/// Render the board as a multi-line report showing at most `top_count`
/// hot entries. Sections without data are omitted entirely.
pub fn render_board(board: &ParsedBoard, top_count: usize) -> String {
    if !board.success {
        return render_failure(board);
    }

    let mut lines = Vec::new();
    lines.push("🔥 Douyin Hot Board".to_string());
    lines.push("=".repeat(60));
    lines.push(format!(
        "📅 Fetched: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!("📊 Status: {}", board.status));
    lines.push(format!("⏱️ Response time: {}", board.response_time));
    lines.push(format!("📈 Entries: {}", board.total_count));
    lines.push("=".repeat(60));

    if !board.hot_list.is_empty() {
        let shown = top_count.min(board.hot_list.len());
        lines.push(format!("\n🏆 Hot Board TOP {}:", shown));
        lines.push("=".repeat(60));

        for (i, entry) in board.hot_list.iter().take(top_count).enumerate() {
            // A zero rank from the API falls back to the display index.
            let position = if entry.position != 0 {
                entry.position
            } else {
                (i + 1) as i64
            };
            lines.push(format!("{:2}. {}", position, entry.word));
            if entry.hot_value > 0 {
                lines.push(format!("    🔥 Heat: {}", entry.hot_display));
            }
            if !entry.label.is_empty() {
                lines.push(format!("    🏷️ {}", entry.label));
            }
            lines.push(String::new());
        }
    }

    if !board.trending_list.is_empty() {
        lines.push("\n📊 Trending:".to_string());
        lines.push("-".repeat(40));
        for (i, word) in board.trending_list.iter().take(TRENDING_SHOWN).enumerate() {
            lines.push(format!("{}. {}", i + 1, word));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render the board followed by an analysis block: entry counts, heat
/// range and truncated mean, and the most frequent labels.
pub fn render_with_analysis(board: &ParsedBoard, top_count: usize) -> String {
    if !board.success {
        return render_failure(board);
    }

    let display = render_board(board, top_count);

    let mut lines = Vec::new();
    lines.push("\n📊 Hot board analysis:".to_string());
    lines.push("-".repeat(40));

    if !board.hot_list.is_empty() {
        let heats: Vec<u64> = board
            .hot_list
            .iter()
            .filter(|e| e.hot_value > 0)
            .map(|e| e.hot_value)
            .collect();
        let labeled = board
            .hot_list
            .iter()
            .filter(|e| !e.label.is_empty())
            .count();

        lines.push(format!("Total entries: {}", board.hot_list.len()));
        lines.push(format!("Entries with heat: {}", heats.len()));
        lines.push(format!("Entries with labels: {}", labeled));

        if !heats.is_empty() {
            let max = heats.iter().copied().max().unwrap_or(0);
            let min = heats.iter().copied().min().unwrap_or(0);
            // Integer division truncates the mean before formatting.
            let avg = heats.iter().sum::<u64>() / heats.len() as u64;
            lines.push(format!("Max heat: {}", format_hot_value(max)));
            lines.push(format!("Min heat: {}", format_hot_value(min)));
            lines.push(format!("Avg heat: {}", format_hot_value(avg)));
        }

        if labeled > 0 {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for entry in &board.hot_list {
                if !entry.label.is_empty() {
                    *counts.entry(entry.label.as_str()).or_insert(0) += 1;
                }
            }
            let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));

            lines.push("\n🏷️ Top labels:".to_string());
            for (label, count) in ranked.into_iter().take(LABELS_SHOWN) {
                lines.push(format!("  {}: {} occurrences", label, count));
            }
        }
    }

    format!("{}\n{}", display, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{format_hot_value, parse_board};
    use crate::types::HotEntry;
    use serde_json::json;

    fn entry(word: &str, hot_value: u64, position: i64, label: &str) -> HotEntry {
        HotEntry {
            position,
            word: word.to_string(),
            hot_value,
            hot_display: format_hot_value(hot_value),
            label: label.to_string(),
        }
    }

    fn board_with(entries: Vec<HotEntry>, trending: Vec<String>) -> ParsedBoard {
        let total_count = entries.len();
        ParsedBoard {
            success: true,
            message: "hot board parsed".to_string(),
            hot_list: entries,
            trending_list: trending,
            total_count,
            response_time: "t1".to_string(),
            status: "ok".to_string(),
        }
    }

    fn failed_board(message: &str) -> ParsedBoard {
        let mut board = board_with(vec![], vec![]);
        board.success = false;
        board.message = message.to_string();
        board
    }

    #[test]
    fn test_render_failure_notice() {
        let out = render_board(&failed_board("missing outer data field"), 20);
        assert!(out.starts_with("❌"));
        assert!(out.contains("missing outer data field"));
        assert!(!out.contains("TOP"));
    }

    #[test]
    fn test_render_truncates_to_requested_count() {
        let entries = (1..=30)
            .map(|i| entry(&format!("w{}", i), i as u64 * 10, i as i64, ""))
            .collect();
        let out = render_board(&board_with(entries, vec![]), 5);
        assert!(out.contains("TOP 5:"));
        assert!(!out.contains("TOP 30"));
        assert_eq!(out.matches("🔥 Heat:").count(), 5);
        assert!(!out.contains("w6"));
        // The header count is the parsed total, not the display limit.
        assert!(out.contains("Entries: 30"));
    }

    #[test]
    fn test_render_top_header_uses_list_length_when_shorter() {
        let entries = vec![entry("a", 1, 1, ""), entry("b", 2, 2, "")];
        let out = render_board(&board_with(entries, vec![]), 20);
        assert!(out.contains("TOP 2:"));
    }

    #[test]
    fn test_render_conditional_lines_and_position_fallback() {
        let board = board_with(
            vec![entry("quiet", 0, 0, ""), entry("tagged", 50, 2, "热")],
            vec![],
        );
        let out = render_board(&board, 10);
        assert_eq!(out.matches("🔥 Heat:").count(), 1);
        assert_eq!(out.matches("🏷️").count(), 1);
        // First entry has rank 0, so the 1-indexed display position is used.
        assert!(out.contains(" 1. quiet"));
        assert!(out.contains(" 2. tagged"));
    }

    #[test]
    fn test_render_trending_capped_at_five() {
        let trending = (1..=7).map(|i| format!("t{}", i)).collect();
        let out = render_board(&board_with(vec![], trending), 10);
        assert!(out.contains("📊 Trending:"));
        assert!(out.contains("5. t5"));
        assert!(!out.contains("6. t6"));
    }

    #[test]
    fn test_render_omits_empty_sections() {
        let out = render_board(&board_with(vec![], vec![]), 10);
        assert!(!out.contains("TOP"));
        assert!(!out.contains("Trending"));
    }

    #[test]
    fn test_analysis_heat_statistics() {
        let board = board_with(
            vec![
                entry("a", 10, 1, ""),
                entry("b", 0, 2, ""),
                entry("c", 20, 3, ""),
                entry("d", 30, 4, ""),
            ],
            vec![],
        );
        let out = render_with_analysis(&board, 10);
        assert!(out.contains("Total entries: 4"));
        assert!(out.contains("Entries with heat: 3"));
        assert!(out.contains("Max heat: 30"));
        assert!(out.contains("Min heat: 10"));
        assert!(out.contains("Avg heat: 20"));
    }

    #[test]
    fn test_analysis_label_frequency() {
        let board = board_with(
            vec![
                entry("a", 1, 1, "热"),
                entry("b", 1, 2, "新"),
                entry("c", 1, 3, "热"),
                entry("d", 1, 4, ""),
            ],
            vec![],
        );
        let out = render_with_analysis(&board, 10);
        assert!(out.contains("Entries with labels: 3"));
        assert!(out.contains("🏷️ Top labels:"));
        assert!(out.contains("热: 2 occurrences"));
        assert!(out.contains("新: 1 occurrences"));
        // Most frequent label listed first.
        let hot = out.find("热: 2").unwrap();
        let new = out.find("新: 1").unwrap();
        assert!(hot < new);
    }

    #[test]
    fn test_analysis_omits_heat_and_label_sections() {
        let board = board_with(vec![entry("a", 0, 1, "")], vec![]);
        let out = render_with_analysis(&board, 10);
        assert!(out.contains("Entries with heat: 0"));
        assert!(!out.contains("Max heat"));
        assert!(!out.contains("Top labels"));
    }

    #[test]
    fn test_analysis_failure_notice_only() {
        let out = render_with_analysis(&failed_board("missing inner data field"), 10);
        assert!(out.starts_with("❌"));
        assert!(!out.contains("analysis"));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let raw = json!({
            "time": "t1",
            "msg": "ok",
            "data": {"data": {
                "word_list": [
                    {"word": "A", "hot_value": 150000000, "position": 1, "label": "热"}
                ],
                "trending_list": [{"word": "B"}],
            }},
        });
        let board = parse_board(&raw);
        let out = render_board(&board, 20);
        assert!(out.contains(" 1. A"));
        assert!(out.contains("🔥 Heat: 1.5亿"));
        assert!(out.contains("🏷️ 热"));
        assert!(out.contains("1. B"));
        assert!(out.contains("Status: ok"));
        assert!(out.contains("Response time: t1"));
    }
}
