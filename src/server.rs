//! MCP tool surface for the hot board.
//!
//! Four tools are registered with the rmcp router. Each one always
//! returns a text result: transport and parse failures are converted to
//! `❌`-prefixed strings at this boundary instead of surfacing as
//! MCP-level errors.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::api::BoardApi;
use crate::config::ApiConfig;
use crate::parse::parse_board;
use crate::report::{render_board, render_with_analysis};
use crate::types::{BoardRequest, ParsedBoard};

/// Entries shown by `get_hot_board`.
const DEFAULT_TOP_COUNT: usize = 20;

// --- Tool arguments ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HotBoardArgs {
    /// Board type, "0" is the main hot board.
    #[serde(default = "default_board_type")]
    pub board_type: String,
    /// Board sub-type, usually empty.
    #[serde(default)]
    pub board_sub_type: String,
    /// Upstream proxy setting, usually empty.
    #[serde(default)]
    pub proxy: String,
}

fn default_board_type() -> String {
    "0".to_string()
}

impl Default for HotBoardArgs {
    fn default() -> Self {
        Self {
            board_type: default_board_type(),
            board_sub_type: String::new(),
            proxy: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalysisArgs {
    /// Number of hot entries to show.
    #[serde(default = "default_analysis_count")]
    pub top_count: usize,
}

fn default_analysis_count() -> usize {
    10
}

// --- Server ---

#[derive(Clone)]
pub struct HotBoardServer {
    api: Arc<dyn BoardApi>,
    config: ApiConfig,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl HotBoardServer {
    pub fn new(api: Arc<dyn BoardApi>, config: ApiConfig) -> Self {
        Self {
            api,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Fetch the Douyin hot board and render the top 20 entries as a text report."
    )]
    async fn get_hot_board(
        &self,
        Parameters(args): Parameters<HotBoardArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_result(
            self.hot_board_report(args, DEFAULT_TOP_COUNT).await,
        ))
    }

    #[tool(description = "Fetch the Douyin hot board with default parameters.")]
    async fn get_hot_board_simple(&self) -> Result<CallToolResult, McpError> {
        Ok(text_result(
            self.hot_board_report(HotBoardArgs::default(), DEFAULT_TOP_COUNT)
                .await,
        ))
    }

    #[tool(
        description = "Fetch the Douyin hot board and append aggregate statistics: heat range and label frequency."
    )]
    async fn get_hot_board_analysis(
        &self,
        Parameters(args): Parameters<AnalysisArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_result(self.analysis_report(args.top_count).await))
    }

    #[tool(description = "Probe the hot board API and report its availability as JSON.")]
    async fn check_api_status(&self) -> Result<CallToolResult, McpError> {
        Ok(text_result(self.api_status().await))
    }

    // --- Tool bodies, plain methods so tests can drive them directly ---

    async fn hot_board_report(&self, args: HotBoardArgs, top_count: usize) -> String {
        let request = BoardRequest {
            board_type: args.board_type,
            board_sub_type: args.board_sub_type,
            proxy: args.proxy,
        };
        info!(board_type = %request.board_type, "fetching hot board");

        match self.api.fetch_board(&request).await {
            Ok(raw) => {
                let board = parse_board(&raw);
                if board.success {
                    render_board(&board, top_count)
                } else {
                    raw_fallback(&raw, &board)
                }
            }
            Err(e) => {
                error!("hot board fetch failed: {}", e);
                e.user_message()
            }
        }
    }

    async fn analysis_report(&self, top_count: usize) -> String {
        info!(top_count, "fetching hot board for analysis");

        match self.api.fetch_board(&BoardRequest::default()).await {
            Ok(raw) => render_with_analysis(&parse_board(&raw), top_count),
            Err(e) => {
                error!("hot board analysis fetch failed: {}", e);
                e.user_message()
            }
        }
    }

    async fn api_status(&self) -> String {
        let test_time = now_string();
        match self.api.fetch_board(&BoardRequest::default()).await {
            Ok(_) => {
                let status = json!({
                    "api_status": "ok",
                    "api_url": self.config.base_url,
                    "token_configured": self.config.token_configured(),
                    "test_time": test_time,
                    "response_received": true,
                });
                format!("✅ API status check complete\n\n{}", pretty(&status))
            }
            Err(e) => {
                error!("API status probe failed: {}", e);
                let status = json!({
                    "api_status": "error",
                    "api_url": self.config.base_url,
                    "token_configured": self.config.token_configured(),
                    "test_time": test_time,
                    "error": e.to_string(),
                });
                format!("❌ API status abnormal\n\n{}", pretty(&status))
            }
        }
    }
}

/// Raw-data fallback for `get_hot_board`: the HTTP call succeeded but the
/// payload did not match the expected nesting, so the caller still gets
/// the unparsed JSON together with the parse diagnostic.
fn raw_fallback(raw: &Value, board: &ParsedBoard) -> String {
    let payload = json!({
        "status": "success",
        "message": "hot board fetched (raw format)",
        "timestamp": now_string(),
        "parse_error": board.message,
        "data": raw,
    });
    format!("✅ Hot board fetched\n\n{}", pretty(&payload))
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn now_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[tool_handler]
impl ServerHandler for HotBoardServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Douyin hot board tools: get_hot_board(board_type, board_sub_type, proxy) \
                 renders the top 20 trending topics; get_hot_board_simple() uses the \
                 defaults; get_hot_board_analysis(top_count) appends heat and label \
                 statistics; check_api_status() probes the upstream API."
                    .to_string(),
            ),
        }
    }
}
