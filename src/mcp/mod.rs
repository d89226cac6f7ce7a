//! MCP server entrypoints for stdio and HTTP transports.

mod tools;

use crate::engine::Matcher;

pub use tools::MediMatchServer;

/// Runs the MediMatch MCP server over stdio.
///
/// # Errors
///
/// Returns an error when stdio transport setup or MCP server startup fails.
pub async fn run_stdio(matcher: Matcher) -> anyhow::Result<()> {
    tools::run_stdio(MediMatchServer::new(matcher)).await
}

/// Runs the MediMatch MCP server over HTTP with SSE transport.
///
/// Starts an HTTP server on `host:port` with:
/// - `GET /sse` for the server-to-client event stream
/// - `POST /message?sessionId=<id>` for client-to-server JSON-RPC messages
///
/// # Errors
///
/// Returns an error when TCP bind or server startup fails.
pub async fn run_http(matcher: Matcher, host: &str, port: u16) -> anyhow::Result<()> {
    tools::run_http(MediMatchServer::new(matcher), host, port).await
}
