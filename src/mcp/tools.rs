use std::future::Future;

use rmcp::model::{
    AnnotateAble, Implementation, ListResourcesResult, PaginatedRequestParam, RawResource,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{Error as McpError, ServerHandler, ServiceExt, tool};
use tokio_util::sync::CancellationToken;

use crate::engine::Matcher;
use crate::render::{json, markdown};

const RESOURCE_CATALOG_URI: &str = "medimatch://catalog";

#[derive(Debug, Clone)]
pub struct MediMatchServer {
    matcher: Matcher,
}

impl MediMatchServer {
    pub fn new(matcher: Matcher) -> Self {
        Self { matcher }
    }

    fn match_json(&self, symptoms: &str, duration: &str) -> Result<String, String> {
        let result = self.matcher.match_symptoms(symptoms, duration);
        tracing::debug!(
            candidates = result.candidate_count(),
            emergency = result.emergency,
            "mcp match"
        );
        json::to_pretty(&result).map_err(|e| format!("Error: {e}"))
    }

    fn describe(&self, name: &str) -> Result<String, String> {
        let record = self
            .matcher
            .catalog()
            .find(name)
            .map_err(|e| format!("Error: {e}"))?;
        markdown::disease_markdown(record).map_err(|e| format!("Error: {e}"))
    }

    fn read_resource_markdown(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        if uri != RESOURCE_CATALOG_URI {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {uri}"),
                None,
            ));
        }
        let content = markdown::catalog_markdown(self.matcher.catalog())
            .map_err(|e| McpError::internal_error(format!("Failed to render {uri}: {e}"), None))?;
        Ok(to_resource_result(uri, content))
    }
}

#[tool(tool_box)]
impl MediMatchServer {
    #[tool(
        description = "Rank catalog diseases for a free-text symptom description. \
                       `duration` is optional free text such as \"3 days\". \
                       Returns JSON with primary, secondary and other candidates, \
                       emergency flags and generic advice."
    )]
    async fn match_symptoms(
        &self,
        #[tool(param)] symptoms: String,
        #[tool(param)] duration: Option<String>,
    ) -> Result<String, String> {
        self.match_json(&symptoms, duration.as_deref().unwrap_or(""))
    }

    #[tool(description = "Show one catalog disease (case-insensitive name) as Markdown.")]
    async fn describe_disease(&self, #[tool(param)] name: String) -> Result<String, String> {
        self.describe(&name)
    }
}

#[tool(tool_box)]
impl ServerHandler for MediMatchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "medimatch".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(format!(
                "MediMatch ranks {} catalog diseases against free-text symptoms. \
                 Use `match_symptoms` for a ranked result and `describe_disease` for one \
                 record. Results are rule-based hints, not a diagnosis.",
                self.matcher.catalog().len()
            )),
            ..Default::default()
        }
    }

    fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListResourcesResult {
            next_cursor: None,
            resources: build_resource_list()
                .into_iter()
                .map(|r| r.no_annotation())
                .collect(),
        }))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        std::future::ready(self.read_resource_markdown(&request.uri))
    }
}

fn build_resource_list() -> Vec<RawResource> {
    vec![RawResource {
        uri: RESOURCE_CATALOG_URI.to_string(),
        name: "Disease Catalog".to_string(),
        description: None,
        mime_type: Some("text/markdown".to_string()),
        size: None,
    }]
}

fn to_resource_result(uri: &str, content: String) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some("text/markdown".to_string()),
            text: content,
        }],
    }
}

pub(crate) async fn run_stdio(server: MediMatchServer) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    let cancel = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let running = server
        .serve_with_ct(rmcp::transport::stdio(), shutdown)
        .await?;
    let _reason = running.waiting().await?;
    Ok(())
}

pub(crate) async fn run_http(server: MediMatchServer, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::sse_server::SseServer;

    let ip: std::net::IpAddr = host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid host address: {e}"))?;
    let bind = std::net::SocketAddr::new(ip, port);

    tracing::info!("MediMatch HTTP server listening on http://{bind}");
    tracing::info!("  SSE endpoint:  GET  http://{bind}/sse");
    tracing::info!("  Post endpoint: POST http://{bind}/message");

    let ct = SseServer::serve(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP server: {e}"))?
        .with_service(move || server.clone());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    ct.cancel();
    Ok(())
}
