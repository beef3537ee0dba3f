use crate::{
    command::TranscriptCommand,
    error::TranscriptError,
    request::{LanguagesRequest, SearchRequest, SummaryRequest, TranscriptRequest},
    service::TranscriptService,
};
use rmcp::{
    model::{
        AnnotateAble, CallToolResult, Content, ListResourcesResult, PaginatedRequestParam,
        RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, Error as McpError, RoleServer, ServerHandler,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

pub const INFO_URI: &str = "app://info";

/// MCP server exposing the transcript tools
#[derive(Clone)]
pub struct TranscriptMcpServer {
    service: TranscriptService,
}

impl TranscriptMcpServer {
    pub fn new(service: TranscriptService) -> Self {
        Self { service }
    }

    /// Capability metadata served as the `app://info` resource
    pub fn server_info() -> serde_json::Value {
        json!({
            "name": "youtube-transcript-server",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Fetch, search and summarize YouTube video transcripts",
            "tools": TranscriptCommand::command_names(),
            "features": [
                "video IDs and youtube.com / youtu.be URLs",
                "manual and auto-generated subtitle tracks",
                "time range filtering",
                "literal text search with context",
                "transcript statistics and excerpts"
            ],
            "transports": ["stdio", "sse"]
        })
    }

    fn info_resource() -> Resource {
        RawResource::new(INFO_URI, "server-info".to_string()).no_annotation()
    }
}

/// Pretty JSON text content on success, a structured tool error otherwise
fn tool_result<T: Serialize>(tool: &str, result: crate::Result<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value)
                .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {}", e), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(error) => {
            warn!("{} failed: {}", tool, error);
            Ok(CallToolResult::error(vec![Content::text(error_body(&error).to_string())]))
        }
    }
}

pub fn error_body(error: &TranscriptError) -> serde_json::Value {
    json!({
        "error": error.kind(),
        "message": error.to_string(),
    })
}

#[tool(tool_box)]
impl TranscriptMcpServer {
    #[tool(description = "Get the transcript for a YouTube video, optionally filtered to a time range")]
    async fn get_transcript(
        &self,
        #[tool(aggr)] request: TranscriptRequest,
    ) -> Result<CallToolResult, McpError> {
        info!("get_transcript {}", request.video_id);
        tool_result("get_transcript", self.service.get_transcript(&request).await)
    }

    #[tool(description = "Search for text within a YouTube video transcript, returning matches with surrounding context")]
    async fn search_transcript(
        &self,
        #[tool(aggr)] request: SearchRequest,
    ) -> Result<CallToolResult, McpError> {
        info!("search_transcript {} for {:?}", request.video_id, request.query);
        tool_result("search_transcript", self.service.search_transcript(&request).await)
    }

    #[tool(description = "List the transcript languages available for a YouTube video")]
    async fn get_available_languages(
        &self,
        #[tool(aggr)] request: LanguagesRequest,
    ) -> Result<CallToolResult, McpError> {
        info!("get_available_languages {}", request.video_id);
        tool_result(
            "get_available_languages",
            self.service.get_available_languages(&request).await,
        )
    }

    #[tool(description = "Summarize a YouTube video transcript with statistics, top words and sample excerpts")]
    async fn get_transcript_summary(
        &self,
        #[tool(aggr)] request: SummaryRequest,
    ) -> Result<CallToolResult, McpError> {
        info!("get_transcript_summary {}", request.video_id);
        tool_result(
            "get_transcript_summary",
            self.service.get_transcript_summary(&request).await,
        )
    }
}

#[tool(tool_box)]
impl ServerHandler for TranscriptMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("YouTube Transcript Server - fetch, search and summarize video transcripts. Accepts 11-character video IDs or YouTube URLs; see app://info for capabilities.".into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![Self::info_resource()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        if uri != INFO_URI {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            ));
        }

        let text = serde_json::to_string_pretty(&Self::server_info())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}
