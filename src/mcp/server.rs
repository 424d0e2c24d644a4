//! MCP server implementation for the rule reviewer.
//!
//! The server is stateless: each line is read, parsed, dispatched and
//! answered before the next one is read. Three methods are handled:
//!
//! 1. `initialize`: returns protocol version, capabilities and server info
//! 2. `tools/list`: returns the `review_rules` descriptor
//! 3. `tools/call`: runs `review_rules`
//!
//! # Dropped messages
//!
//! Lines that fail to parse and messages with any other method are
//! logged and dropped without a response. Only `tools/call` reports
//! problems back to the client, as JSON-RPC error objects.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::error::{DispatchError, TransportError};
use crate::mcp::protocol::{
    parse_message, ErrorCode, ErrorObject, Message, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::tools::{self, ToolCallParams};
use crate::mcp::transport::{StdioTransport, Transport};

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapabilities>,
    /// Prompt-related capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptCapabilities>,
    /// Resource-related capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceCapabilities>,
    /// Server-side logging capability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingCapability>,
}

impl ServerCapabilities {
    /// Capabilities of this server: a fixed tool list and nothing else.
    #[must_use]
    pub fn tools_only() -> Self {
        Self {
            tools: Some(ToolCapabilities::default()),
            ..Self::default()
        }
    }
}

/// Tool-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change during the session.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Prompt-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptCapabilities {
    /// Whether the prompt list can change during the session.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Resource-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCapabilities {
    /// Whether clients may subscribe to resource updates.
    pub subscribe: bool,
    /// Whether the resource list can change during the session.
    pub list_changed: bool,
}

/// Marker for the logging capability; serialises as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoggingCapability {}

/// Server information for initialisation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Client information received during initialisation.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Parameters for the initialize request.
///
/// Only read for diagnostics; the response never depends on them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by client.
    #[serde(default)]
    pub protocol_version: Option<String>,
    /// Client capabilities.
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// Result of the initialize request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version spoken by the server.
    pub protocol_version: String,
    /// Capabilities offered by the server.
    pub capabilities: ServerCapabilities,
    /// Server identity.
    pub server_info: ServerInfo,
}

/// The MCP server for rule review prompts.
#[derive(Debug, Clone, Default)]
pub struct McpServer {
    /// Identity reported by `initialize`.
    server_info: ServerInfo,
}

impl McpServer {
    /// Creates a new MCP server.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the server over stdin/stdout until EOF or a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if signal handlers cannot be installed or if
    /// transport I/O fails.
    pub async fn run(&self) -> std::io::Result<()> {
        let shutdown = shutdown_signal()?;
        let mut transport = StdioTransport::stdio();
        self.serve(&mut transport, shutdown).await
    }

    /// Runs the read/dispatch/write loop over `transport`.
    ///
    /// `shutdown` is polled between messages only: a message that has been
    /// read is always answered before shutdown is observed. Returns `Ok`
    /// at end of input or when `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns the first read or write error. Such errors are terminal.
    pub async fn serve<R, W, F>(
        &self,
        transport: &mut Transport<R, W>,
        shutdown: F,
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let line = tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("Shutdown requested, stopping server loop");
                    return Ok(());
                }

                line = transport.read_line() => line?,
            };

            let Some(line) = line else {
                debug!("End of input");
                return Ok(());
            };

            self.handle_line(transport, &line).await?;
        }
    }

    /// Handles a single line of input, writing at most one response.
    async fn handle_line<R, W>(
        &self,
        transport: &mut Transport<R, W>,
        line: &[u8],
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if line.is_empty() {
            return Ok(());
        }

        let message = match parse_message(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Error parsing message");
                return Ok(());
            }
        };

        let response = match self.handle_message(&message) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Error handling message");
                return Ok(());
            }
        };

        match transport.write_message(&response).await {
            Ok(()) => Ok(()),
            Err(TransportError::Encode(e)) => {
                error!(error = %e, "Error encoding response");
                Ok(())
            }
            Err(TransportError::Io(e)) => Err(e),
        }
    }

    /// Routes a parsed message to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMethod`] for any method other than
    /// `initialize`, `tools/list` or `tools/call`, and
    /// [`DispatchError::Encode`] if a result cannot be encoded. Failures in
    /// `tools/call` are returned as JSON-RPC error responses instead.
    pub fn handle_message(&self, msg: &Message) -> Result<Message, DispatchError> {
        debug!(method = %msg.method, id = ?msg.id, "Handling message");

        match msg.method.as_str() {
            "initialize" => self.handle_initialize(msg),
            "tools/list" => Self::handle_tools_list(msg),
            "tools/call" => Ok(Self::handle_tools_call(msg)),
            _ => Err(DispatchError::UnknownMethod {
                method: msg.method.clone(),
            }),
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&self, msg: &Message) -> Result<Message, DispatchError> {
        if let Some(params) = &msg.params {
            match InitializeParams::deserialize(params) {
                Ok(InitializeParams {
                    protocol_version,
                    client_info,
                    ..
                }) => debug!(
                    requested_version = ?protocol_version,
                    client = ?client_info.as_ref().map(|c| &c.name),
                    client_version = ?client_info.as_ref().and_then(|c| c.version.as_ref()),
                    "Client initialising"
                ),
                Err(e) => debug!(error = %e, "Ignoring unreadable initialize params"),
            }
        }

        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities::tools_only(),
            server_info: self.server_info.clone(),
        };

        let value = serde_json::to_value(&result).map_err(|source| DispatchError::Encode {
            what: "initialize",
            source,
        })?;

        Ok(Message::success(msg.id.clone(), value))
    }

    /// Handles the tools/list request.
    fn handle_tools_list(msg: &Message) -> Result<Message, DispatchError> {
        let value = serde_json::to_value(ToolsListResult {
            tools: tools::tool_definitions(),
        })
        .map_err(|source| DispatchError::Encode {
            what: "tools/list",
            source,
        })?;

        Ok(Message::success(msg.id.clone(), value))
    }

    /// Handles the tools/call request.
    fn handle_tools_call(msg: &Message) -> Message {
        let params = msg.params.as_ref().unwrap_or(&Value::Null);
        let params = match ToolCallParams::deserialize(params) {
            Ok(params) => params,
            Err(e) => {
                return Message::error_response(
                    msg.id.clone(),
                    ErrorObject::from_code(ErrorCode::InvalidParams).with_data(e.to_string()),
                );
            }
        };

        let Some(result) = tools::call_tool(&params.name, params.arguments.as_ref()) else {
            return Message::error_response(
                msg.id.clone(),
                ErrorObject::from_code(ErrorCode::MethodNotFound)
                    .with_data(format!("Unknown tool: {}", params.name)),
            );
        };

        match serde_json::to_value(&result) {
            Ok(value) => Message::success(msg.id.clone(), value),
            Err(e) => {
                error!(error = %e, tool = %params.name, "Failed to serialise tool call result");
                Message::error_response(
                    msg.id.clone(),
                    ErrorObject::from_code(ErrorCode::InternalError).with_data(e.to_string()),
                )
            }
        }
    }
}

/// Result of the tools/list request.
#[derive(Debug, Serialize)]
struct ToolsListResult {
    tools: Vec<tools::ToolDefinition>,
}

/// Resolves when the process is asked to terminate.
#[cfg(unix)]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown"),
            _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
        }
    })
}

/// Resolves when the process is asked to terminate.
#[cfg(windows)]
#[allow(clippy::unnecessary_wraps)] // matches the unix signature
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    Ok(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                warn!(error = %e, "Ctrl+C handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    })
}
