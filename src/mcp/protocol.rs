//! JSON-RPC 2.0 message types for MCP protocol.
//!
//! A single [`Message`] envelope is used in both directions. Incoming
//! requests populate `method`/`params`; outgoing responses populate
//! `result` or `error`. Fields that are absent or empty are omitted on
//! the wire.
//!
//! # Identifiers
//!
//! Request IDs are opaque JSON values. A missing or `null` ID is carried
//! as `None` and the response omits the field, so the caller always gets
//! back exactly what it sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The MCP protocol version this implementation supports.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// The JSON-RPC version tag carried by every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Server name for capability negotiation.
pub const SERVER_NAME: &str = "rule-reviewer-mcp";

/// A JSON-RPC 2.0 request ID.
///
/// Clients send strings or numbers, but any JSON value is accepted and
/// echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub Value);

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self(n.into())
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}

/// A JSON-RPC 2.0 message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Protocol tag. Always "2.0" on responses; not enforced on input.
    #[serde(default)]
    pub jsonrpc: String,

    /// Correlation ID, echoed unchanged on the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    /// The method to invoke (requests only).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,

    /// Method parameters, decoded lazily by the handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Success payload (responses only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error payload (responses only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl Message {
    /// Creates a success response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value is not const-compatible
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            ..Self::default()
        }
    }

    /// Creates an error response. `result` is always absent.
    #[must_use]
    pub fn error_response(id: Option<RequestId>, error: ErrorObject) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Standard JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON was received by the server.
    ParseError,
    /// The JSON sent is not a valid Request object.
    InvalidRequest,
    /// The method (or tool) does not exist or is not available.
    MethodNotFound,
    /// Invalid method parameters.
    InvalidParams,
    /// Internal JSON-RPC error.
    InternalError,
}

impl ErrorCode {
    /// Returns the numeric code for this error.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }

    /// Returns the default message for this error code.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// The error code.
    pub code: i32,

    /// A short description of the error.
    pub message: String,

    /// Additional information about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    /// Creates a new error from an error code, using its default message.
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            message: code.default_message().to_string(),
            data: None,
        }
    }

    /// Adds additional data to the error.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Parses one line of input into a message.
///
/// # Errors
///
/// Returns the decode error if the bytes are not a single JSON object of
/// the [`Message`] shape (including invalid UTF-8).
pub fn parse_message(line: &[u8]) -> Result<Message, serde_json::Error> {
    serde_json::from_slice(line)
}
