//! Model Context Protocol (MCP) server implementation.
//!
//! This module implements the subset of MCP needed to expose the rule
//! review prompt as a tool to AI assistants. The server communicates over
//! stdio transport using newline-delimited JSON-RPC 2.0 messages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MCP Server                          │
//! │                                                             │
//! │   ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    │
//! │   │  Transport  │───▶│   Server    │───▶│   Tools     │    │
//! │   │   (stdio)   │    │ (dispatch)  │    │  (prompt)   │    │
//! │   └─────────────┘    └─────────────┘    └─────────────┘    │
//! │          │                  │                  │            │
//! │          ▼                  ▼                  ▼            │
//! │   ┌─────────────────────────────────────────────────┐      │
//! │   │              JSON-RPC Messages                  │      │
//! │   └─────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use protocol::{ErrorCode, ErrorObject, Message, RequestId, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::{StdioTransport, Transport};
