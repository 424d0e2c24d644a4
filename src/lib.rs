//! rule-reviewer-mcp: MCP server that serves a rule review prompt
//!
//! The server exposes one tool, `review_rules`, which returns a fixed
//! prompt instructing an AI assistant how to audit a project's coding
//! rules for conflicts, duplicates and gaps.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`mcp`] — MCP protocol implementation
//! - [`prompt`] — The rule review prompt text

pub mod config;
pub mod error;
pub mod mcp;
pub mod prompt;
