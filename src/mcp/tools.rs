//! Tool descriptors and tool call payloads.
//!
//! The server exposes a single tool, `review_rules`, which returns the
//! rule review prompt. Descriptors are rebuilt on every `tools/list` call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::prompt;

/// Name of the rule review tool.
pub const REVIEW_RULES: &str = "review_rules";

const REVIEW_RULES_DESCRIPTION: &str = "Provides a comprehensive rule review analysis prompt \
     template for evaluating coding rules and guidelines";

/// A JSON Schema fragment describing a tool's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    /// JSON type name, e.g. "object".
    #[serde(rename = "type")]
    pub kind: String,

    /// Per-property schemas.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, InputSchema>,

    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    /// An unconstrained object schema: any or no arguments are accepted.
    #[must_use]
    pub fn object() -> Self {
        Self {
            kind: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }
}

/// A tool definition for tools/list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: InputSchema,
}

/// Parameters for tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call. A missing name is the empty name, which
    /// matches no tool.
    #[serde(default)]
    pub name: String,
    /// Arguments for the tool. `null` is treated as omitted.
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires a predicate fn(&T) -> bool, so we must take &bool here
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Returns the list of available tools.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: REVIEW_RULES.to_string(),
        description: REVIEW_RULES_DESCRIPTION.to_string(),
        input_schema: InputSchema::object(),
    }]
}

/// Runs the named tool.
///
/// Returns `None` if no tool with that name exists. Arguments are accepted
/// for every tool but `review_rules` does not read them.
#[must_use]
pub fn call_tool(name: &str, _arguments: Option<&Map<String, Value>>) -> Option<ToolCallResult> {
    match name {
        REVIEW_RULES => Some(ToolCallResult::text(prompt::rule_review_prompt())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_definitions_valid() {
        let tools = tool_definitions();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, REVIEW_RULES);
        assert!(!tools[0].description.is_empty());
    }

    #[test]
    fn tool_definition_wire_shape() {
        let value = serde_json::to_value(&tool_definitions()[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "review_rules",
                "description": "Provides a comprehensive rule review analysis prompt template for evaluating coding rules and guidelines",
                "inputSchema": {"type": "object"}
            })
        );
    }

    #[test]
    fn nested_schema_serialises_properties_and_required() {
        let mut schema = InputSchema::object();
        schema.properties.insert(
            "path".to_string(),
            InputSchema {
                kind: "string".to_string(),
                properties: BTreeMap::new(),
                required: Vec::new(),
            },
        );
        schema.required.push("path".to_string());

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({"type": "object", "properties": {"path": {"type": "string"}}, "required": ["path"]})
        );
    }

    #[test]
    fn call_params_accept_missing_or_null_arguments() {
        let params: ToolCallParams = serde_json::from_value(json!({"name": "review_rules"})).unwrap();
        assert!(params.arguments.is_none());

        let params: ToolCallParams =
            serde_json::from_value(json!({"name": "review_rules", "arguments": null})).unwrap();
        assert!(params.arguments.is_none());
    }

    #[test]
    fn call_params_missing_name_is_empty() {
        let params: ToolCallParams = serde_json::from_value(json!({"arguments": {}})).unwrap();
        assert_eq!(params.name, "");
        assert!(call_tool(&params.name, params.arguments.as_ref()).is_none());
    }

    #[test]
    fn call_params_reject_bad_shapes() {
        assert!(serde_json::from_value::<ToolCallParams>(json!("review_rules")).is_err());
        assert!(serde_json::from_value::<ToolCallParams>(json!({"name": 5})).is_err());
        assert!(serde_json::from_value::<ToolCallParams>(
            json!({"name": "review_rules", "arguments": [1, 2]})
        )
        .is_err());
    }

    #[test]
    fn review_rules_ignores_arguments() {
        let mut args = Map::new();
        args.insert("project".to_string(), json!("acme"));

        let plain = call_tool(REVIEW_RULES, None).unwrap();
        let with_args = call_tool(REVIEW_RULES, Some(&args)).unwrap();
        assert_eq!(plain, with_args);
        assert_eq!(
            plain.content,
            vec![ToolContent::Text {
                text: prompt::rule_review_prompt().to_string()
            }]
        );
    }

    #[test]
    fn unknown_tool_returns_none() {
        assert!(call_tool("bogus", None).is_none());
    }

    #[test]
    fn tool_call_result_omits_is_error_when_false() {
        let value = serde_json::to_value(ToolCallResult::text("hi")).unwrap();
        assert_eq!(value, json!({"content": [{"type": "text", "text": "hi"}]}));
    }
}
