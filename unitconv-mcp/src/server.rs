//! Request handling for the stdio tool server
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - list_categories: List categories with their base units
//! - list_units: List the units of one category

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use unitconv_core::prelude::*;
use unitconv_units::{convert_detailed, TABLE};

use crate::config::ServerConfig;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "unitconv";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    /// `None` only when the member is absent; `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present")]
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    /// Always present; null when the request id could not be read
    pub id: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

/// Keep an explicit null id distinct from a missing one
fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

impl McpResponse {
    fn success(id: JsonValue, result: JsonValue) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    fn failure(id: JsonValue, error: McpError) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

/// Format a result with a fixed number of decimal places
pub fn format_result(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    // "-0.000000" reads as a sign error
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Handle one input line. Returns `None` when no response is due
/// (notifications and blank lines).
pub fn handle_line(config: &ServerConfig, line: &str) -> Option<McpResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let raw: JsonValue = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "error parsing request");
            return Some(McpResponse::failure(
                JsonValue::Null,
                McpError::new(PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    // Well-formed JSON that is not a request object
    let request: McpRequest = match McpRequest::deserialize(&raw) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "invalid request");
            let id = raw.get("id").cloned().unwrap_or(JsonValue::Null);
            return Some(McpResponse::failure(
                id,
                McpError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
            ));
        }
    };

    tracing::debug!(method = %request.method, "processing");
    let response = handle_request(config, &request);

    // Notifications (no id) should NOT receive a response
    if request.id.is_none() {
        tracing::debug!(method = %request.method, "notification processed (no response)");
        return None;
    }

    Some(response)
}

pub fn handle_request(config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let id = request.id.clone().unwrap_or(JsonValue::Null);
    if request.jsonrpc != "2.0" {
        return McpResponse::failure(
            id,
            McpError::new(INVALID_REQUEST, format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
        );
    }

    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(config, &request.params),

        _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
    };

    match result {
        Ok(r) => McpResponse::success(id, r),
        Err(e) => McpResponse::failure(id, e),
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion across length, mass, temperature, area, volume, speed, time, storage, energy and pressure"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_categories and list_units to discover unit names, then convert. Unit and category names accept common abbreviations (km, lb, °F, KB). Full names ignore case; abbreviations must match exactly (MB is megabyte, Mb is not a unit)."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another within a category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category name, e.g. \"Length\" or \"Temperature\""
                        },
                        "from": {
                            "type": "string",
                            "description": "Source unit, e.g. \"Meter\" or \"km\""
                        },
                        "to": {
                            "type": "string",
                            "description": "Target unit"
                        },
                        "value": {
                            "type": ["number", "string"],
                            "description": "Finite number to convert"
                        }
                    },
                    "required": ["category", "from", "to", "value"]
                }
            },
            {
                "name": "list_categories",
                "description": "List conversion categories with their base units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category with their conversion factors and abbreviations.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category name"
                        }
                    },
                    "required": ["category"]
                }
            }
        ]
    }))
}

fn handle_tool_call(config: &ServerConfig, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tool_convert(config, &args),
        "list_categories" => tool_list_categories(),
        "list_units" => tool_list_units(&args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_convert(config: &ServerConfig, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = str_arg(args, "category")?;
    let from = str_arg(args, "from")?;
    let to = str_arg(args, "to")?;
    let value = number_arg(args, "value")?;

    match convert_detailed(category, from, to, value) {
        Ok(conversion) => {
            let formatted = format_result(conversion.result, config.decimals);
            tracing::info!(
                category = %conversion.category,
                from = %conversion.from,
                to = %conversion.to,
                value = conversion.value,
                result = conversion.result,
                "conversion"
            );
            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": format!("{} {} = {} {}", conversion.value, conversion.from, formatted, conversion.to)
                }],
                "result": conversion.result,
                "formatted": formatted,
                "conversion": conversion,
                "isError": false
            }))
        }
        Err(e) => Ok(tool_error(&e)),
    }
}

fn tool_list_categories() -> Result<JsonValue, McpError> {
    let categories: Vec<JsonValue> = TABLE.iter()
        .map(|c| json!({
            "name": c.name,
            "base_unit": c.base_unit,
            "aliases": c.aliases,
            "units": c.units.len(),
        }))
        .collect();

    let text = TABLE.iter()
        .map(|c| match &c.base_unit {
            Some(base) => format!("- {} (base: {})", c.name, base),
            None => format!("- {}", c.name),
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "categories": categories
    }))
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = str_arg(args, "category")?;

    let category = match TABLE.category(name) {
        Ok(c) => c,
        Err(e) => return Ok(tool_error(&e)),
    };

    let text = format!("{}: {}", category.name, category.unit_names().join(", "));

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "category": category.name,
        "units": category.units
    }))
}

/// Conversion failures are tool results, not protocol errors
fn tool_error(err: &ConvertError) -> JsonValue {
    let report = ErrorReport::from(err);
    tracing::warn!(code = %report.code, message = %report.message, "tool error");
    json!({
        "content": [{ "type": "text", "text": report.to_string() }],
        "error": report,
        "isError": true
    })
}

fn str_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

/// Accept a JSON number or a numeric string
fn number_arg(args: &JsonValue, name: &str) -> Result<f64, McpError> {
    match args.get(name) {
        Some(JsonValue::Number(n)) => n.as_f64()
            .ok_or_else(|| McpError::invalid_params(format!("{} is out of range", name))),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>()
            .map_err(|_| McpError::invalid_params(format!("{} must be a number, got '{}'", name, s))),
        Some(other) => Err(McpError::invalid_params(format!("{} must be a number, got {}", name, other))),
        None => Err(McpError::invalid_params(format!("Missing {} argument", name))),
    }
}
