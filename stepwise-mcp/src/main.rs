//! Stepwise MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdin/stdout. Logs go to stderr.
//!
//! Tools:
//! - calculate: Run one matrix or vector operation and return its steps
//! - help: Documentation for an operation, or the catalog overview
//! - list_operations: List available operations, optionally by category
//!
//! Environment:
//! - RUST_LOG: log filter (default: info)
//! - STEPWISE_DECIMALS: decimal places when a request omits `decimals` (default: 2)

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::env;
use std::io::{self, BufRead, Write};
use stepwise::{DecimalPlaces, Report, Request, Stepwise, StepwiseError, Value};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "stepwise";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places from `STEPWISE_DECIMALS`, falling back to the default on absence or garbage
fn decimals_from(raw: Option<&str>) -> DecimalPlaces {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(DecimalPlaces::new)
        .unwrap_or_default()
}

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn parse(details: impl std::fmt::Display) -> Self {
        Self { code: -32700, message: format!("Parse error: {}", details), data: None }
    }

    fn method_not_found(method: &str) -> Self {
        Self { code: -32601, message: format!("Method not found: {}", method), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into(), data: None }
    }

    fn internal(details: impl std::fmt::Display) -> Self {
        Self { code: -32603, message: format!("Internal error: {}", details), data: None }
    }
}

impl McpResponse {
    fn reply(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        match result {
            Ok(r) => Self { jsonrpc: "2.0".to_string(), id, result: Some(r), error: None },
            Err(e) => Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(e) },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let decimals = decimals_from(env::var("STEPWISE_DECIMALS").ok().as_deref());
    let stepwise = Stepwise::with_standard_library().with_precision(decimals);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Stepwise MCP server started");
    info!(operations = stepwise.registry().len(), decimals = %decimals, "Server ready, waiting for requests");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = serve(&stepwise, stdin.lock(), stdout.lock()) {
        error!(error = %e, "I/O failure, shutting down");
    }
    info!("Server shutting down");
}

/// Answer one request per input line until EOF
fn serve<R: BufRead, W: Write>(stepwise: &Stepwise, reader: R, mut writer: W) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(bytes = line.len(), "received");

        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                write_response(&mut writer, &McpResponse::reply(None, Err(McpError::parse(e))))?;
                continue;
            }
        };

        debug!(method = %request.method, "processing");
        let response = handle_request(stepwise, &request);

        // Notifications (no id) get no response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            continue;
        }
        write_response(&mut writer, &response)?;
    }
    info!("Client disconnected (EOF)");
    Ok(())
}

fn write_response<W: Write>(writer: &mut W, response: &McpResponse) -> io::Result<()> {
    let frame = serde_json::to_string(response).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", frame)?;
    writer.flush()
}

fn handle_request(stepwise: &Stepwise, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(stepwise, &request.params),

        _ => Err(McpError::method_not_found(&request.method)),
    };
    McpResponse::reply(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Answer with the client's protocol version when it sends one
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Step-by-step matrix and vector calculator"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Stepwise explains every computation. Use 'list_operations' to see what it can do and 'calculate' to run an operation; show the user the returned steps."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "calculate",
                "description": "Run one matrix or vector operation. Returns the narrated steps and the result, or the reason there is no result.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "operation": {
                            "type": "string",
                            "description": "Operation name, e.g. determinant, inverse, cramer, dot_product"
                        },
                        "a": {
                            "description": "First operand: a matrix (array of rows) or a vector (array of numbers)"
                        },
                        "b": {
                            "description": "Second operand, for two-operand operations"
                        },
                        "scalar": {
                            "type": "number",
                            "description": "Scale factor for scalar_multiply"
                        },
                        "decimals": {
                            "type": "integer",
                            "description": "Decimal places shown in the steps (0-10, default 2)",
                            "minimum": 0,
                            "maximum": 10
                        }
                    },
                    "required": ["operation"]
                }
            },
            {
                "name": "help",
                "description": "Documentation for an operation, or an overview of all operations.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Operation name. Omit for general help."
                        }
                    }
                }
            },
            {
                "name": "list_operations",
                "description": "List available operations, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter: matrix, vector",
                            "enum": ["matrix", "vector"]
                        }
                    }
                }
            }
        ]
    }))
}

fn handle_tool_call(stepwise: &Stepwise, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;
    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    debug!(tool = name, "tool call");
    match name {
        "calculate" => tool_calculate(stepwise, args),
        "help" => tool_help(stepwise, args),
        "list_operations" => tool_list_operations(stepwise, args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_calculate(stepwise: &Stepwise, args: JsonValue) -> Result<JsonValue, McpError> {
    let request: Request = match serde_json::from_value(args) {
        Ok(r) => r,
        Err(e) => return Ok(error_result(&StepwiseError::from(e))),
    };

    match stepwise.run_request(&request) {
        Ok(report) => {
            let text = stepwise.renderer(request.decimals).render(&report);
            Ok(json!({
                "content": [{ "type": "text", "text": text }],
                "structuredContent": outcome_json(&report)?,
                "isError": false
            }))
        }
        Err(e) => Ok(error_result(&e)),
    }
}

/// Serialized outcome with the result as plain JSON (number, array or grid)
fn outcome_json(report: &Report) -> Result<JsonValue, McpError> {
    let mut json = serde_json::to_value(report).map_err(McpError::internal)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("result".to_string(), report.value().map_or(JsonValue::Null, Value::to_json));
    }
    Ok(json)
}

/// Tool result for a request the engine could not run at all
fn error_result(err: &StepwiseError) -> JsonValue {
    let mut text = format!("Error [{}]: {}", err.code, err.message);
    if let Some(suggestion) = &err.suggestion {
        text.push_str(&format!("\n{}", suggestion));
    }
    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": { "error": err },
        "isError": true
    })
}

fn tool_help(stepwise: &Stepwise, args: JsonValue) -> Result<JsonValue, McpError> {
    let name = args.get("name").and_then(|v| v.as_str());
    match stepwise.help(name) {
        Ok(help) => Ok(json!({
            "content": [{ "type": "text", "text": format_help(&help) }],
            "structuredContent": help
        })),
        Err(e) => Ok(error_result(&e)),
    }
}

fn format_help(help: &JsonValue) -> String {
    let mut out = String::new();
    if let Some(name) = help.get("name").and_then(|v| v.as_str()) {
        out.push_str(&format!("# {}\n\n", name));
        if let Some(d) = help.get("description").and_then(|v| v.as_str()) {
            out.push_str(&format!("{}\n\n", d));
        }
        if let Some(u) = help.get("usage").and_then(|v| v.as_str()) {
            out.push_str(&format!("**Usage:** `{}`\n\n", u));
        }
        if let Some(examples) = help.get("examples").and_then(|v| v.as_array()) {
            for ex in examples.iter().filter_map(|e| e.as_str()) {
                out.push_str(&format!("- `{}`\n", ex));
            }
        }
    } else if let Some(categories) = help.get("operations").and_then(|v| v.as_object()) {
        for (category, names) in categories {
            let names: Vec<&str> = names.as_array()
                .map(|a| a.iter().filter_map(|n| n.as_str()).collect())
                .unwrap_or_default();
            out.push_str(&format!("**{}:** {}\n", category, names.join(", ")));
        }
        if let Some(u) = help.get("usage").and_then(|v| v.as_str()) {
            out.push_str(&format!("\n{}\n", u));
        }
    }
    out
}

fn tool_list_operations(stepwise: &Stepwise, args: JsonValue) -> Result<JsonValue, McpError> {
    let category = args.get("category").and_then(|v| v.as_str());
    let operations = stepwise.list_operations(category);
    let text = operations.as_array()
        .map(|ops| {
            ops.iter()
                .map(|op| format!(
                    "{} - {}",
                    op["name"].as_str().unwrap_or_default(),
                    op["description"].as_str().unwrap_or_default()
                ))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": { "operations": operations }
    }))
}
