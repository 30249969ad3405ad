/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Processes tool calls against the habit store
/// 3. Sends JSON-RPC responses to stdout

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HabitTrackerServer, ServerError};

/// Why a tool call produced no tool result
enum CallError {
    UnknownTool(String),
    InvalidArguments(serde_json::Error),
    Encode(serde_json::Error),
    Tool(ToolError),
}

impl From<ToolError> for CallError {
    fn from(e: ToolError) -> Self {
        CallError::Tool(e)
    }
}

/// MCP server that handles communication with a client
pub struct McpServer {
    /// The underlying habit tracker server
    habit_tracker: HabitTrackerServer,
    /// Whether the client has confirmed initialization
    initialized: bool,
}

impl McpServer {
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Whether the client has sent the `initialized` notification
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": tool_definitions() }))
    }

    fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        match self.call_tool(&tool_params.name, tool_params.arguments) {
            Ok(result) => JsonRpcResponse::from_serializable(id, &result),
            Err(CallError::UnknownTool(name)) => {
                JsonRpcResponse::from_serializable(id, &ToolCallResult::error(format!("Unknown tool: {}", name)))
            }
            Err(CallError::InvalidArguments(e)) => JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid arguments for '{}': {}", tool_params.name, e),
                None,
            ),
            Err(CallError::Encode(e)) => JsonRpcResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to encode result: {}", e),
                None,
            ),
            // Storage failures are server faults, not tool results
            Err(CallError::Tool(e @ ToolError::Storage(_))) => {
                error!("Tool '{}' failed: {}", tool_params.name, e);
                JsonRpcResponse::error(id, tool_error_code(&e), e.to_string(), Some(tool_error_data(&e)))
            }
            Err(CallError::Tool(e)) => {
                warn!("Tool '{}' rejected: {}", tool_params.name, e);
                JsonRpcResponse::from_serializable(id, &ToolCallResult::error(e.to_string()))
            }
        }
    }

    /// Decode arguments, run the named tool and render its response
    fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallResult, CallError> {
        let storage = self.habit_tracker.storage();

        match name {
            "habit_create" => {
                let response = tools::create_habit(storage, parse_args(arguments)?)?;
                render(response.message.clone(), &response)
            }
            "habit_list" => {
                let response = tools::list_habits(storage, parse_args(arguments)?)?;
                let message = if response.habits.is_empty() {
                    "No habits found. Create your first habit to get started!".to_string()
                } else {
                    let lines: Vec<String> = response
                        .habits
                        .iter()
                        .map(|h| {
                            format!(
                                "🎯 #{} {} [{}] | {}/{} | 📊 {:.1}% | 🔥 {} {}",
                                h.id.map(|id| id.to_string()).unwrap_or_default(),
                                h.name,
                                h.status,
                                h.completions.len(),
                                h.target_days,
                                h.completion_rate * 100.0,
                                h.streak,
                                tools::days(h.streak)
                            )
                        })
                        .collect();
                    format!("📋 {} habits\n\n{}", response.habits.len(), lines.join("\n"))
                };
                render(message, &response)
            }
            "habit_get" => {
                let record = tools::get_habit(storage, parse_args(arguments)?)?;
                render(format!("Habit #{}: {}", record.id.map(|id| id.to_string()).unwrap_or_default(), record.name), &record)
            }
            "habit_update" => {
                let response = tools::update_habit(storage, parse_args(arguments)?)?;
                render(response.message.clone(), &response)
            }
            "habit_delete" => {
                let response = tools::delete_habit(storage, parse_args(arguments)?)?;
                Ok(ToolCallResult::success(response.message))
            }
            "habit_log" => {
                let response = tools::log_habit(storage, parse_args(arguments)?)?;
                Ok(ToolCallResult::success(response.message))
            }
            "habit_unlog" => {
                let response = tools::unlog_habit(storage, parse_args(arguments)?)?;
                Ok(ToolCallResult::success(response.message))
            }
            "habit_status" => {
                let response = tools::get_habit_status(storage, parse_args(arguments)?)?;
                render(response.message().to_string(), &response)
            }
            "habit_completions" => {
                let response = tools::get_completions(storage, parse_args(arguments)?)?;
                render(response.message(), &response)
            }
            other => Err(CallError::UnknownTool(other.to_string())),
        }
    }
}

/// Tool arguments may be omitted entirely; treat that as an empty object
fn parse_args<P: DeserializeOwned>(arguments: Value) -> Result<P, CallError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(CallError::InvalidArguments)
}

fn render<R: Serialize>(message: String, response: &R) -> Result<ToolCallResult, CallError> {
    let data = serde_json::to_string_pretty(response).map_err(CallError::Encode)?;
    Ok(ToolCallResult::with_data(message, data))
}

/// Every tool this server offers
fn tool_definitions() -> Vec<ToolDefinition> {
    let habit_id = json!({"type": "integer", "description": "ID of the habit"});

    vec![
        ToolDefinition {
            name: "habit_create".to_string(),
            description: "Create a new habit to track".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Name of the habit"},
                    "description": {"type": "string", "description": "Optional description"},
                    "target_days": {"type": "integer", "description": "Number of completions that reaches the goal (default 7)"}
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "habit_list".to_string(),
            description: "List all habits with completion rates, streaks and an overall summary".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "active_only": {"type": "boolean", "description": "Show only active habits (default: false)"},
                    "status": {"type": "string", "description": "Filter by status: active, completed, archived"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_get".to_string(),
            description: "Show one habit with its full completion history".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": { "habit_id": habit_id },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_update".to_string(),
            description: "Change a habit's name, description, target or status".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": habit_id,
                    "name": {"type": "string"},
                    "description": {"type": "string"},
                    "target_days": {"type": "integer"},
                    "status": {"type": "string", "description": "active, completed or archived"}
                },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_delete".to_string(),
            description: "Delete a habit and its whole history".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": { "habit_id": habit_id },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_log".to_string(),
            description: "Log completion of a habit for today or a specific date".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": habit_id,
                    "date": {"type": "string", "description": "Date completed (YYYY-MM-DD, optional - defaults to today)"}
                },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_unlog".to_string(),
            description: "Remove a logged completion".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": habit_id,
                    "date": {"type": "string", "description": "Date to remove (YYYY-MM-DD)"}
                },
                "required": ["habit_id", "date"]
            }),
        },
        ToolDefinition {
            name: "habit_status".to_string(),
            description: "Progress statistics for one habit, or a summary of all habits".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": {"type": "integer", "description": "ID of specific habit (optional - summarizes all if omitted)"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_completions".to_string(),
            description: "Completion history of one habit, or the habits completed on one date".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": {"type": "integer", "description": "ID of the habit"},
                    "date": {"type": "string", "description": "Date (YYYY-MM-DD)"}
                },
                "required": []
            }),
        },
    ]
}
