//! MCP server implementation.

use super::protocol::*;
use crate::tools::{ToolInvocation, ToolRegistry};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "combined-services";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP server over a fixed tool registry.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server. The registry is frozen from here on.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("MCP server starting with {} tools", self.registry.len());
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC from `reader` until it is closed.
    ///
    /// Tool calls run as separate tasks, so their responses may be written
    /// out of request order. Everything else is answered inline.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut lines = BufReader::new(reader).lines();
        let mut in_flight = InFlight::default();

        while let Some(line) = lines.next_line().await? {
            in_flight.reap();

            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    let _ = tx.send(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
                    continue;
                }
            };

            debug!(method = %request.method, "Received request");

            if request.method == "tools/call" && request.id.is_some() {
                let registry = Arc::clone(&self.registry);
                let tx = tx.clone();
                in_flight.spawn(async move {
                    let response = handle_tools_call(&registry, request.id, request.params).await;
                    let _ = tx.send(response);
                });
                continue;
            }

            if let Some(response) = self.handle_request(request) {
                let _ = tx.send(response);
            }
        }

        in_flight.drain().await;

        drop(tx);
        writer_task.await??;

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle a non-`tools/call` message. Notifications get no response.
    fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.id.is_none() {
            debug!(method = %request.method, "Notification");
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();
        info!(
            client = %params.client_info.name,
            client_version = %params.client_info.version,
            protocol = %params.protocol_version,
            "Client initialized"
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.registry.definitions(),
        };
        JsonRpcResponse::from_result(id, &result)
    }
}

/// Handle tools/call request.
async fn handle_tools_call(
    registry: &ToolRegistry,
    id: Option<Value>,
    params: Option<Value>,
) -> JsonRpcResponse {
    let invocation: ToolInvocation = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(invocation) => invocation,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", e))
            }
        },
        None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
    };

    let result = match registry.invoke(invocation).await {
        Ok(text) => ToolCallResult::text(text),
        Err(e) => ToolCallResult::error(e.to_string()),
    };

    JsonRpcResponse::from_result(id, &result)
}

/// Tool-call tasks spawned by the read loop.
///
/// Finished tasks are reaped on every incoming line, so a long-lived session
/// only holds the calls that are still running.
#[derive(Default)]
struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Collect every task that has already finished, without waiting.
    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            log_join(joined);
        }
    }

    /// Wait for the remaining tasks.
    async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            log_join(joined);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.tasks.len()
    }
}

fn log_join(joined: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        warn!("Tool call task failed: {}", e);
    }
}

/// Single writer so concurrent responses never interleave on the wire.
async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    mut writer: W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
