#![allow(missing_docs)]
//! IPC Server for ELIZA Simple Plugin
//!
//! This binary runs as a subprocess and handles JSON-RPC requests over stdin/stdout.
//! It lets any language runtime (TypeScript, Python, Go, etc.) use the Rust
//! responder via subprocess communication.
//!
//! ## Usage
//!
//! ```bash
//! cargo build --features ipc --bin eliza-simple-ipc
//! ./eliza-simple-ipc
//! ```
//!
//! ## Protocol
//!
//! One JSON request per line on stdin, one JSON response per line on stdout.
//! Logs go to stderr.
//!
//! ### Example Request
//! ```json
//! {"id": 1, "method": "generateResponse", "params": {"input": "Hello"}}
//! ```
//!
//! ### Example Response
//! ```json
//! {"id": 1, "result": {"response": "Hello! How can I help you today?", "rule": "greeting"}}
//! ```

use anyhow::Context;
use elizaos_plugin_eliza_simple::interop::{handle_ipc_request, IpcRequest, IpcResponse};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

fn respond_to_line(line: &str) -> IpcResponse {
    match serde_json::from_str::<IpcRequest>(line) {
        Ok(request) => {
            debug!(id = request.id, method = %request.method, "Handling request");
            handle_ipc_request(&request)
        }
        Err(e) => IpcResponse::error(0, &format!("Invalid JSON: {}", e)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("[eliza-simple-ipc] Server started, waiting for requests...");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("[eliza-simple-ipc] Error reading input: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = respond_to_line(&line);

        match serde_json::to_string(&response) {
            Ok(output) => {
                stdout
                    .write_all(format!("{}\n", output).as_bytes())
                    .await
                    .context("writing response")?;
                stdout.flush().await.context("flushing stdout")?;
            }
            Err(e) => {
                error!("[eliza-simple-ipc] Error serializing response: {}", e);
            }
        }
    }

    info!("[eliza-simple-ipc] Server shutting down");
    Ok(())
}
