//! Stdio JSON-RPC Server
//!
//! A lightweight, synchronous JSON-RPC 2.0 request boundary for the guide.
//! No async runtime required - uses blocking stdin/stdout.
//!
//! # Protocol
//! - JSON-RPC 2.0 over stdio (line-delimited JSON)
//! - `initialize` handshake, `initialized` notification, `shutdown`
//! - Methods: analyze, classify, resolve_phone, list_phones
//!
//! # Usage
//! ```bash
//! astro --server
//! echo '{"jsonrpc":"2.0","id":1,"method":"analyze","params":{"phone_name":"Pixel 8 Pro","target":"Moon"}}' | astro --server
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::{AnalyzeRequest, GuideEngine, GuideError};

// ============================================================================
// JSON-RPC 2.0 Types
// ============================================================================

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

// JSON-RPC error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
struct TargetParams {
    target: String,
}

#[derive(Debug, Deserialize)]
struct PhoneParams {
    phone_name: String,
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: Option<Value>) -> Result<T, String> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| format!("Invalid params: {}", e))
}

// ============================================================================
// Guide Server
// ============================================================================

/// Stateless request router. The handshake methods are acknowledged but
/// not required, so one-shot piped requests work.
pub struct GuideServer {
    engine: Arc<GuideEngine>,
}

impl GuideServer {
    pub fn new(engine: Arc<GuideEngine>) -> Self {
        Self { engine }
    }

    /// Serve stdin/stdout until EOF (blocking)
    pub fn run(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve any line-oriented stream pair until EOF
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        info!("Server listening on stdio");
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            // Notifications produce no response
            if let Some(response) = self.handle_line(&line) {
                let response_str = serde_json::to_string(&response).unwrap_or_else(|e| {
                    json!({
                        "jsonrpc": "2.0",
                        "id": null,
                        "error": {"code": INTERNAL_ERROR, "message": format!("Serialization error: {}", e)}
                    })
                    .to_string()
                });
                writeln!(output, "{}", response_str)?;
                output.flush()?;
            }
        }

        info!("Server shutting down");
        Ok(())
    }

    /// Handle one JSON-RPC line. Returns None for notifications (no id).
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "Invalid JSON-RPC version".to_string(),
            ));
        }

        let is_notification = request.id.is_none();
        let id = request.id.clone().unwrap_or(Value::Null);
        debug!(method = %request.method, "Request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => return None,
            "shutdown" => JsonRpcResponse::success(id, json!({})),
            "analyze" => self.handle_analyze(id, request.params),
            "classify" => self.handle_classify(id, request.params),
            "resolve_phone" => self.handle_resolve_phone(id, request.params),
            "list_phones" => self.handle_list_phones(id),
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", request.method),
            ),
        };

        if is_notification {
            None
        } else {
            Some(response)
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "serverInfo": {
                    "name": "astro-guide",
                    "version": crate::version()
                },
                "methods": ["analyze", "classify", "resolve_phone", "list_phones", "shutdown"],
                "backend": self.engine.explainer_name().unwrap_or("none")
            }),
        )
    }

    fn handle_analyze(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let request: AnalyzeRequest = match parse_params(params) {
            Ok(r) => r,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
        };

        match self.engine.analyze(&request) {
            Ok(response) => match serde_json::to_value(&response) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            Err(e @ GuideError::InvalidRequest { .. }) => {
                JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())
            }
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    fn handle_classify(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        match parse_params::<TargetParams>(params) {
            Ok(p) => {
                let category = self.engine.classifier().classify(&p.target);
                JsonRpcResponse::success(id, json!({ "target": p.target, "category": category }))
            }
            Err(message) => JsonRpcResponse::error(id, INVALID_PARAMS, message),
        }
    }

    fn handle_resolve_phone(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let p: PhoneParams = match parse_params(params) {
            Ok(p) => p,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
        };

        let result = match self.engine.catalog().resolve_with_kind(p.phone_name.trim()) {
            Some((phone, kind)) => json!({
                "query": p.phone_name,
                "found": true,
                "match": kind.to_string(),
                "phone": phone
            }),
            None => json!({ "query": p.phone_name, "found": false }),
        };
        JsonRpcResponse::success(id, result)
    }

    fn handle_list_phones(&self, id: Value) -> JsonRpcResponse {
        let phones: Vec<&str> = self.engine.catalog().names().collect();
        JsonRpcResponse::success(id, json!({ "phones": phones }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PhoneCatalog;

    fn server() -> GuideServer {
        GuideServer::new(Arc::new(GuideEngine::new(Arc::new(PhoneCatalog::bundled()))))
    }

    fn call(server: &GuideServer, line: &str) -> Value {
        let response = server.handle_line(line).expect("expected a response");
        serde_json::to_value(&response).unwrap()
    }

    #[test]
    fn test_initialize() {
        let server = server();
        let response = call(&server, r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#);
        assert_eq!(response["result"]["serverInfo"]["name"], "astro-guide");
        assert_eq!(response["result"]["backend"], "none");
    }

    #[test]
    fn test_handshake_is_optional() {
        let server = server();
        let classify = r#"{"jsonrpc":"2.0","id":1,"method":"classify","params":{"target":"Moon"}}"#;

        assert_eq!(call(&server, classify)["result"]["category"], "planet");

        let shutdown = call(&server, r#"{"jsonrpc":"2.0","id":2,"method":"shutdown"}"#);
        assert_eq!(shutdown["result"], json!({}));
        assert_eq!(call(&server, classify)["result"]["category"], "planet");
    }

    #[test]
    fn test_notification_has_no_response() {
        let server = server();
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"initialized"}"#)
            .is_none());
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"list_phones"}"#)
            .is_none());
    }

    #[test]
    fn test_parse_error() {
        let response = call(&server(), "{not json");
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[test]
    fn test_wrong_version() {
        let response = call(&server(), r#"{"jsonrpc":"1.0","id":7,"method":"list_phones"}"#);
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], 7);
    }

    #[test]
    fn test_unknown_method() {
        let response = call(&server(), r#"{"jsonrpc":"2.0","id":2,"method":"nope"}"#);
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn test_analyze() {
        let response = call(
            &server(),
            r#"{"jsonrpc":"2.0","id":3,"method":"analyze","params":{"phone_name":"s24 ultra","target":"Moon"}}"#,
        );
        let result = &response["result"];
        assert_eq!(result["resolved_phone"], "Galaxy S24 Ultra");
        assert_eq!(result["lens"], "telephoto");
        assert_eq!(result["category"], "planet");
        assert_eq!(result["settings"]["tripod"], true);
        assert_eq!(result["explanation"]["steps"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_analyze_invalid_params() {
        let server = server();
        let missing = call(&server, r#"{"jsonrpc":"2.0","id":4,"method":"analyze","params":{"target":"Moon"}}"#);
        assert_eq!(missing["error"]["code"], INVALID_PARAMS);

        let empty = call(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"analyze","params":{"phone_name":"","target":"Moon"}}"#,
        );
        assert_eq!(empty["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_classify() {
        let response = call(
            &server(),
            r#"{"jsonrpc":"2.0","id":6,"method":"classify","params":{"target":" Meteor Shower "}}"#,
        );
        assert_eq!(response["result"]["category"], "fast_object");
    }

    #[test]
    fn test_resolve_phone() {
        let server = server();
        let found = call(
            &server,
            r#"{"jsonrpc":"2.0","id":8,"method":"resolve_phone","params":{"phone_name":"Glaxy S24"}}"#,
        );
        assert_eq!(found["result"]["found"], true);
        assert_eq!(found["result"]["phone"]["name"], "Galaxy S24");

        let missing = call(
            &server,
            r#"{"jsonrpc":"2.0","id":9,"method":"resolve_phone","params":{"phone_name":"Zzzzzzzzzzzz"}}"#,
        );
        assert_eq!(missing["result"]["found"], false);
    }

    #[test]
    fn test_serve_stream() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"list_phones"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["id"], 2);
        assert!(lines[1]["result"]["phones"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "Pixel 8 Pro"));
    }
}
