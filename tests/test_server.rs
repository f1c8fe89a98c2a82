//! Stdio JSON-RPC server tests
//!
//! Drives `astro --server` over piped stdin and checks each response line.

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn run_session(input: &str) -> Vec<Value> {
    let home = TempDir::new().unwrap();
    let output = Command::cargo_bin("astro")
        .unwrap()
        .env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .args(["--server", "--offline"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_session_round_trip() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        r#"{"jsonrpc":"2.0","method":"initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"analyze","params":{"phone_name":"Pixel 8 Pro","target":"Andromeda"}}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"shutdown"}"#,
    ]
    .join("\n");

    let responses = run_session(&input);
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "astro-guide");
    assert_eq!(responses[0]["result"]["backend"], "offline");

    let analysis = &responses[1]["result"];
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(analysis["category"], "deep_sky");
    assert_eq!(analysis["lens"], "ultrawide");
    assert_eq!(analysis["settings"]["tripod"], true);

    assert_eq!(responses[2]["id"], 3);
}

#[test]
fn test_errors_do_not_stop_the_server() {
    let input = [
        "this is not json",
        r#"{"jsonrpc":"2.0","id":1,"method":"analyze","params":{"target":"moon"}}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"classify","params":{"target":"Comet"}}"#,
    ]
    .join("\n");

    let responses = run_session(&input);
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["error"]["code"], -32602);
    assert_eq!(responses[2]["result"]["category"], "fast_object");
}
