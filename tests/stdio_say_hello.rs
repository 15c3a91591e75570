use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

#[test]
fn say_hello_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-quotes"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {
            "name": "say_hello",
            "arguments": {
                "name": "Ada"
            }
        }
    });
    let serialized = serde_json::to_string(&request)?;
    writeln!(stdin, "{serialized}")?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;

    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    assert_eq!(response.get("id").and_then(|v| v.as_i64()), Some(3));
    let result = response.get("result").expect("result present");
    assert_eq!(
        result.get("content"),
        Some(&serde_json::json!([{"type": "text", "text": "Hello, Ada!"}]))
    );

    let _ = child.kill();
    Ok(())
}
