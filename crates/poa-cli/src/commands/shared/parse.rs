use std::io::BufRead;

use anyhow::Context;
use serde_json::Value;

/// Parse a `--json` argument: inline JSON, or `@path` to read it from a file.
/// The body must be a JSON object.
pub fn parse_body(raw: &str) -> anyhow::Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read JSON body from {path}"))?,
        None => raw.to_string(),
    };
    let value: Value = serde_json::from_str(&text).context("invalid JSON body")?;
    if !value.is_object() {
        anyhow::bail!("JSON body must be an object");
    }
    Ok(value)
}

/// Resolve `--password` / `--password-stdin`.
pub fn read_password(password: Option<&str>, from_stdin: bool) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password.to_string());
    }
    if !from_stdin {
        anyhow::bail!("provide --password or --password-stdin");
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
