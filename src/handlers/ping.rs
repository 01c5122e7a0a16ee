use axum::extract::{Query, State};
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::router::DemoState;

const SHELL: &str = "sh";

#[derive(Debug, Deserialize)]
pub struct PingQuery {
    pub host: String,
}

/// GET /api/ping?host=... -> captured stdout, one `\n` per line.
pub async fn ping_host(State(state): State<DemoState>, Query(query): Query<PingQuery>) -> String {
    // CWE-78: host appended to a command line that a shell interprets.
    let command_line = build_command_line(&state.ping_command, &query.host);
    debug!(%command_line, "running ping");

    render(run_shell(SHELL, &command_line).await)
}

/// Join the configured prefix and the host with one space. Environment
/// values lose trailing whitespace, so the separator cannot live in the prefix.
pub fn build_command_line(prefix: &str, host: &str) -> String {
    format!("{} {}", prefix.trim_end(), host)
}

fn render(result: Result<String, std::io::Error>) -> String {
    match result {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "ping failed");
            format!("Error executing ping: {e}")
        }
    }
}

async fn run_shell(shell: &str, command_line: &str) -> Result<String, std::io::Error> {
    let mut child = Command::new(shell)
        .arg("-c")
        .arg(command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut raw = Vec::new();
    let read = match child.stdout.take() {
        Some(mut stdout) => stdout.read_to_end(&mut raw).await.map(|_| ()),
        None => Err(std::io::Error::other("child stdout was not captured")),
    };
    // Reap the child before reporting a read failure. Exit status is ignored.
    child.wait().await?;
    read?;

    let mut result = String::new();
    for line in String::from_utf8_lossy(&raw).lines() {
        result.push_str(line);
        result.push('\n');
    }
    Ok(result)
}
