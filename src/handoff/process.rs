//! Viewer context backed by a spawned process.
//!
//! The configured viewer command is launched with the viewer URL as its last
//! argument. Each line the process writes to stdout is treated as a signal
//! from the viewer's origin; the course list is delivered as one JSON line on
//! its stdin. A spawn failure is the popup-blocked case: the caller surfaces
//! it to the user and clears the staged data.

use crate::errors::HandoffError;
use crate::handoff::{HandoffMessage, Viewer, ViewerSignal};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

#[derive(Debug)]
pub struct ProcessViewer {
    // Held so the viewer is reaped when the session is dropped.
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    origin: String,
}

impl ProcessViewer {
    /// Spawn the viewer command with `viewer_url` appended as an argument.
    pub fn spawn(command: &str, viewer_url: &str, origin: &str) -> Result<Self, HandoffError> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| HandoffError::ViewerBlocked("empty viewer command".to_owned()))?;

        let mut child = Command::new(program)
            .args(parts)
            .arg(viewer_url)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| HandoffError::ViewerBlocked(e.to_string()))?;

        debug!(program, viewer_url, "viewer process spawned");

        // Both pipes were requested above; take() cannot return None here.
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HandoffError::ViewerBlocked("viewer stdin unavailable".to_owned()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HandoffError::ViewerBlocked("viewer stdout unavailable".to_owned()))?;

        Ok(Self {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            origin: origin.to_owned(),
        })
    }
}

impl Viewer for ProcessViewer {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn next_signal(&mut self) -> Option<ViewerSignal> {
        let line = self.stdout.next_line().await.ok().flatten()?;
        Some(ViewerSignal {
            origin: self.origin.clone(),
            payload: line.trim().to_owned(),
        })
    }

    async fn deliver(&mut self, message: &HandoffMessage) -> anyhow::Result<()> {
        let mut json = serde_json::to_string(message)?;
        json.push('\n');
        self.stdin.write_all(json.as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }
}
