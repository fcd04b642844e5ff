//! System clipboard through the platform's copy tool.

use std::io::Write;
use std::process::{Command, Stdio};

use async_trait::async_trait;
use muse_core::apply::{Clipboard, ClipboardError};

/// Copy tools tried in order, with the arguments that make them read stdin.
const COPY_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

/// Clipboard backed by the first copy tool found on `PATH`.
///
/// With no tool installed the clipboard reports itself unavailable.
pub struct SystemClipboard {
    tool: Option<(&'static str, &'static [&'static str])>,
}

impl SystemClipboard {
    pub fn detect() -> Self {
        let tool = COPY_TOOLS.iter().copied().find(|(name, _)| on_path(name));
        tracing::debug!(tool = ?tool.map(|(name, _)| name), "Clipboard tool");
        Self { tool }
    }

    pub fn tool_name(&self) -> Option<&'static str> {
        self.tool.map(|(name, _)| name)
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    fn is_available(&self) -> bool {
        self.tool.is_some()
    }

    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let (name, args) = self
            .tool
            .ok_or_else(|| ClipboardError("no clipboard tool found".to_string()))?;
        let text = text.to_string();

        tokio::task::spawn_blocking(move || pipe_to(name, args, &text))
            .await
            .map_err(|e| ClipboardError(e.to_string()))?
    }
}

fn pipe_to(name: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(name)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError(format!("{}: {}", name, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ClipboardError(format!("{}: {}", name, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| ClipboardError(format!("{}: {}", name, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError(format!("{} exited with {}", name, status)))
    }
}

fn on_path(name: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(name).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_tool_is_unavailable() {
        let mut clipboard = SystemClipboard { tool: None };
        assert!(!clipboard.is_available());
        assert!(clipboard.write_text("x").await.is_err());
    }

    #[test]
    fn test_failing_tool_reports_error() {
        let err = pipe_to("muse-no-such-copy-tool", &[], "x").unwrap_err();
        assert!(err.0.contains("muse-no-such-copy-tool"));
    }
}
