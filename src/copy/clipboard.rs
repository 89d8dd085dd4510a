/// Clipboard backends for copy controls.
///
/// [`SystemClipboard`] pipes text into the platform's clipboard tool, the
/// same way the CLI opens the browser: one small external command per
/// platform. [`MemoryClipboard`] keeps the text in process and can be told
/// to fail, for dry runs and tests.
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Destination for copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// System clipboard
// ---------------------------------------------------------------------------

/// Clipboard commands for this platform, in preference order.
#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
];

/// The desktop clipboard, reached through `pbcopy`, `clip`, `wl-copy` or
/// `xclip`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut last_error = None;
        for (program, args) in CLIPBOARD_COMMANDS {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(err) => last_error = Some(err),
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no clipboard command available")))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("failed writing to {program}"))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("failed waiting for {program}"))?;
    if !status.success() {
        anyhow::bail!("{program} exited with {status}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory clipboard
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failure: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of write attempts, successful or not.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writes += 1;
        if let Some(reason) = &self.failure {
            anyhow::bail!("{reason}");
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
