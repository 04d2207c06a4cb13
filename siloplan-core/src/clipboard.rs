// Clipboard capability injected by the hosting surface

use crate::model::LinkPlanEntry;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard helper available on this system")]
    Unavailable,

    #[error("clipboard helper '{helper}' failed: {reason}")]
    HelperFailed { helper: String, reason: String },
}

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied)
    }
}

/// Copy text and report the outcome. Failures are logged, never raised.
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, text: &str) -> CopyOutcome {
    match clipboard.copy(text) {
        Ok(()) => {
            debug!("Copied {} bytes to clipboard", text.len());
            CopyOutcome::Copied
        }
        Err(e) => {
            warn!("Failed to copy text: {}", e);
            CopyOutcome::Failed
        }
    }
}

/// Block copied by "copy all links" for a single plan entry
pub fn entry_copy_block(entry: &LinkPlanEntry) -> String {
    let mut text = format!("From: {}\n\n", entry.source_url);
    for link in &entry.target_links {
        text.push_str(&format!("Link to: {}\n", link.url));
        text.push_str(&format!("Anchor Text: {}\n\n", link.anchor_text));
    }
    text
}

/// Helper program and its arguments
pub type ClipboardHelper = (&'static str, &'static [&'static str]);

const MACOS_HELPERS: &[ClipboardHelper] = &[("pbcopy", &[])];
const WINDOWS_HELPERS: &[ClipboardHelper] = &[("clip", &[])];
const UNIX_HELPERS: &[ClipboardHelper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Pipes text into the first installed platform clipboard helper
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    helpers: &'static [ClipboardHelper],
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        let helpers = if cfg!(target_os = "macos") {
            MACOS_HELPERS
        } else if cfg!(target_os = "windows") {
            WINDOWS_HELPERS
        } else {
            UNIX_HELPERS
        };
        Self::with_helpers(helpers)
    }

    pub fn with_helpers(helpers: &'static [ClipboardHelper]) -> Self {
        Self { helpers }
    }

    fn run_helper(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // Reap the helper even when the write failed
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        for (program, args) in self.helpers {
            match Self::run_helper(program, args, text) {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    return Err(ClipboardError::HelperFailed {
                        helper: program.to_string(),
                        reason: "non-zero exit status".to_string(),
                    });
                }
                // Helper not installed, try the next one
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(ClipboardError::HelperFailed {
                        helper: program.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        Err(ClipboardError::Unavailable)
    }
}

/// In-memory clipboard, used when the system clipboard is disabled
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Vec<String>,
    pub refuse: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write
    pub fn refusing() -> Self {
        Self {
            contents: Vec::new(),
            refuse: true,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.contents.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.refuse {
            return Err(ClipboardError::Unavailable);
        }
        self.contents.push(text.to_string());
        Ok(())
    }
}
