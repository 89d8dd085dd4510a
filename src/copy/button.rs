use std::time::{Duration, Instant};

use super::clipboard::Clipboard;
use crate::logging::log_event;

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
pub const FAILED_LABEL: &str = "Failed to copy";

/// Where a control sits relative to its code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Appended to the block's `.code-header`.
    Header,
    /// Pinned to the top-right corner of a header-less block.
    Standalone,
}

/// Result of a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    Failed,
    /// The block has no code element; nothing was written.
    NothingToCopy,
}

#[derive(Debug, Clone)]
struct PendingRevert {
    at: Instant,
    label: String,
}

/// A "Copy" control and its transient feedback state.
///
/// Feedback is time-driven: [`click`](Self::click) schedules a revert and
/// [`tick`](Self::tick) applies it once the deadline has passed.
#[derive(Debug, Clone)]
pub struct CopyButton {
    label: String,
    copied: bool,
    placement: Placement,
    feedback: Duration,
    revert: Option<PendingRevert>,
}

impl CopyButton {
    pub fn new(placement: Placement, feedback: Duration) -> Self {
        Self {
            label: COPY_LABEL.to_string(),
            copied: false,
            placement,
            feedback,
            revert: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the control currently shows the "copied" style.
    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// When the current feedback will be reverted, if any is showing.
    pub fn revert_due(&self) -> Option<Instant> {
        self.revert.as_ref().map(|r| r.at)
    }

    /// Copy `code` to the clipboard and show feedback.
    ///
    /// The label to restore is captured before the write. A click while
    /// earlier feedback is still showing keeps the original label rather
    /// than the feedback text.
    pub fn click(
        &mut self,
        code: Option<&str>,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> CopyStatus {
        let Some(code) = code else {
            return CopyStatus::NothingToCopy;
        };

        let original = match self.revert.take() {
            Some(pending) => pending.label,
            None => self.label.clone(),
        };

        let status = match clipboard.write_text(code) {
            Ok(()) => {
                self.copied = true;
                self.label = COPIED_LABEL.to_string();
                CopyStatus::Copied
            }
            Err(err) => {
                log_event("copy", &format!("failed to copy code: {err:#}"));
                self.copied = false;
                self.label = FAILED_LABEL.to_string();
                CopyStatus::Failed
            }
        };

        self.revert = Some(PendingRevert {
            at: now + self.feedback,
            label: original,
        });
        status
    }

    /// Apply a due revert. Returns `true` if the control changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.revert {
            Some(pending) if now >= pending.at => {}
            _ => return false,
        }
        if let Some(pending) = self.revert.take() {
            self.label = pending.label;
            self.copied = false;
        }
        true
    }
}
