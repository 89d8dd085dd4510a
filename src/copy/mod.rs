//! Code copy helper for documentation pages.
//!
//! A [`CodeDocument`] is the list of code blocks on a page. The attachment
//! pass adds a [`CopyButton`] to the blocks selected by the configured
//! [`CopyPolicy`]; clicking a button copies the block's code through a
//! [`Clipboard`] and shows transient feedback on the button.

pub mod button;
pub mod clipboard;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::schema::CopyConfig;

pub use button::{CopyButton, CopyStatus, Placement};
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};

/// Which code blocks receive a copy control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyPolicy {
    /// Every block with a header, plus header-less blocks that contain code.
    #[default]
    Broad,
    /// Only blocks whose header mentions "Terminal".
    Narrow,
}

impl std::fmt::Display for CopyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Broad => write!(f, "broad"),
            Self::Narrow => write!(f, "narrow"),
        }
    }
}

impl CopyPolicy {
    /// Placement of a new control on `block`, or `None` if the block is
    /// out of scope for this policy.
    fn placement_for(self, block: &CodeBlock) -> Option<Placement> {
        match (self, block.header.as_deref()) {
            (Self::Broad, Some(_)) => Some(Placement::Header),
            (Self::Broad, None) if block.code.is_some() => Some(Placement::Standalone),
            (Self::Narrow, Some(header))
                if header.contains("Terminal") || header.contains("terminal") =>
            {
                Some(Placement::Header)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

/// A `.code-block`, its optional `.code-header`, and its `code` element.
#[derive(Debug, Clone, Default)]
pub struct CodeBlock {
    /// Header text, when the block is preceded by a `.code-header`.
    pub header: Option<String>,
    /// Text content of the block's `code` element.
    pub code: Option<String>,
    pub copy_button: Option<CopyButton>,
}

impl CodeBlock {
    pub fn with_header(header: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            code: Some(code.into()),
            copy_button: None,
        }
    }

    pub fn standalone(code: impl Into<String>) -> Self {
        Self {
            header: None,
            code: Some(code.into()),
            copy_button: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeDocument {
    pub blocks: Vec<CodeBlock>,
}

impl CodeDocument {
    pub fn new(blocks: Vec<CodeBlock>) -> Self {
        Self { blocks }
    }

    /// Number of blocks that carry a copy control.
    pub fn button_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.copy_button.is_some())
            .count()
    }

    /// Click the copy control of block `index`.
    pub fn click(
        &mut self,
        index: usize,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Result<CopyStatus> {
        let block = self
            .blocks
            .get_mut(index)
            .with_context(|| format!("no code block at index {index}"))?;
        let button = block
            .copy_button
            .as_mut()
            .with_context(|| format!("code block {index} has no copy control"))?;
        Ok(button.click(block.code.as_deref(), clipboard, now))
    }

    /// Apply due feedback reverts on every control. Returns how many changed.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.blocks
            .iter_mut()
            .filter_map(|b| b.copy_button.as_mut())
            .map(|button| button.tick(now))
            .filter(|changed| *changed)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

/// Attaches copy controls under one policy.
#[derive(Debug, Clone, Copy)]
pub struct CopyHelper {
    policy: CopyPolicy,
    feedback: Duration,
}

impl Default for CopyHelper {
    fn default() -> Self {
        Self::from_config(&CopyConfig::default())
    }
}

impl CopyHelper {
    pub fn new(policy: CopyPolicy, feedback: Duration) -> Self {
        Self { policy, feedback }
    }

    pub fn from_config(config: &CopyConfig) -> Self {
        Self::new(config.policy, Duration::from_millis(config.feedback_ms))
    }

    pub fn policy(&self) -> CopyPolicy {
        self.policy
    }

    /// A fresh control with this helper's feedback duration.
    pub fn button(&self, placement: Placement) -> CopyButton {
        CopyButton::new(placement, self.feedback)
    }

    /// Add a control to every in-scope block that doesn't have one yet.
    /// Returns the number of controls added; a second pass adds none.
    pub fn attach(&self, document: &mut CodeDocument) -> usize {
        let mut added = 0;
        for block in &mut document.blocks {
            if block.copy_button.is_some() {
                continue;
            }
            if let Some(placement) = self.policy.placement_for(block) {
                block.copy_button = Some(self.button(placement));
                added += 1;
            }
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CodeDocument {
        CodeDocument::new(vec![
            CodeBlock::with_header("Terminal Command", "pip install agent-framework"),
            CodeBlock::with_header("Python", "print('hi')"),
            CodeBlock::with_header("terminal", "az login"),
            CodeBlock::standalone("export KEY=value"),
            CodeBlock::default(),
        ])
    }

    #[test]
    fn broad_covers_headers_and_standalone_code() {
        let mut doc = sample();
        assert_eq!(CopyHelper::default().attach(&mut doc), 4);
        let placements: Vec<Option<Placement>> = doc
            .blocks
            .iter()
            .map(|b| b.copy_button.as_ref().map(CopyButton::placement))
            .collect();
        assert_eq!(
            placements,
            [
                Some(Placement::Header),
                Some(Placement::Header),
                Some(Placement::Header),
                Some(Placement::Standalone),
                None,
            ]
        );
    }

    #[test]
    fn narrow_covers_only_terminal_headers() {
        let mut doc = sample();
        let helper = CopyHelper::new(CopyPolicy::Narrow, Duration::from_secs(2));
        assert_eq!(helper.attach(&mut doc), 2);
        assert!(doc.blocks[0].copy_button.is_some());
        assert!(doc.blocks[1].copy_button.is_none());
        assert!(doc.blocks[2].copy_button.is_some());
        assert!(doc.blocks[3].copy_button.is_none());
    }

    #[test]
    fn attach_is_idempotent() {
        let mut doc = sample();
        let helper = CopyHelper::default();
        helper.attach(&mut doc);
        assert_eq!(helper.attach(&mut doc), 0);
        assert_eq!(doc.button_count(), 4);
    }

    #[test]
    fn click_copies_block_code() {
        let mut doc = sample();
        CopyHelper::default().attach(&mut doc);
        let mut clipboard = MemoryClipboard::new();
        let now = Instant::now();

        let status = doc.click(3, &mut clipboard, now).unwrap();
        assert_eq!(status, CopyStatus::Copied);
        assert_eq!(clipboard.contents(), Some("export KEY=value"));

        assert_eq!(doc.tick(now + Duration::from_secs(2)), 1);
        assert_eq!(doc.blocks[3].copy_button.as_ref().unwrap().label(), "Copy");
    }

    #[test]
    fn tick_reverts_only_due_controls() {
        let mut doc = sample();
        CopyHelper::default().attach(&mut doc);
        let mut clipboard = MemoryClipboard::new();
        let start = Instant::now();

        doc.click(0, &mut clipboard, start).unwrap();
        doc.click(1, &mut clipboard, start + Duration::from_secs(1)).unwrap();

        assert_eq!(doc.tick(start + Duration::from_millis(2500)), 1);
        assert_eq!(doc.blocks[0].copy_button.as_ref().unwrap().label(), "Copy");
        assert_eq!(doc.blocks[1].copy_button.as_ref().unwrap().label(), "Copied!");

        assert_eq!(doc.tick(start + Duration::from_secs(3)), 1);
        assert_eq!(doc.tick(start + Duration::from_secs(4)), 0);
    }

    #[test]
    fn click_without_control_is_an_error() {
        let mut doc = sample();
        let mut clipboard = MemoryClipboard::new();
        assert!(doc.click(0, &mut clipboard, Instant::now()).is_err());
        assert!(doc.click(99, &mut clipboard, Instant::now()).is_err());
    }
}
