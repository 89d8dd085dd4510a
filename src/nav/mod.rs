//! Collapsible navigation sections with persisted state.
//!
//! Each [`NavSection`] is a header plus its content sibling. Clicking a
//! header toggles both; sections that declare a [`SectionId`] record the new
//! state in a [`NavStore`] and get it back on the next page load.

pub mod store;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use store::NavStore;

const STORAGE_PREFIX: &str = "nav-section-";

/// The `data-section` identifier of a navigation header.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of a declared `data-section`. An empty attribute declares
    /// nothing.
    pub fn declared(id: &str) -> Option<Self> {
        let id = id.trim();
        (!id.is_empty()).then(|| Self::new(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Browser-storage key for this section (`nav-section-<id>`).
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_PREFIX}{}", self.0)
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(STORAGE_PREFIX).and_then(Self::declared)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted state of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavState {
    Open,
    Collapsed,
}

impl NavState {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "collapsed" => Some(Self::Collapsed),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Collapsed,
            Self::Collapsed => Self::Open,
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Collapsed => write!(f, "collapsed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// A `.nav-section-header` and the content element that follows it.
#[derive(Debug, Clone, Default)]
pub struct NavSection {
    pub id: Option<SectionId>,
    pub header_collapsed: bool,
    pub content_collapsed: bool,
}

impl NavSection {
    /// An expanded section, persisted under `id` unless `id` is empty.
    pub fn new(id: &str) -> Self {
        Self {
            id: SectionId::declared(id),
            ..Self::default()
        }
    }

    /// An expanded section with no `data-section`; never persisted.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The id state is persisted under, if any.
    fn persisted_id(&self) -> Option<&SectionId> {
        self.id.as_ref().filter(|id| !id.as_str().is_empty())
    }

    pub fn is_collapsed(&self) -> bool {
        self.content_collapsed
    }

    fn collapse(&mut self) {
        self.header_collapsed = true;
        self.content_collapsed = true;
    }
}

/// The navigation menu of one page.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    pub sections: Vec<NavSection>,
}

impl NavMenu {
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    /// Page-load pass: collapse every identified section stored as
    /// collapsed. Returns how many sections were collapsed.
    pub fn restore(&mut self, store: &NavStore) -> usize {
        let mut collapsed = 0;
        for section in &mut self.sections {
            let Some(id) = section.persisted_id() else {
                continue;
            };
            if store.get(id) == Some(NavState::Collapsed) {
                section.collapse();
                collapsed += 1;
            }
        }
        collapsed
    }

    /// Header click: toggle header and content, and record the new state
    /// when the section has an id. Returns the section's new state.
    ///
    /// The new state is derived from the content element, as the page does,
    /// so a header and content that disagree both flip.
    pub fn toggle(&mut self, index: usize, store: &mut NavStore) -> Result<NavState> {
        let section = self
            .sections
            .get_mut(index)
            .with_context(|| format!("no navigation section at index {index}"))?;

        let was_collapsed = section.content_collapsed;
        section.header_collapsed = !section.header_collapsed;
        section.content_collapsed = !section.content_collapsed;

        let state = if was_collapsed {
            NavState::Open
        } else {
            NavState::Collapsed
        };
        if let Some(id) = section.persisted_id() {
            store.set(id.clone(), state);
        }
        Ok(state)
    }

    /// Index of the section with `id`.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.id.as_ref() == Some(id))
    }
}
