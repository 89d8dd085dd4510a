/// File-backed store of navigation section states.
///
/// State lives in a small versioned JSON document:
///
/// ```json
/// { "version": 1, "sections": { "setup": "collapsed", "labs": "open" } }
/// ```
///
/// The flat browser-storage layout (`{"nav-section-setup": "collapsed"}`)
/// is accepted on load and rewritten in the current layout on the next
/// save. Saving rewrites the whole file, so concurrent writers resolve as
/// last-write-wins.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{NavState, SectionId};
use crate::logging::log_event;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    sections: BTreeMap<SectionId, NavState>,
}

#[derive(Debug, Clone)]
pub struct NavStore {
    path: PathBuf,
    sections: BTreeMap<SectionId, NavState>,
}

impl NavStore {
    /// An empty store that will save to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sections: BTreeMap::new(),
        }
    }

    /// Load the store at `path`. A missing file is an empty store; an
    /// unreadable or malformed one is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new(path));
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read nav state {}", path.display()));
            }
        };

        let sections = parse_sections(&content)
            .with_context(|| format!("malformed nav state {}", path.display()))?;
        Ok(Self { path, sections })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &SectionId) -> Option<NavState> {
        self.sections.get(id).copied()
    }

    pub fn set(&mut self, id: SectionId, state: NavState) {
        self.sections.insert(id, state);
    }

    pub fn remove(&mut self, id: &SectionId) -> Option<NavState> {
        self.sections.remove(id)
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, NavState)> {
        self.sections.iter().map(|(id, state)| (id, *state))
    }

    /// Write the whole store to its file, creating parent directories.
    /// Failures are also recorded in the diagnostic log.
    pub fn save(&self) -> Result<()> {
        let result = self.write_file();
        if let Err(err) = &result {
            log_event("nav", &format!("failed to save nav state: {err:#}"));
        }
        result
    }

    fn write_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("failed to create nav state directory")?;
        }

        let file = StoreFile {
            version: STORE_VERSION,
            sections: self.sections.clone(),
        };
        let json = serde_json::to_string_pretty(&file).context("failed to serialize nav state")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write nav state {}", self.path.display()))
    }
}

/// Parse either the versioned layout or the flat storage-key layout.
fn parse_sections(content: &str) -> Result<BTreeMap<SectionId, NavState>> {
    let value: serde_json::Value = serde_json::from_str(content).context("invalid JSON")?;

    if value.get("version").is_some() {
        let file: StoreFile = serde_json::from_value(value)?;
        if file.version > STORE_VERSION {
            anyhow::bail!("unsupported nav state version {}", file.version);
        }
        return Ok(file
            .sections
            .into_iter()
            .filter(|(id, _)| !id.as_str().is_empty())
            .collect());
    }

    let flat: BTreeMap<String, String> =
        serde_json::from_value(value).context("expected a map of section states")?;
    Ok(flat
        .into_iter()
        .filter_map(|(key, state)| {
            let id = SectionId::from_storage_key(&key)?;
            let state = NavState::parse(&state)?;
            Some((id, state))
        })
        .collect())
}
