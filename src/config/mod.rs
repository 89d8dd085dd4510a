/// Configuration system for agentdeck.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::DeckConfig::default()`]
/// 2. **User global config** — `~/.agentdeck/config.toml`
/// 3. **Project local config** — `.agentdeck.toml` in the current working directory
/// 4. **Environment variables** — `AGENTDECK_*` overrides (highest precedence)
///
/// # Usage
///
/// ```rust,ignore
/// use agentdeck::config;
///
/// let cfg = config::load();
/// let transport = HttpTransport::from_config(&cfg.query);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::copy::CopyPolicy;

pub use schema::DeckConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved agentdeck configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. File layers merge key by key, so a project file only overrides the
/// keys it sets.
pub fn load() -> DeckConfig {
    let mut config = load_layers(&[global_config_path(), project_config_path()]);
    apply_env_overrides(&mut config);
    config
}

/// Merge the TOML files at `paths` over the defaults, later files winning.
fn load_layers(paths: &[Option<PathBuf>]) -> DeckConfig {
    let mut merged = toml::Table::new();
    for path in paths {
        if let Some(layer) = load_toml_file(path.as_deref()) {
            merge_tables(&mut merged, layer);
        }
    }
    toml::Value::Table(merged).try_into().unwrap_or_default()
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed or doesn't fit the schema.
fn load_toml_file(path: Option<&Path>) -> Option<toml::Table> {
    let content = fs::read_to_string(path?).ok()?;
    let table: toml::Table = toml::from_str(&content).ok()?;
    let _: DeckConfig = toml::Value::Table(table.clone()).try_into().ok()?;
    Some(table)
}

/// Recursively merge `overlay` into `base`. Nested tables merge; any other
/// value replaces the base value.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.agentdeck/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".agentdeck").join("config.toml"))
}

/// Path to the project local config: `.agentdeck.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".agentdeck.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a `~` prefix, or systems without a home directory, are
/// returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `AGENTDECK_ENDPOINT` — demo server base URL
/// - `AGENTDECK_TIMEOUT_MS` — query timeout, `0` for none
/// - `AGENTDECK_COPY_POLICY` — `broad` or `narrow`
/// - `AGENTDECK_NAV_STATE` — nav state file path
/// - `AGENTDECK_LOG` — diagnostic logging on/off
/// - `AGENTDECK_LOG_PATH` — diagnostic log file path
fn apply_env_overrides(config: &mut DeckConfig) {
    if let Ok(val) = std::env::var("AGENTDECK_ENDPOINT")
        && !val.is_empty()
    {
        config.query.endpoint = val;
    }
    if let Ok(val) = std::env::var("AGENTDECK_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.query.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("AGENTDECK_COPY_POLICY")
        && let Some(policy) = parse_copy_policy(&val)
    {
        config.copy.policy = policy;
    }
    if let Ok(val) = std::env::var("AGENTDECK_NAV_STATE")
        && !val.is_empty()
    {
        config.nav.state_path = val;
    }
    if let Ok(val) = std::env::var("AGENTDECK_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("AGENTDECK_LOG_PATH")
        && !val.is_empty()
    {
        config.logging.path = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a copy policy string.
pub fn parse_copy_policy(val: &str) -> Option<CopyPolicy> {
    match val.trim().to_ascii_lowercase().as_str() {
        "broad" | "all" => Some(CopyPolicy::Broad),
        "narrow" | "terminal" => Some(CopyPolicy::Narrow),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.agentdeck/config.toml`.
///
/// Returns an error if the file already exists and `force` is not set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.agentdeck/ directory")?;
    }

    fs::write(&path, DeckConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
