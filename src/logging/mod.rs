/// Best-effort diagnostic log.
///
/// Appends one line per event to `~/.agentdeck/agentdeck.log` (configurable):
///
/// ```text
/// 2026-10-18T09:12:44.120+00:00 query submission 3 started agents=crypto,stocks
/// ```
///
/// Nothing here ever fails the caller. Until [`init`] is called (the binary
/// does so at startup) events are dropped, which keeps library users and
/// tests from writing into the home directory.
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Utc;

use crate::config::{self, schema::LoggingConfig};

static SINK: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Install the process-wide log sink. Later calls are ignored.
pub fn init(cfg: &LoggingConfig) {
    let path = cfg.enabled.then(|| config::expand_home(&cfg.path));
    let _ = SINK.set(path);
}

/// Record a diagnostic event for `component`.
pub fn log_event(component: &str, message: &str) {
    let Some(Some(path)) = SINK.get() else {
        return;
    };
    append_line(path, component, message);
}

/// Path of the active log file, if logging is initialized and enabled.
pub fn log_path() -> Option<&'static Path> {
    SINK.get()?.as_deref()
}

fn append_line(path: &Path, component: &str, message: &str) {
    if let Some(parent) = path.parent() {
        if create_dir_all(parent).is_err() {
            return;
        }
    }

    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let message = message.replace(['\r', '\n'], " ");
    let _ = writeln!(file, "{} {} {}", Utc::now().to_rfc3339(), component, message);
}
