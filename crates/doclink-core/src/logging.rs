//! Logging init and the event categories used across resolution.
//!
//! Events carry a `category` field so a log file can be grepped per stage
//! (`category=decode`, `category=probe`, ...). Without a subscriber those
//! events are dropped and resolution behaves the same.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Variable checked before `RUST_LOG` for filter directives.
pub const LOG_ENV_VAR: &str = "DOCLINK_LOG";

const DEFAULT_FILTER: &str = "info,doclink=debug";

/// Stage of link resolution an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Decode,
    Clean,
    Token,
    Render,
    Probe,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Decode => "decode",
            Category::Clean => "clean",
            Category::Token => "token",
            Category::Render => "render",
            Category::Probe => "probe",
        }
    }
}

/// Where log output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stderr,
}

/// `~/.local/state/doclink/doclink.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("doclink")?;
    Ok(xdg_dirs.get_state_home().join("doclink").join("doclink.log"))
}

/// Filter directives: `DOCLINK_LOG`, then `RUST_LOG`, then the default.
fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    [LOG_ENV_VAR, "RUST_LOG"]
        .iter()
        .filter_map(|name| lookup(name))
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(|name| std::env::var(name).ok());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a subscriber appending to [`log_file_path`].
/// Errors when the state dir is unwritable or a subscriber is already set;
/// callers fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<LogDestination> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("doclink logging initialized at {}", path.display());
    Ok(LogDestination::File(path))
}

/// Stderr-only logging for when the log file cannot be used.
pub fn init_logging_stderr() -> LogDestination {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
    LogDestination::Stderr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doclink_log_wins_over_rust_log() {
        let got = filter_directives(|name| match name {
            "DOCLINK_LOG" => Some("doclink=trace".into()),
            "RUST_LOG" => Some("warn".into()),
            _ => None,
        });
        assert_eq!(got, "doclink=trace");
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let got = filter_directives(|name| match name {
            "DOCLINK_LOG" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(got, DEFAULT_FILTER);
        assert_eq!(filter_directives(|_| Some("warn".into())), "warn");
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn categories_are_lowercase_stage_names() {
        let all = [
            Category::Decode,
            Category::Clean,
            Category::Token,
            Category::Render,
            Category::Probe,
        ];
        let names: Vec<&str> = all.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["decode", "clean", "token", "render", "probe"]);
    }

    #[test]
    fn log_file_lives_under_doclink_dir() {
        if let Ok(path) = log_file_path() {
            assert!(path.ends_with("doclink/doclink.log"));
        }
    }
}
