//! List configuration.
//!
//! # Responsibility
//! - Hold per-session list defaults (initial page size, pager width).
//! - Parse configuration from JSON with every field defaulted.
//!
//! # Invariants
//! - `pager_buttons()` always returns a value in `[1, MAX_PAGER_BUTTONS]`.

use crate::list::paging::{PageSize, DEFAULT_PAGER_BUTTONS};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Widest compact pager accepted from configuration.
pub const MAX_PAGER_BUTTONS: usize = 9;

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read list config: {err}"),
            Self::Parse(err) => write!(f, "invalid list config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Defaults applied to new list sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ListConfig {
    /// Initial records per page.
    pub page_size: PageSize,
    /// Requested compact pager width; read through `pager_buttons()`.
    #[serde(rename = "pagerButtons")]
    pub requested_pager_buttons: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            requested_pager_buttons: DEFAULT_PAGER_BUTTONS,
        }
    }
}

impl ListConfig {
    /// Parses JSON such as `{"pageSize": 25, "pagerButtons": 7}`.
    ///
    /// Unsupported page sizes and unknown keys are rejected.
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(value)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Effective pager width.
    pub fn pager_buttons(&self) -> usize {
        normalize_pager_buttons(self.requested_pager_buttons)
    }
}

/// Normalizes a pager width: `0` means default, large values are capped.
pub fn normalize_pager_buttons(value: usize) -> usize {
    match value {
        0 => DEFAULT_PAGER_BUTTONS,
        value if value > MAX_PAGER_BUTTONS => MAX_PAGER_BUTTONS,
        value => value,
    }
}
