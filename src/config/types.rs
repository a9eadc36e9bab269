//! Configuration types for the leave service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default so a partial file (or none at all) is valid.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

/// Annual allowance granted to newly registered employees.
pub const DEFAULT_ANNUAL_ALLOWANCE: u32 = 20;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API binds to.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Leave policy applied by the registry and ledger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeavePolicy {
    /// Allowance assigned to every new employee, in days.
    pub default_annual_allowance: u32,
    /// Joining dates before this are rejected as implausible.
    pub earliest_joining_date: NaiveDate,
    /// Reject leave that starts before the employee joined.
    pub reject_leave_before_joining: bool,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            default_annual_allowance: DEFAULT_ANNUAL_ALLOWANCE,
            earliest_joining_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN),
            reject_leave_before_joining: true,
        }
    }
}

/// Cross-origin settings for browser clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

/// Which store implementation backs the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local, lost on restart.
    #[default]
    Memory,
    /// Snapshot persisted to a JSON file.
    JsonFile,
}

/// Store selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// The backend to use.
    pub backend: StorageBackend,
    /// Data file for the `json_file` backend.
    pub path: Option<PathBuf>,
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Leave policy.
    pub policy: LeavePolicy,
    /// Cross-origin settings.
    pub cors: CorsConfig,
    /// Store selection.
    pub storage: StorageConfig,
}
