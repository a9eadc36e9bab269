//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{LeavePolicy, ServiceConfig, StorageBackend};

/// Loads and provides access to the service configuration.
///
/// # File Format
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:8000"
/// policy:
///   default_annual_allowance: 20
///   earliest_joining_date: 2000-01-01
///   reject_leave_before_joining: true
/// cors:
///   allowed_origins: ["http://localhost:5173"]
/// storage:
///   backend: json_file        # or: memory
///   path: ./data/leave.json
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/leave-engine.yaml").unwrap();
/// println!("Allowance: {}", loader.policy().default_annual_allowance);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - The storage section names a file backend without a path
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<ServiceConfig>(path)?;
        Self::validate(&config, path)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &ServiceConfig, path: &Path) -> EngineResult<()> {
        if config.storage.backend == StorageBackend::JsonFile && config.storage.path.is_none() {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "storage.path is required for the json_file backend".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the leave policy section.
    pub fn policy(&self) -> &LeavePolicy {
        &self.config.policy
    }
}
