//! Configuration loading and management for the Leave Engine.
//!
//! This module loads the service configuration from a YAML file: listener
//! address, leave policy, CORS origins and store selection.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/leave-engine.yaml").unwrap();
//! println!("Listening on {}", config.config().server.bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CorsConfig, LeavePolicy, ServerConfig, ServiceConfig, StorageBackend, StorageConfig,
    DEFAULT_ANNUAL_ALLOWANCE,
};
