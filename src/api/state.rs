//! Application state for the Leave Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::LeavePolicy;
use crate::ledger::LeaveLedger;
use crate::registry::EmployeeRegistry;
use crate::store::{InMemoryStore, LeaveStore};

/// Shared application state.
///
/// Holds the registry and ledger, both built over the one store instance
/// created at startup.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<EmployeeRegistry>,
    ledger: Arc<LeaveLedger>,
}

impl AppState {
    /// Wires a registry and ledger over `store`.
    pub fn new(store: Arc<dyn LeaveStore>, policy: LeavePolicy) -> Self {
        let registry = Arc::new(EmployeeRegistry::new(Arc::clone(&store), policy.clone()));
        let ledger = Arc::new(LeaveLedger::new(store, Arc::clone(&registry), policy));
        Self { registry, ledger }
    }

    /// Creates a state backed by a fresh in-memory store.
    pub fn in_memory(policy: LeavePolicy) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), policy)
    }

    /// Returns the employee registry.
    pub fn registry(&self) -> &EmployeeRegistry {
        &self.registry
    }

    /// Returns the leave ledger.
    pub fn ledger(&self) -> &LeaveLedger {
        &self.ledger
    }
}
