//! Leave Engine
//!
//! This crate tracks employees and their paid-leave requests: employees are
//! registered with an annual allowance, leave requests are checked for
//! overlaps and recorded against that allowance, and approvers accept or
//! reject each request.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod store;
