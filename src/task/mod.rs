//! Inspection task lifecycle.
//!
//! Tasks assign an inspector to inspect a building against a checklist.
//! This module decides which status changes are legal, who may request
//! them, and when a checklist is complete enough to submit for review. It
//! follows hexagonal architecture:
//!
//! - Domain types and the lifecycle engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
