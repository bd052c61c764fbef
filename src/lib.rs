//! Inspectorate: lifecycle core for housing-inspection tasks.
//!
//! Coordinators create inspection tasks that assign an inspector to a
//! building and a checklist. Inspectors accept their tasks, record the
//! condition of each checklist element, and submit the task for review.
//! This crate owns the decisions behind that workflow; the backend that
//! stores tasks and results is reached through ports.
//!
//! # Architecture
//!
//! Inspectorate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle decisions with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle engine, result tracking, and services

pub mod task;
