//! Step definitions for inspection task lifecycle scenarios.

pub mod world;

mod then;
