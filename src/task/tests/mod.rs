//! Unit tests for the inspection task lifecycle.
