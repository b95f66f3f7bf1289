//! Stageplan End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the document pipeline:
//!
//! - Document: project + library records -> document view model
//! - Validation: budget, duplicate key and project checks
//! - **Determinism**: identical documents and fingerprints across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p stageplan-tests
//! ```

pub mod determinism;
pub mod fixtures;
