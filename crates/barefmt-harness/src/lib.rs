//! Conformance harness for barefmt.
//!
//! This crate provides:
//! - Fixtures: JSON descriptions of a format string, its arguments and the
//!   expected output
//! - Runner: executes fixtures against the device and buffer destinations
//! - Verification summaries, diffs and JSON suite reports
//! - Structured JSONL logging of every run
//! - A stdout-backed device for the CLI

#![forbid(unsafe_code)]

pub mod config;
pub mod device;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{ArgSpec, Destination, FixtureCase, FixtureSet};
pub use report::SuiteReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
