//! # Roster Testkit
//!
//! Test utilities for Roster.
//!
//! This crate provides:
//! - Record and raw-payload fixtures for the common test scenarios
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_testkit::fixtures;
//!
//! #[test]
//! fn starts_with_bo() {
//!     let store = MemoryStore::with_records(vec![fixtures::bo()]).unwrap();
//!     // ... exercise the repository
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
