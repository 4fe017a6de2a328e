//! # Roster Remote
//!
//! Remote service boundary for the Roster sync core.
//!
//! This crate provides:
//! - `RawRecord`, the loosely-typed field bag the upstream service
//!   returns
//! - Normalization that tolerates both known upstream schemas and
//!   degrades instead of failing
//! - The `RemoteService` trait the sync repository calls through
//! - `MockRemoteService` with scripted responses for tests
//! - An HTTP client abstraction and a JSON adapter over it
//!
//! The upstream service is known to return inconsistent field names
//! between its read and write endpoints (one schema for fetch, another
//! for create/update), sometimes with string-typed numerics. All of
//! that inconsistency is absorbed here; the sync layer only ever sees
//! well-typed records.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod http;
mod normalize;
mod raw;
mod service;

pub use error::{RemoteError, RemoteResult};
pub use http::{HttpClient, HttpRemoteService, HttpResponse};
pub use normalize::record_from_raw;
pub use raw::RawRecord;
pub use service::{MockRemoteService, RemoteCall, RemoteService};
