//! rosterdelta Core - snapshot delta kernel
//!
//! This crate provides the in-memory pieces of rosterdelta:
//! - Table model (header plus positional records, nullable text cells)
//! - Delta configuration (key, exempt columns, projection and join policy)
//! - The delta engine and its classification report
//! - Canonical error and logging facilities
//!
//! It performs no I/O; reading and writing snapshots lives in `rosterdelta-io`.

pub mod config;
pub mod delta;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use config::{DeltaConfig, DomainFilter, JoinMode, OutputPolicy};
pub use delta::{compute_delta, compute_delta_with_report, DeltaOutcome, DeltaReport};
pub use errors::{DeltaError, ExError, ExErrorKind, Result};
pub use model::{Record, Table, TableRole};
