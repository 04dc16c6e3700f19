//! Snapshot delta engine.
//!
//! Compares a prior and a latest employee snapshot keyed on one column and
//! produces the rows a downstream system needs to apply: keys that are new
//! in latest, and matched keys whose compared columns changed.
//!
//! ## Entry point
//!
//! ```ignore
//! use rosterdelta_core::delta::compute_delta_with_report;
//!
//! let outcome = compute_delta_with_report(&prior, &latest, &config)?;
//! let summary = rosterdelta_core::delta::render_human_summary(&outcome.report);
//! ```
//!
//! ## Guarantees
//!
//! - **Exemption**: differences in exempt columns never mark a row changed.
//! - **Null baseline**: a null prior cell never marks its column changed.
//! - **One row per key**: keys are validated unique in both inputs.
//! - **Pure**: inputs are borrowed immutably and nothing is written anywhere.

pub mod engine;
pub mod human_summary;
pub mod model;
mod plan;

pub use engine::{compute_delta, compute_delta_with_report};
pub use human_summary::render_human_summary;
pub use model::{ChangeKind, DeltaCounts, DeltaEntry, DeltaOutcome, DeltaReport, Provenance};
