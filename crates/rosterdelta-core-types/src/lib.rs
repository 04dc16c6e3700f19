//! Core types shared across rosterdelta facilities
//!
//! This crate provides foundational types used by the error, logging and
//! delta facilities:
//!
//! - **Correlation types**: RequestId for tying log events and errors to one run
//! - **Sensitive data**: Sensitive<T> marker for employee field redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
