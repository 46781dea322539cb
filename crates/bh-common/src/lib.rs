//! Bumphunter common types, wire contracts, and errors.
//!
//! This crate provides foundational types shared across the bh crates:
//! - The normalized session table record and its passthrough attributes
//! - Analysis outputs: suspicious joins and hunter/target profiles
//! - Common error types with stable codes
//! - Output format specification

pub mod analysis;
pub mod error;
pub mod output;
pub mod schema;
pub mod session;

pub use analysis::{
    AnalysisDataset, HunterCount, HunterProfile, SuspiciousJoin, TargetCount, TargetProfile,
};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
pub use session::SessionRecord;
