//! Schema versioning for serialized payloads.

/// Version of the analysis payload schema.
///
/// Bumped whenever the wire shape of [`crate::AnalysisDataset`] changes
/// in a way report consumers can observe.
pub const SCHEMA_VERSION: &str = "1.0.0";
