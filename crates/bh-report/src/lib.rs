//! HTML report generator for bumphunter analysis runs.
//!
//! Generates self-contained HTML reports from an [`bh_common::AnalysisDataset`].
//!
//! # Design
//!
//! - **Single-file output**: one HTML document, no sidecar assets
//! - **Compressed payload**: the dataset is embedded as zlib-compressed
//!   base64 and inflated in the browser with pako
//! - **CDN pinning**: the pako library is loaded from a pinned version
//!   with an SRI hash
//! - **No server**: reports open from `file://`
//!
//! # Example
//!
//! ```no_run
//! use bh_report::{ReportConfig, ReportGenerator};
//! # let dataset = bh_common::AnalysisDataset {
//! #     suspicious_joins: vec![], bumphunter_profiles: vec![],
//! #     target_profiles: vec![], original_data: vec![],
//! # };
//!
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let html = generator.generate(&dataset).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod payload;

pub use config::{CdnLibrary, ReportConfig, ReportTheme};
pub use error::{ReportError, Result};
pub use generator::ReportGenerator;
pub use payload::{decode_payload, encode_payload, EncodedPayload};
