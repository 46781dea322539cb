//! Payload encoding for the embedded report dataset.
//!
//! The dataset is serialized to JSON, zlib-compressed, and base64-encoded
//! for embedding in the HTML document. The browser side reverses this
//! with atob + pako.inflate. Session tables compress well (repeated
//! usernames and table ids), typically by 80-95%.

use bh_common::AnalysisDataset;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use tracing::{info, warn};

use crate::error::Result;

/// Uncompressed payload size above which browsers start to struggle.
const LARGE_PAYLOAD_BYTES: usize = 100_000_000;

/// An encoded payload ready for embedding, with size telemetry.
#[derive(Debug, Clone)]
pub struct EncodedPayload {
    /// Base64 of the zlib-compressed JSON.
    pub base64: String,
    /// Uncompressed JSON size in bytes.
    pub raw_bytes: usize,
    /// Compressed size in bytes, before base64 expansion.
    pub compressed_bytes: usize,
}

impl EncodedPayload {
    /// Size reduction as a percentage of the raw size.
    pub fn reduction_pct(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bytes as f64 / self.raw_bytes as f64) * 100.0
    }
}

/// Serialize, compress, and base64-encode a dataset.
pub fn encode_payload(dataset: &AnalysisDataset) -> Result<EncodedPayload> {
    let json = serde_json::to_vec(dataset)?;

    if json.len() > LARGE_PAYLOAD_BYTES {
        warn!(
            megabytes = json.len() / 1_000_000,
            "large dataset may cause browser performance issues"
        );
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    let payload = EncodedPayload {
        base64: BASE64.encode(&compressed),
        raw_bytes: json.len(),
        compressed_bytes: compressed.len(),
    };

    info!(
        raw_bytes = payload.raw_bytes,
        compressed_bytes = payload.compressed_bytes,
        reduction_pct = payload.reduction_pct(),
        "Payload compressed"
    );

    Ok(payload)
}

/// Decode a payload back into a dataset.
///
/// The inverse of [`encode_payload`]; used by tests and by consumers
/// that want to re-read an embedded payload.
pub fn decode_payload(base64: &str) -> Result<AnalysisDataset> {
    let compressed = BASE64.decode(base64)?;
    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bh_common::SessionRecord;
    use std::collections::BTreeMap;

    fn dataset() -> AnalysisDataset {
        let mut extra = BTreeMap::new();
        extra.insert("currency".to_string(), "USD".to_string());
        AnalysisDataset {
            suspicious_joins: vec![],
            bumphunter_profiles: vec![],
            target_profiles: vec![],
            original_data: vec![SessionRecord {
                table_id: "T1".to_string(),
                table_name: Some("Rio".to_string()),
                username: "alice".to_string(),
                start_session: None,
                end_session: None,
                game_type: "NLHE".to_string(),
                limit_type: "No Limit".to_string(),
                small_blind: 0.5,
                big_blind: 1.0,
                extra,
            }],
        }
    }

    #[test]
    fn test_round_trip() {
        let original = dataset();
        let encoded = encode_payload(&original).unwrap();
        let decoded = decode_payload(&encoded.base64).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_size_telemetry() {
        let encoded = encode_payload(&dataset()).unwrap();
        assert!(encoded.raw_bytes > 0);
        assert!(encoded.compressed_bytes > 0);
        assert!(encoded.reduction_pct() <= 100.0);
    }

    #[test]
    fn test_compression_shrinks_repetitive_data() {
        let mut big = dataset();
        let template = big.original_data[0].clone();
        for _ in 0..500 {
            big.original_data.push(template.clone());
        }
        let encoded = encode_payload(&big).unwrap();
        assert!(encoded.compressed_bytes < encoded.raw_bytes / 10);
    }

    #[test]
    fn test_garbage_base64_rejected() {
        assert!(decode_payload("not base64 at all!!!").is_err());
    }

    #[test]
    fn test_valid_base64_invalid_zlib_rejected() {
        let bogus = BASE64.encode(b"plainly not zlib");
        assert!(decode_payload(&bogus).is_err());
    }
}
