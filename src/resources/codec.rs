//! Encoding of the `.bin` data blobs: a zstd stream wrapping JSON.

use crate::error::{DecodeErrorKind, OfflineError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;

/// Compression level used when producing data blobs.
pub const COMPRESSION_LEVEL: i32 = 3;

/// Decompress a zstd stream and deserialize the JSON inside it.
///
/// `resource` names the blob in any error.
pub fn decompress_to_object<T: DeserializeOwned>(reader: impl Read, resource: &str) -> Result<T> {
    let decoder = zstd::stream::read::Decoder::new(reader).map_err(|e| {
        OfflineError::decode(resource, DecodeErrorKind::Decompress(e.to_string()))
    })?;
    serde_json::from_reader(decoder).map_err(|e| {
        let kind = if e.is_io() {
            DecodeErrorKind::Decompress(e.to_string())
        } else {
            DecodeErrorKind::InvalidJson(e.to_string())
        };
        OfflineError::decode(resource, kind)
    })
}

/// Serialize to JSON and compress, producing a blob `decompress_to_object` reads.
pub fn compress_object<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(value)?;
    zstd::encode_all(json.as_slice(), COMPRESSION_LEVEL).map_err(|e| {
        OfflineError::decode("blob", DecodeErrorKind::Decompress(format!("zstd compress: {e}")))
    })
}

/// Deserialize plain (uncompressed) JSON from a stream.
pub fn deserialize<T: DeserializeOwned>(reader: impl Read, resource: &str) -> Result<T> {
    serde_json::from_reader(reader)
        .map_err(|e| OfflineError::decode(resource, DecodeErrorKind::InvalidJson(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_blob_decodes() {
        let blob = compress_object(&vec!["M:System.String.Trim".to_string()]).expect("compress");
        let decoded: Vec<String> = decompress_to_object(blob.as_slice(), "t.bin").expect("decode");
        assert_eq!(decoded, vec!["M:System.String.Trim"]);
    }

    #[test]
    fn test_plain_json_is_not_a_blob() {
        let err = decompress_to_object::<Vec<String>>(&b"[\"a\"]"[..], "catalog.bin").unwrap_err();
        assert!(matches!(
            err,
            OfflineError::Decode {
                source: DecodeErrorKind::Decompress(_),
                ..
            }
        ));
        assert_eq!(err.resource_name(), Some("catalog.bin"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_wrong_shape_is_invalid_json() {
        let blob = compress_object(&42_u32).expect("compress");
        let err = decompress_to_object::<Vec<String>>(blob.as_slice(), "x.bin").unwrap_err();
        assert!(matches!(
            err,
            OfflineError::Decode {
                source: DecodeErrorKind::InvalidJson(_),
                ..
            }
        ));
    }
}
