//! Decoder module for the bulk ingest pipeline.
//!
//! Turns a raw JSON request body into a `DocumentSource`.

use serde_json::Value;

use crate::errors::DecodeError;
use bulk_ingest_shared::DocumentSource;

/// Decode a JSON body into documents.
///
/// An object becomes a keyed source, an array a positional source. Any other
/// JSON value is rejected.
pub fn decode_documents(body: &[u8]) -> Result<DocumentSource, DecodeError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(docs) => Ok(DocumentSource::Keyed(docs)),
        Value::Array(docs) => Ok(DocumentSource::Positional(docs)),
        Value::Null => Err(DecodeError::UnsupportedShape("null")),
        Value::Bool(_) => Err(DecodeError::UnsupportedShape("a boolean")),
        Value::Number(_) => Err(DecodeError::UnsupportedShape("a number")),
        Value::String(_) => Err(DecodeError::UnsupportedShape("a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulk_ingest_shared::SourceKind;

    #[test]
    fn test_decode_object() {
        let source = decode_documents(br#"{"a": {"x": 1}, "b": {"x": 2}}"#).unwrap();
        assert_eq!(source.kind(), SourceKind::Keyed);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_decode_array() {
        let source = decode_documents(br#"[{"x": 1}, {"x": 2}, {"x": 3}]"#).unwrap();
        assert_eq!(source.kind(), SourceKind::Positional);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_decode_empty_collections() {
        assert!(decode_documents(b"{}").unwrap().is_empty());
        assert!(decode_documents(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_documents(br#"{"a": "#);
        assert!(matches!(result, Err(DecodeError::InvalidJson(_))));
        assert!(decode_documents(b"").is_err());
    }

    #[test]
    fn test_decode_scalar_rejected() {
        assert_eq!(
            decode_documents(b"42"),
            Err(DecodeError::UnsupportedShape("a number"))
        );
        assert_eq!(
            decode_documents(b"null").unwrap_err().to_string(),
            "request body must be a JSON object or array, got null"
        );
    }
}
