//! JSON collection codec shared by storage backends.
//!
//! Collections are one pretty-printed JSON array, two-space indented, with a
//! trailing newline.

use super::{StorageError, StorageResult};
use crate::model::record::Record;

pub fn encode_collection<R: Record>(records: &[R]) -> StorageResult<String> {
    let mut text = serde_json::to_string_pretty(records).map_err(StorageError::Encode)?;
    text.push('\n');
    Ok(text)
}

pub fn decode_collection<R: Record>(bytes: &[u8], location: &str) -> StorageResult<Vec<R>> {
    serde_json::from_slice(bytes).map_err(|source| StorageError::Decode {
        location: location.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection};
    use crate::model::contact::Contact;

    #[test]
    fn empty_collection_encodes_as_empty_array() {
        let text = encode_collection::<Contact>(&[]).unwrap();
        assert_eq!(text, "[]\n");
    }

    #[test]
    fn encoded_collection_is_indented() {
        let text = encode_collection(&[Contact::new("Ada", "555")]).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": "));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn non_array_document_is_decode_error() {
        let err = decode_collection::<Contact>(br#"{"name":"Ada"}"#, "memory").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("`memory`"));
    }

    #[test]
    fn empty_bytes_are_decode_error() {
        let err = decode_collection::<Contact>(b"", "memory").unwrap_err();
        assert!(err.is_decode());
    }
}
