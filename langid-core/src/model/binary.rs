//! Compact binary model form
//!
//! Layout: [`BINARY_MAGIC`] followed by a postcard-encoded [`ModelParts`].
//! The magic carries the format version; payloads with the right prefix
//! but another version are rejected instead of being misread.

use super::ModelParts;
use crate::error::{LangIdError, MalformedModel};

/// Leading bytes shared by every version of the binary form
pub const BINARY_MAGIC_PREFIX: &[u8] = b"LangIdModel ";

/// Magic bytes of the current binary form
pub const BINARY_MAGIC: &[u8] = b"LangIdModel 1\n";

/// Serialize `parts` into the binary form.
///
/// The record is written as-is; run it through
/// [`Model::from_parts`](super::Model::from_parts) first if it did not come
/// from a loaded model.
pub fn encode_binary(parts: &ModelParts) -> crate::Result<Vec<u8>> {
    postcard::to_extend(parts, BINARY_MAGIC.to_vec()).map_err(|e| LangIdError::Encode(e.to_string()))
}

/// Decode the binary form into an unvalidated record.
pub fn decode_binary(bytes: &[u8]) -> Result<ModelParts, MalformedModel> {
    let Some(payload) = bytes.strip_prefix(BINARY_MAGIC) else {
        if bytes.starts_with(BINARY_MAGIC_PREFIX) {
            let header: String = bytes
                .iter()
                .take_while(|&&b| b != b'\n')
                .take(32)
                .map(|&b| b as char)
                .collect();
            return Err(MalformedModel::Decode(format!(
                "unsupported binary model version: {header:?}"
            )));
        }
        return Err(MalformedModel::Decode("missing binary model magic".to_string()));
    };

    let (parts, rest) = postcard::take_from_bytes::<ModelParts>(payload)
        .map_err(|e| MalformedModel::Decode(e.to_string()))?;
    if !rest.is_empty() {
        return Err(MalformedModel::Decode(format!(
            "{} trailing bytes after model payload",
            rest.len()
        )));
    }

    Ok(parts)
}
