//! Page token codec
//!
//! Wire format: standard base64 over the JSON object `{"key": string, "offset": integer}`.
//! The token is opaque to callers and is neither signed nor encrypted.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use vane_common::{Result, StorageError};

#[derive(Debug, Serialize, Deserialize)]
struct PageToken {
    key: String,
    offset: i64,
}

/// Encode the key of the next entity and its offset into an opaque token.
pub fn encode(key: &str, offset: u64) -> Result<String> {
    let offset = i64::try_from(offset)
        .map_err(|_| StorageError::invalid_field("offset", "exceeds the supported range"))?;
    let token = PageToken {
        key: key.to_string(),
        offset,
    };
    let json =
        serde_json::to_vec(&token).map_err(|e| StorageError::internal("encode page token", e))?;
    Ok(STANDARD.encode(json))
}

/// Decode a token produced by [`encode`].
///
/// Fails with `InvalidPageToken` carrying the raw token when it is not base64,
/// not the expected JSON object, has an empty key, or a negative offset.
pub fn decode(token: &str) -> Result<(String, u64)> {
    let invalid = || StorageError::InvalidPageToken(token.to_string());

    let bytes = STANDARD.decode(token).map_err(|_| invalid())?;
    let decoded: PageToken = serde_json::from_slice(&bytes).map_err(|_| invalid())?;

    if decoded.key.is_empty() {
        return Err(invalid());
    }
    let offset = u64::try_from(decoded.offset).map_err(|_| invalid())?;

    Ok((decoded.key, offset))
}
