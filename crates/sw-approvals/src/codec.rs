// codec.rs — Encode/decode one approval record to/from its persisted form.
//
// Records are stored as pretty-printed JSON so the on-disk store is easy
// to inspect manually. Decoding applies defaults for fields a record may
// legitimately lack (`comments`, `respondedAt`, `response`, `annotations`)
// and reports anything else as corruption, which callers fold into
// "not found" instead of failing the whole store.

use std::path::Path;

use crate::error::ApprovalError;
use crate::record::ApprovalRecord;

/// Serialize a record to its persisted JSON form.
pub fn encode(record: &ApprovalRecord) -> Result<String, ApprovalError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Deserialize a record from its persisted JSON form.
///
/// `path` is only used to label the error when the data is corrupt.
pub fn decode(json: &str, path: &Path) -> Result<ApprovalRecord, ApprovalError> {
    serde_json::from_str(json).map_err(|source| ApprovalError::CorruptRecord {
        path: path.to_path_buf(),
        source,
    })
}
