//! Invited-list decoding for chat creation.
//!
//! Clients send the invitees either as a JSON-encoded string (`"[2, 3]"`) or
//! as a native JSON array. Decoding checks only the outer shape; entries are
//! checked one at a time by [`InvitedEntry::user_id`] so that callers can
//! interleave their own per-entry checks in list order.

use serde_json::Value;

/// Reasons an invited list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvitationError {
    #[error("`invited` parameter should not be missing")]
    Missing,

    #[error("`invited` parameter is a json-like list of integers")]
    Malformed,

    #[error("`invited` parameter is a list of integers")]
    NotAList,

    #[error("An entry of the invited list should be an integer")]
    NotAnInteger,
}

/// One undecoded entry of the invited list.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitedEntry(Value);

impl InvitedEntry {
    /// The invited user id, if the entry is an integer.
    pub fn user_id(&self) -> Result<i64, InvitationError> {
        self.0.as_i64().ok_or(InvitationError::NotAnInteger)
    }
}

/// Decode the raw `invited` value into its entries.
pub fn decode_invited(raw: Option<&Value>) -> Result<Vec<InvitedEntry>, InvitationError> {
    let decoded = match raw {
        None | Some(Value::Null) => return Err(InvitationError::Missing),
        Some(Value::String(encoded)) => {
            serde_json::from_str::<Value>(encoded).map_err(|_| InvitationError::Malformed)?
        }
        Some(other) => other.clone(),
    };

    match decoded {
        Value::Array(entries) => Ok(entries.into_iter().map(InvitedEntry).collect()),
        _ => Err(InvitationError::NotAList),
    }
}
