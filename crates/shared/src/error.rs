use thiserror::Error;

/// Failure to turn an `{ "type", "payload" }` record into a typed action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("action record must be a JSON object")]
    NotAnObject,
    #[error("action record has no string `type` field")]
    MissingType,
    #[error("{kind} requires a payload")]
    MissingPayload { kind: String },
    #[error("invalid payload for {kind}: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("field `{field}` is not valid base64: {source}")]
    InvalidBase64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },
}

impl ActionError {
    pub fn missing_payload(kind: impl Into<String>) -> Self {
        Self::MissingPayload { kind: kind.into() }
    }

    pub fn invalid_payload(kind: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidPayload {
            kind: kind.into(),
            source,
        }
    }
}
