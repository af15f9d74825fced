use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, FlashError>;

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("fragment render failed: {0}")]
    Render(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
}

impl FlashError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Render(_) => "RENDER_FAILED",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Config(_) => "INVALID_CONFIG",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_code_message_and_fresh_trace_id() {
        let err = FlashError::Render("template missing".to_string());
        let first = err.to_payload("flash.render");
        let second = err.to_payload("flash.render");

        assert_eq!(first.code, "RENDER_FAILED");
        assert_eq!(first.message, "fragment render failed: template missing");
        assert_eq!(first.operation, "flash.render");
        assert_ne!(first.trace_id, second.trace_id);
        assert!(Uuid::parse_str(&first.trace_id).is_ok());
    }

    #[test]
    fn payload_serializes_flat_fields() {
        let payload = FlashError::Validation("empty text".to_string()).to_payload("flash.push");
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert_eq!(json["operation"], "flash.push");
        assert_eq!(json.as_object().map(|fields| fields.len()), Some(4));
    }
}
