use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Error,
    Warning,
    Info,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FlashError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(FlashError::Validation(format!(
                "unknown notification category: {other}"
            ))),
        }
    }
}

/// A queued user-facing message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub category: Category,
}

impl Notification {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Category::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Category::Error)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Category::Warning)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Category::Info)
    }
}

/// Read-only snapshot of the request/response metadata the policy looks at.
///
/// Header names are stored lower-cased; absent metadata is an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub is_partial_update: bool,
    pub request_headers: BTreeSet<String>,
    pub response_headers: BTreeSet<String>,
}

impl RequestContext {
    #[must_use]
    pub fn partial() -> Self {
        Self {
            is_partial_update: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn full_navigation() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_request_header(mut self, name: &str) -> Self {
        self.request_headers.insert(normalize_header_name(name));
        self
    }

    #[must_use]
    pub fn with_response_header(mut self, name: &str) -> Self {
        self.response_headers.insert(normalize_header_name(name));
        self
    }

    pub fn set_response_headers<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.response_headers = names.into_iter().map(normalize_header_name).collect();
    }

    #[must_use]
    pub fn has_response_header(&self, name: &str) -> bool {
        self.response_headers.contains(&normalize_header_name(name))
    }
}

#[must_use]
pub fn normalize_header_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively_and_rejects_unknown() {
        assert_eq!("Success".parse::<Category>().expect("parse"), Category::Success);
        assert_eq!(" WARNING ".parse::<Category>().expect("parse"), Category::Warning);
        let err = "fatal".parse::<Category>().expect_err("unknown category");
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn notification_serializes_category_lowercase() {
        let json = serde_json::to_value(Notification::success("Saved")).expect("serialize");
        assert_eq!(json, serde_json::json!({"text": "Saved", "category": "success"}));
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let ctx = RequestContext::partial().with_response_header("HX-Refresh");
        assert!(ctx.has_response_header("hx-refresh"));
        assert!(ctx.has_response_header("Hx-Refresh"));
        assert!(!ctx.has_response_header("hx-redirect"));
    }

    #[test]
    fn set_response_headers_replaces_previous_snapshot() {
        let mut ctx = RequestContext::partial().with_response_header("hx-location");
        ctx.set_response_headers(["Content-Type", "HX-Trigger"]);
        assert!(!ctx.has_response_header("hx-location"));
        assert!(ctx.has_response_header("content-type"));
        assert!(ctx.has_response_header("hx-trigger"));
    }
}
