use axum::http::StatusCode;

use super::actions::TestResponse;

// ============================================================================
// Response Assertions
// ============================================================================

pub struct ResponseAssertion<'a> {
    response: &'a TestResponse,
}

impl<'a> ResponseAssertion<'a> {
    pub fn of(response: &'a TestResponse) -> Self {
        Self { response }
    }

    pub fn has_status(self, status: StatusCode) -> Self {
        assert_eq!(
            self.response.status, status,
            "unexpected status, body: {}",
            self.response.body
        );
        self
    }

    pub fn succeeded(self) -> Self {
        self.has_status(StatusCode::OK).has_field("success", true)
    }

    pub fn failed_with(self, status: StatusCode, detail: &str) -> Self {
        self.has_status(status)
            .has_field("success", false)
            .has_field("detail", detail)
    }

    pub fn has_field<V>(self, field: &str, expected: V) -> Self
    where
        serde_json::Value: PartialEq<V>,
        V: std::fmt::Debug,
    {
        assert!(
            self.response.body[field] == expected,
            "field {field:?}: expected {expected:?}, body: {}",
            self.response.body
        );
        self
    }

    pub fn has_clipboard(self, text: &str) -> Self {
        self.has_field("clipboard_text", text)
    }

    /// No response may ever carry the stored password hash
    pub fn hides_password_hash(self) -> Self {
        let raw = self.response.body.to_string();
        assert!(!raw.contains("password_hash"), "body: {raw}");
        assert!(!raw.contains("$argon2"), "body: {raw}");
        self
    }
}
