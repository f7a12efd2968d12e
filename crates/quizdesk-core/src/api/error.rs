use serde::Deserialize;
use thiserror::Error;

/// Substring the backend puts in its error message when a bearer token is
/// rejected without a 401 status.
pub const INVALID_TOKEN_MARKER: &str = "token tidak valid";

/// Structured error code for a rejected token, checked before the marker.
pub const INVALID_TOKEN_CODE: &str = "TOKEN_INVALID";

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session token is no longer valid: {0}")]
    InvalidToken(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read upload {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Error body shape shared by every backend endpoint.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default, alias = "error")]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorPayload {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn marks_invalid_token(&self) -> bool {
        if let Some(code) = &self.code {
            if code.eq_ignore_ascii_case(INVALID_TOKEN_CODE) {
                return true;
            }
        }
        self.message
            .as_deref()
            .map(|m| m.contains(INVALID_TOKEN_MARKER))
            .unwrap_or(false)
    }
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let payload = ErrorPayload::parse(body);
        let invalid_token = payload.marks_invalid_token();

        let message = match payload.message {
            Some(message) => message,
            None if !body.trim().is_empty() => Self::truncate_body(body.trim()),
            None => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };

        match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            _ if invalid_token => ApiError::InvalidToken(message),
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            400 | 409 | 422 => ApiError::Rejected {
                status: status.as_u16(),
                message,
            },
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }

    /// Whether this error means the stored session is dead.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::InvalidToken(_))
    }

    /// The backend's human-readable message, verbatim, when the failure came
    /// from an HTTP response.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(m)
            | ApiError::InvalidToken(m)
            | ApiError::AccessDenied(m)
            | ApiError::NotFound(m)
            | ApiError::ServerError(m)
            | ApiError::Rejected { message: m, .. } => Some(m.as_str()),
            _ => None,
        }
    }

    /// Message for a notification: the backend's message when there is one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::NetworkError(_) => {
                "Unable to reach the server. Check your connection.".to_string()
            }
            _ => self
                .backend_message()
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_unauthorized_keeps_backend_message() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"success":false,"message":"Email atau password salah"}"#,
        );
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert!(err.is_auth_failure());
        assert_eq!(err.backend_message(), Some("Email atau password salah"));
    }

    #[test]
    fn test_marker_in_message_is_auth_failure() {
        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"message":"Akses ditolak, token tidak valid"}"#,
        );
        assert!(matches!(err, ApiError::InvalidToken(_)));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_structured_code_is_auth_failure() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"code":"token_invalid","message":"Session expired"}"#,
        );
        assert!(matches!(err, ApiError::InvalidToken(_)));
        assert_eq!(err.backend_message(), Some("Session expired"));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "{}"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, r#"{"message":"no"}"#),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"title wajib"}"#),
            ApiError::Rejected { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_other_failures_are_not_auth_failures() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message":"Judul wajib diisi"}"#);
        assert!(!err.is_auth_failure());
        assert_eq!(err.to_string(), "Judul wajib diisi");
    }

    #[test]
    fn test_plain_body_and_empty_body_messages() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.backend_message(), Some("boom"));

        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.backend_message(), Some("Not Found"));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 100);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let message = err.backend_message().unwrap_or_default();
        assert!(message.contains("truncated"));
        assert!(message.len() < body.len());
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::InvalidResponse("garbage".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message":""}"#);
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }
}
