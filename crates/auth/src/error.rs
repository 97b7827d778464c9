//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token settings rejected at startup
    #[error("Invalid JWT configuration: {0}")]
    InvalidConfig(String),

    /// Signature valid but `exp` has passed
    #[error("Token has expired")]
    TokenExpired,

    /// Signature, structure, issuer or audience check failed
    #[error("Invalid token")]
    InvalidToken,

    /// Token subject no longer resolves to an account
    #[error("No account found for token subject")]
    IdentityNotFound,

    #[error("Credential store error: {0}")]
    CredentialStore(String),

    #[error("Unexpected authentication fault: {0}")]
    Unexpected(String),

    #[error("Full authentication is required to access this resource")]
    MissingAuthorization,

    #[error("Username / password incorrect. Please try again")]
    BadCredentials,
}

impl AuthError {
    /// HTTP status for this error outside the authorization gate
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::IdentityNotFound
            | AuthError::MissingAuthorization => StatusCode::UNAUTHORIZED,
            AuthError::BadCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidConfig(_)
            | AuthError::CredentialStore(_)
            | AuthError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    ///
    /// A vanished identity reads exactly like a forged token, and server-side
    /// faults never carry their detail outward.
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => "Token has expired",
            AuthError::InvalidToken | AuthError::IdentityNotFound => "Invalid token",
            AuthError::MissingAuthorization => {
                "Full authentication is required to access this resource"
            }
            AuthError::BadCredentials => "Username / password incorrect. Please try again",
            AuthError::InvalidConfig(_)
            | AuthError::CredentialStore(_)
            | AuthError::Unexpected(_) => "Internal server error",
        }
    }
}

/// JSON error body shared by every auth failure: `{"error": .., "status": ".."}`
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "error": message,
        "status": status.as_u16().to_string(),
    }));

    (status, body).into_response()
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Authentication subsystem failure");
        }

        error_response(status, self.client_message())
    }
}

impl From<AuthError> for plantplanet_common::Error {
    fn from(err: AuthError) -> Self {
        match err.status_code() {
            StatusCode::UNAUTHORIZED => Self::Authentication(err.client_message().to_string()),
            StatusCode::BAD_REQUEST => Self::Validation(err.client_message().to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}
