//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by every token this service issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (account email, the principal's username)
    pub sub: String,
    /// Email
    pub email: String,
    /// Permission labels at issue time
    pub authorities: Vec<String>,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expires at (seconds since epoch)
    pub exp: i64,
}
