//! Account API handlers
//!
//! - POST /user/login - Exchange email and password for a token
//! - POST /user/register - Create an account
//! - POST /user/logout - Acknowledge logout (tokens are stateless)
//! - PUT /user/change - Update the caller's profile and reissue their token
//! - GET /user/me - Current account and its authorities

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, StatusCode},
    response::{IntoResponse, Json},
};
use plantplanet_auth::{bearer_header_value, AuthBackend, AuthUser};
use plantplanet_common::{hash_password_blocking, Error, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{AccountChanges, NewAccount, ReadUser};
use crate::domain::validation::{validate_not_blank, MAX_NAME_LEN, MAX_PROFILE_IMAGE_LEN};

pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
pub const EMAIL_IN_USE: &str = "Email is already in use. Please try another one.";
pub const LOGGED_OUT: &str = "User logged out successfully.";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = validate_not_blank))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = validate_not_blank))]
    pub password: String,

    #[validate(length(max = MAX_PROFILE_IMAGE_LEN))]
    pub profile_image: Option<String>,
}

/// Request for changing the caller's profile; omitted fields are kept
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom(function = validate_not_blank))]
    pub password: Option<String>,

    #[validate(length(max = MAX_PROFILE_IMAGE_LEN))]
    pub profile_image: Option<String>,
}

/// Account plus a freshly issued token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: ReadUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: ReadUser,
    pub authorities: Vec<String>,
}

/// POST /user/login
pub async fn login(
    State(auth): State<AuthBackend>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let (principal, token) = auth.login(&request.email, &request.password).await?;

    Ok(Json(SessionResponse {
        user: ReadUser::from(&principal),
        token,
    }))
}

/// POST /user/register
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    if state.repos.users.email_exists(&request.email).await? {
        return Err(Error::Validation(EMAIL_ALREADY_REGISTERED.to_string()));
    }

    let password_hash = hash_password_blocking(request.password).await?;

    let created = state
        .repos
        .users
        .create(NewAccount {
            name: request.name,
            email: request.email,
            password_hash,
            profile_image: request.profile_image,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                Error::Validation(EMAIL_ALREADY_REGISTERED.to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(account_id = ?created.id, "Account registered");

    Ok((StatusCode::CREATED, Json(ReadUser::from(&created))))
}

/// POST /user/logout
pub async fn logout(AuthUser(principal): AuthUser) -> &'static str {
    tracing::info!(account_id = ?principal.account_id(), "User logged out");
    LOGGED_OUT
}

/// PUT /user/change
pub async fn change(
    AuthUser(principal): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<ChangeRequest>,
) -> Result<impl IntoResponse> {
    let account_id = principal
        .account_id()
        .ok_or_else(|| Error::Internal("Authenticated principal has no account id".to_string()))?;

    let email_changes = request
        .email
        .as_deref()
        .is_some_and(|email| email != principal.email());
    if email_changes {
        if let Some(email) = request.email.as_deref() {
            if state.repos.users.email_exists(email).await? {
                return Err(Error::Conflict(EMAIL_IN_USE.to_string()));
            }
        }
    }

    let password_hash = match request.password {
        Some(password) => Some(hash_password_blocking(password).await?),
        None => None,
    };

    let changes = AccountChanges {
        name: request.name,
        email: request.email,
        password_hash,
        profile_image: request.profile_image,
    };

    let updated = state
        .repos
        .users
        .update(account_id, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => Error::Conflict(EMAIL_IN_USE.to_string()),
            other => other.into(),
        })?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    // The subject is the email, so the old token stops resolving once it changes
    let refreshed = state.auth.resolver().resolve(&updated).await?;
    let token = state.auth.codec().issue(&refreshed)?;
    let header = bearer_header_value(&token)?;

    tracing::info!(account_id, "Account updated");

    Ok((
        [(AUTHORIZATION, header)],
        Json(SessionResponse {
            user: ReadUser::from(&updated),
            token,
        }),
    ))
}

/// GET /user/me
pub async fn me(AuthUser(principal): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: ReadUser::from(principal.as_ref()),
        authorities: principal.authority_labels(),
    })
}
