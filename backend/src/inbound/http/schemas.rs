//! Response bodies and OpenAPI schema definitions.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! bodies here mirror them in the inbound adapter layer, where serialisation
//! and documentation concerns belong.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AccountView, Claims, DeletedAccount, Role};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Short summary of the failure.
    #[schema(example = "Validation failed")]
    error: String,
    /// Human-readable message returned to clients.
    #[schema(example = "email must be a valid email address")]
    message: String,
    /// Supplementary details, such as per-field validation failures.
    details: Option<serde_json::Value>,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// Public account fields. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ann Example")]
    pub name: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(value_type = String, example = "user")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountView> for AccountBody {
    fn from(view: AccountView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            email: view.email,
            role: view.role,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// Identifying fields of a deleted account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeletedAccountBody {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<DeletedAccount> for DeletedAccountBody {
    fn from(deleted: DeletedAccount) -> Self {
        Self {
            id: deleted.id,
            name: deleted.name,
            email: deleted.email,
        }
    }
}

/// Claims carried by the caller's session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClaimsBody {
    #[schema(example = 1)]
    pub id: i32,
    pub email: String,
    #[schema(value_type = String, example = "user")]
    pub role: Role,
    /// Issue time in seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry time in seconds since the Unix epoch.
    pub exp: i64,
}

impl From<&Claims> for ClaimsBody {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.id.get(),
            email: claims.email.clone(),
            role: claims.role,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Signed out successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub message: String,
    pub user: AccountBody,
}

impl AccountResponse {
    pub fn new(message: impl Into<String>, view: AccountView) -> Self {
        Self {
            message: message.into(),
            user: view.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountListResponse {
    pub message: String,
    pub users: Vec<AccountBody>,
    pub count: usize,
}

impl AccountListResponse {
    pub fn new(message: impl Into<String>, views: Vec<AccountView>) -> Self {
        let users: Vec<AccountBody> = views.into_iter().map(AccountBody::from).collect();
        Self {
            message: message.into(),
            count: users.len(),
            users,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedAccountResponse {
    pub message: String,
    pub user: DeletedAccountBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimsResponse {
    pub message: String,
    pub user: ClaimsBody,
}
