//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: request and response bodies plus the error envelope
//! - **Security**: `token` cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{SignInRequest, SignUpRequest};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::schemas::{
    AccountBody, AccountListResponse, AccountResponse, ClaimsBody, ClaimsResponse,
    DeletedAccountBody, DeletedAccountResponse, ErrorCodeSchema, ErrorSchema, MessageResponse,
};
use crate::inbound::http::users::UpdateUserRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Signed session token issued by sign-up and sign-in.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Acquisitions API",
        description = "Account registration, cookie sessions and role-based account management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::put_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::profile::profile,
        crate::inbound::http::profile::admin_dashboard,
        crate::inbound::http::health::root,
        crate::inbound::http::health::api_root,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignUpRequest,
        SignInRequest,
        UpdateUserRequest,
        AccountBody,
        DeletedAccountBody,
        ClaimsBody,
        AccountResponse,
        AccountListResponse,
        DeletedAccountResponse,
        ClaimsResponse,
        MessageResponse,
        HealthStatus,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Registration and cookie sessions"),
        (name = "users", description = "Account management"),
        (name = "profile", description = "Caller profile and admin dashboard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
