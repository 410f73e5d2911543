//! Registration and session handlers.
//!
//! ```text
//! POST /api/auth/sign-up {"name":"Ann","email":"ann@x.com","password":"secret1"}
//! POST /api/auth/sign-in {"email":"ann@x.com","password":"secret1"}
//! POST /api/auth/sign-out
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{SigninCredentials, SignupDetails, SignupFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AccountResponse, ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;

/// Sign-up request body. Missing fields are reported per field.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignUpRequest {
    #[schema(example = "Ann Example")]
    pub name: Option<String>,
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
    /// `user` or `admin`; defaults to `user`.
    #[schema(example = "user")]
    pub role: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignInRequest {
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Register an account and start a session for it.
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let details = SignupDetails::try_from_fields(SignupFields {
        name: request.name.as_deref(),
        email: request.email.as_deref(),
        password: request.password.as_deref(),
        role: request.role.as_deref(),
    })?;

    let session = state.auth.sign_up(details).await?;
    info!(account_id = session.account.id, "account registered");

    let mut response = HttpResponse::Created();
    state.session.attach(&mut response, &session.token);
    Ok(response.json(AccountResponse::new(
        "User registered successfully",
        session.account,
    )))
}

/// Check credentials and start a session.
///
/// Unknown emails and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let credentials =
        SigninCredentials::try_from_parts(request.email.as_deref(), request.password.as_deref())?;

    let session = state.auth.sign_in(&credentials).await?;

    let mut response = HttpResponse::Ok();
    state.session.attach(&mut response, &session.token);
    Ok(response.json(AccountResponse::new(
        "Signed in successfully",
        session.account,
    )))
}

/// Clear the session cookie. Succeeds with or without a session.
///
/// No session is required, so a stale or forged cookie can always be
/// cleared. The cost is that anyone may trigger a removal cookie; tokens
/// are stateless and stay valid until expiry either way.
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse,
            headers(("Set-Cookie" = String, description = "Expired session cookie")))
    ),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[post("/sign-out")]
pub async fn sign_out(state: web::Data<HttpState>) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    state.session.clear(&mut response);
    response.json(MessageResponse::new("Signed out successfully"))
}
