//! Caller profile and admin dashboard.
//!
//! Both echo the session claims; the dashboard is gated on the admin role.

use actix_web::{get, web};

use crate::domain::Role;
use crate::domain::policy::authorize_roles;
use crate::inbound::http::ApiResult;
use crate::inbound::http::authenticated::Authenticated;
use crate::inbound::http::schemas::{ClaimsBody, ClaimsResponse, ErrorSchema};

/// Return the caller's session claims.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile data", body = ClaimsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(caller: Authenticated) -> web::Json<ClaimsResponse> {
    web::Json(ClaimsResponse {
        message: "Profile data".to_owned(),
        user: ClaimsBody::from(caller.claims()),
    })
}

/// Admin-only landing route.
#[utoipa::path(
    get,
    path = "/api/admin",
    responses(
        (status = 200, description = "Admin dashboard", body = ClaimsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "adminDashboard"
)]
#[get("/admin")]
pub async fn admin_dashboard(caller: Authenticated) -> ApiResult<web::Json<ClaimsResponse>> {
    authorize_roles(Some(caller.identity()), &[Role::Admin])?;
    Ok(web::Json(ClaimsResponse {
        message: "Admin dashboard".to_owned(),
        user: ClaimsBody::from(caller.claims()),
    }))
}
