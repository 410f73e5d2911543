//! Account management handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! PUT    /api/users/{id} {"name":"Annie"}
//! PATCH  /api/users/{id} {"role":"admin"}
//! DELETE /api/users/{id}
//! ```
//!
//! Every route requires a session cookie. Ownership and role rules are
//! applied by the accounts service. Updates check ownership before the body
//! is parsed, so a refused caller learns nothing from payload validation.

use actix_web::{HttpResponse, delete, get, patch, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::policy::authorize_update_target;
use crate::domain::{AccountUpdate, UpdateFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::authenticated::Authenticated;
use crate::inbound::http::error::extraction_error;
use crate::inbound::http::schemas::{
    AccountListResponse, AccountResponse, DeletedAccountResponse, ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_account_id;

/// Partial update body. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Annie Example")]
    pub name: Option<String>,
    #[schema(example = "annie@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    /// Applied for admins only; ignored when a user updates themself.
    #[schema(example = "admin")]
    pub role: Option<String>,
}

/// Update body; extraction errors are held back until the caller is authorised.
type UpdatePayload = Result<web::Json<UpdateUserRequest>, actix_web::Error>;

impl UpdateUserRequest {
    fn fields(&self) -> UpdateFields<'_> {
        UpdateFields {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
            password: self.password.as_deref(),
            role: self.role.as_deref(),
        }
    }
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Accounts", body = AccountListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Account store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    caller: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<AccountListResponse>> {
    let views = state.accounts.list(caller.identity()).await?;
    Ok(web::Json(AccountListResponse::new(
        "Successfully retrieved all users",
        views,
    )))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountResponse>> {
    let id = parse_account_id(&path)?;
    let view = state.accounts.get(caller.identity(), id).await?;
    Ok(web::Json(AccountResponse::new(
        "User retrieved successfully",
        view,
    )))
}

async fn apply_update(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: UpdatePayload,
) -> ApiResult<web::Json<AccountResponse>> {
    let id = parse_account_id(&path)?;
    authorize_update_target(caller.identity(), id)?;
    let payload = payload.map_err(|err| extraction_error(&err))?;
    let update = AccountUpdate::try_from_fields(payload.fields())?;
    let view = state
        .accounts
        .update(caller.identity(), id, update)
        .await?;
    Ok(web::Json(AccountResponse::new(
        "User updated successfully",
        view,
    )))
}

/// Update an account. Same semantics as `PATCH`.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/users/{id}")]
pub async fn put_user(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: UpdatePayload,
) -> ApiResult<web::Json<AccountResponse>> {
    apply_update(caller, state, path, payload).await
}

/// Partially update an account.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn patch_user(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: UpdatePayload,
) -> ApiResult<web::Json<AccountResponse>> {
    apply_update(caller, state, path, payload).await
}

/// Delete an account. Users may delete only their own.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Deleted account", body = DeletedAccountResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_account_id(&path)?;
    let deleted = state.accounts.delete(caller.identity(), id).await?;
    Ok(HttpResponse::Ok().json(DeletedAccountResponse {
        message: "User deleted successfully".to_owned(),
        user: deleted.into(),
    }))
}

#[cfg(test)]
mod tests;
