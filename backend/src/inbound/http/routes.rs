//! Route table for the HTTP adapter.
//!
//! The server and end-to-end tests mount the same table, so handler wiring
//! is defined once. Callers register [`HttpState`](super::state::HttpState)
//! and [`HealthState`](super::health::HealthState) as app data.

use actix_web::web;

use crate::inbound::http::auth::{sign_in, sign_out, sign_up};
use crate::inbound::http::error::{json_error_handler, route_not_found};
use crate::inbound::http::health::{api_root, health, live, ready, root};
use crate::inbound::http::profile::{admin_dashboard, profile};
use crate::inbound::http::users::{delete_user, get_user, list_users, patch_user, put_user};

/// Register every route and the JSON 404 fallback.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use acquisitions::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    let api = web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(api_root)
        .service(
            web::scope("/auth")
                .service(sign_up)
                .service(sign_in)
                .service(sign_out),
        )
        .service(list_users)
        .service(get_user)
        .service(put_user)
        .service(patch_user)
        .service(delete_user)
        .service(profile)
        .service(admin_dashboard);

    cfg.service(root)
        .service(health)
        .service(ready)
        .service(live)
        .service(api)
        .default_service(web::to(route_not_found));
}
