//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::web;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{MockAccountsService, MockAuthService};
use crate::domain::{AccountId, AccountView, Claims, Role};
use crate::inbound::http::session::{SESSION_COOKIE_NAME, SessionCarrier};
use crate::inbound::http::state::HttpState;

/// Token value the mocked auth service accepts in handler tests.
pub const TEST_TOKEN: &str = "test.session.token";

/// Cookie attributes used by handler tests: insecure, fifteen minutes.
pub fn test_session() -> SessionCarrier {
    SessionCarrier::new(false, Duration::from_secs(900))
}

/// Build handler state around mocked driving ports.
pub fn state_with(auth: MockAuthService, accounts: MockAccountsService) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(auth),
        Arc::new(accounts),
        test_session(),
    ))
}

/// Build handler state where only authentication is expected to be used.
pub fn state_with_auth(auth: MockAuthService) -> web::Data<HttpState> {
    state_with(auth, MockAccountsService::new())
}

/// Claims issued to account `id` with `role`.
pub fn claims_for(id: i32, role: Role) -> Claims {
    Claims {
        id: AccountId::new(id).expect("positive test id"),
        email: format!("user{id}@example.com"),
        role,
        iat: 1_700_000_000,
        exp: 1_700_086_400,
    }
}

/// Auth mock that accepts [`TEST_TOKEN`] as account `id` with `role`.
pub fn auth_accepting(id: i32, role: Role) -> MockAuthService {
    let mut auth = MockAuthService::new();
    auth.expect_authenticate()
        .withf(|token| token == TEST_TOKEN)
        .returning(move |_| Ok(claims_for(id, role)));
    auth
}

/// Session cookie carrying [`TEST_TOKEN`].
pub fn session_cookie() -> Cookie<'static> {
    Cookie::new(SESSION_COOKIE_NAME, TEST_TOKEN)
}

/// Public view of a stored account used as mock output.
pub fn view_for(id: i32, role: Role) -> AccountView {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    AccountView {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        role,
        created_at: created,
        updated_at: created,
    }
}
