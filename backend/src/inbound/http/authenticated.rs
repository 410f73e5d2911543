//! Extractor for the caller behind a session cookie.
//!
//! Handlers that take [`Authenticated`] reject requests without a valid
//! `token` cookie before any handler code runs.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Claims, Error, Identity};
use crate::inbound::http::state::HttpState;

/// Verified caller claims for the current request.
#[derive(Debug, Clone)]
pub struct Authenticated {
    claims: Claims,
    identity: Identity,
}

impl Authenticated {
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl From<Claims> for Authenticated {
    fn from(claims: Claims) -> Self {
        let identity = claims.identity();
        Self { claims, identity }
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<Authenticated, Error> {
    if let Some(claims) = req.extensions().get::<Claims>() {
        return Ok(Authenticated::from(claims.clone()));
    }

    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;

    let Some(token) = state.session.extract(req) else {
        debug!(path = req.path(), "request without session cookie");
        return Err(Error::unauthorized("No token provided").with_summary("Authentication required"));
    };

    let claims = state.auth.authenticate(&token)?;
    req.extensions_mut().insert(claims.clone());
    Ok(Authenticated::from(claims))
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}
