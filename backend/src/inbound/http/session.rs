//! Session cookie handling.
//!
//! Binds a signed token to the `token` cookie so handlers only deal with
//! attaching, clearing and reading a token string.

use std::time::Duration;

use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpRequest, HttpResponseBuilder};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Cookie attributes applied to every session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCarrier {
    secure: bool,
    max_age: Duration,
}

impl SessionCarrier {
    pub fn new(secure: bool, max_age: Duration) -> Self {
        Self { secure, max_age }
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    fn base_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, value)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .finish()
    }

    /// Set the session cookie, replacing any previous one.
    pub fn attach(&self, response: &mut HttpResponseBuilder, token: &str) {
        let seconds = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);
        let mut cookie = self.base_cookie(token.to_owned());
        cookie.set_max_age(time::Duration::seconds(seconds));
        response.cookie(cookie);
    }

    /// Overwrite the session cookie with an expired removal cookie.
    pub fn clear(&self, response: &mut HttpResponseBuilder) {
        let mut cookie = self.base_cookie(String::new());
        cookie.make_removal();
        response.cookie(cookie);
    }

    /// Token carried by the request. An empty cookie counts as absent.
    pub fn extract(&self, request: &HttpRequest) -> Option<String> {
        request
            .cookie(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::test::TestRequest;
    use rstest::{fixture, rstest};

    #[fixture]
    fn carrier() -> SessionCarrier {
        SessionCarrier::new(true, Duration::from_secs(900))
    }

    fn response_cookie(response: &HttpResponse) -> Cookie<'_> {
        response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie present")
    }

    #[rstest]
    fn attach_sets_hardened_cookie(carrier: SessionCarrier) {
        let mut builder = HttpResponse::Ok();
        carrier.attach(&mut builder, "signed.token.value");
        let response = builder.finish();
        let cookie = response_cookie(&response);

        assert_eq!(cookie.value(), "signed.token.value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(900)));
    }

    #[rstest]
    fn insecure_carrier_omits_secure_flag() {
        let carrier = SessionCarrier::new(false, Duration::from_secs(60));
        let mut builder = HttpResponse::Ok();
        carrier.attach(&mut builder, "t");
        let response = builder.finish();

        assert_ne!(response_cookie(&response).secure(), Some(true));
    }

    #[rstest]
    fn clear_emits_expired_cookie(carrier: SessionCarrier) {
        let mut builder = HttpResponse::Ok();
        carrier.clear(&mut builder);
        let response = builder.finish();
        let cookie = response_cookie(&response);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("abc"), Some("abc"))]
    fn extract_reads_token_cookie(
        carrier: SessionCarrier,
        #[case] cookie: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let mut request = TestRequest::default();
        if let Some(value) = cookie {
            request = request.cookie(Cookie::new(SESSION_COOKIE_NAME, value.to_owned()));
        }

        assert_eq!(
            carrier.extract(&request.to_http_request()).as_deref(),
            expected
        );
    }
}
