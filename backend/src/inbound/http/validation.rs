//! Shared validation helpers for inbound HTTP adapters.

use crate::domain::{AccountId, Error, FieldErrors};

/// Parse an `{id}` path segment, reporting failures against the `id` field.
pub(crate) fn parse_account_id(raw: &str) -> Result<AccountId, Error> {
    let mut errors = FieldErrors::new();
    errors
        .check("id", AccountId::parse(raw))
        .ok_or_else(|| Error::from(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("1", 1)]
    #[case("0042", 42)]
    fn accepts_positive_integers(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_account_id(raw).map(AccountId::get), Ok(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("99999999999")]
    fn rejects_other_segments(#[case] raw: &str) {
        let error = parse_account_id(raw).expect_err("invalid id");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "id must be a positive integer");
        assert_eq!(
            error.details(),
            Some(&json!({ "fields": [{ "field": "id", "message": "id must be a positive integer" }] }))
        );
    }
}
