//! Validated partial update of an account.

use super::account::{AccountName, EmailAddress, Password, Role};
use super::validation::FieldErrors;

/// Raw update fields as received from a client. Absent fields stay unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateFields<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub role: Option<&'a str>,
}

/// Partial account update.
///
/// ## Invariants
/// - At least one field is present when constructed from client input.
/// - Present fields satisfy the same rules as sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub name: Option<AccountName>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub role: Option<Role>,
}

impl AccountUpdate {
    /// Validate the supplied fields.
    ///
    /// # Examples
    /// ```
    /// use acquisitions::domain::{AccountUpdate, UpdateFields};
    ///
    /// let update = AccountUpdate::try_from_fields(UpdateFields {
    ///     name: Some("Annie"),
    ///     ..UpdateFields::default()
    /// })
    /// .expect("valid update");
    /// assert!(update.email.is_none());
    ///
    /// assert!(AccountUpdate::try_from_fields(UpdateFields::default()).is_err());
    /// ```
    pub fn try_from_fields(fields: UpdateFields<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let UpdateFields {
            name,
            email,
            password,
            role,
        } = fields;

        if name.is_none() && email.is_none() && password.is_none() && role.is_none() {
            errors.push("body", "at least one field must be provided for update");
            return Err(errors);
        }

        let update = Self {
            name: name.and_then(|raw| errors.check("name", AccountName::new(raw))),
            email: email.and_then(|raw| errors.check("email", EmailAddress::new(raw))),
            password: password.and_then(|raw| errors.check("password", Password::new(raw))),
            role: role.and_then(|raw| errors.check("role", raw.parse::<Role>())),
        };

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_empty_update() {
        let errors = AccountUpdate::try_from_fields(UpdateFields::default())
            .expect_err("empty update must fail");
        assert_eq!(errors.fields(), vec!["body"]);
    }

    #[rstest]
    #[case(UpdateFields { name: Some("A"), ..UpdateFields::default() }, vec!["name"])]
    #[case(UpdateFields { email: Some("bad"), role: Some("owner"), ..UpdateFields::default() }, vec!["email", "role"])]
    #[case(UpdateFields { password: Some("123"), ..UpdateFields::default() }, vec!["password"])]
    fn rejects_invalid_present_fields(
        #[case] fields: UpdateFields<'static>,
        #[case] expected: Vec<&'static str>,
    ) {
        let errors = AccountUpdate::try_from_fields(fields).expect_err("invalid update must fail");
        assert_eq!(errors.fields(), expected);
    }

    #[rstest]
    fn normalises_present_fields() {
        let update = AccountUpdate::try_from_fields(UpdateFields {
            email: Some(" New@X.com "),
            role: Some("admin"),
            ..UpdateFields::default()
        })
        .expect("valid update");
        assert_eq!(update.email.as_ref().map(AsRef::<str>::as_ref), Some("new@x.com"));
        assert_eq!(update.role, Some(Role::Admin));
        assert!(update.name.is_none());
    }
}
