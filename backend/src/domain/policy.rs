//! Authorisation rules for account operations.
//!
//! Pure functions over the caller [`Identity`]; services call them before
//! touching the repository so denials never depend on stored state.

use tracing::{debug, warn};

use super::account::{AccountId, Role};
use super::account_update::AccountUpdate;
use super::auth::Identity;
use super::error::Error;

/// Require an authenticated caller whose role is in `allowed`.
pub fn authorize_roles<'a>(
    identity: Option<&'a Identity>,
    allowed: &[Role],
) -> Result<&'a Identity, Error> {
    let Some(identity) = identity else {
        return Err(Error::unauthorized("User not authenticated")
            .with_summary("Authentication required"));
    };
    if !allowed.contains(&identity.role) {
        warn!(
            account_id = %identity.id,
            role = %identity.role,
            "role not permitted for this operation"
        );
        return Err(Error::forbidden("Insufficient permissions"));
    }
    Ok(identity)
}

/// Check that `actor` may update `target` at all, before any payload is read.
///
/// Non-admins are refused for every account but their own, whatever the
/// request body holds.
pub fn authorize_update_target(actor: &Identity, target: AccountId) -> Result<(), Error> {
    if actor.is_admin() || actor.owns(target) {
        return Ok(());
    }
    warn!(account_id = %actor.id, target = %target, "update of another account denied");
    Err(Error::forbidden(
        "Forbidden: You can only update your own information",
    ))
}

/// Check that `actor` may apply `update` to `target`.
///
/// A user updating their own account without admin rights has any role
/// change dropped. Updating another account requires admin.
pub fn authorize_update(
    actor: &Identity,
    target: AccountId,
    mut update: AccountUpdate,
) -> Result<AccountUpdate, Error> {
    authorize_update_target(actor, target)?;
    if !actor.is_admin() && update.role.take().is_some() {
        debug!(account_id = %actor.id, "ignoring role change requested by non-admin");
    }
    Ok(update)
}

/// Check that `actor` may delete `target`.
pub fn authorize_delete(actor: &Identity, target: AccountId) -> Result<(), Error> {
    if actor.is_admin() || actor.owns(target) {
        return Ok(());
    }
    warn!(account_id = %actor.id, target = %target, "delete of another account denied");
    Err(Error::forbidden("You can only delete your own account"))
}
