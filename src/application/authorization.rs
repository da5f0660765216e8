//! Role checks shared by admin handlers.
//!
//! Identity comes from the upstream provider and is trusted as given; these
//! helpers only decide whether the role may perform an action.

use crate::domain::content::ContentError;
use crate::domain::foundation::Actor;

/// Admins and editors.
pub fn ensure_can_edit(actor: &Actor, action: &'static str) -> Result<(), ContentError> {
    if actor.role.can_edit_content() {
        Ok(())
    } else {
        tracing::warn!(user_id = %actor.user_id, role = %actor.role, action, "editor role required");
        Err(ContentError::forbidden(action))
    }
}

/// Admins only.
pub fn ensure_admin(actor: &Actor, action: &'static str) -> Result<(), ContentError> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        tracing::warn!(user_id = %actor.user_id, role = %actor.role, action, "admin role required");
        Err(ContentError::forbidden(action))
    }
}
