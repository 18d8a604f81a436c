//! Permission checks
//!
//! Pure bitmask comparisons guarding privileged chat operations.

use chat_core::ChatPermissions;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Gatekeeper for privileged operations
///
/// A caller holds a required set only if every required bit is held.
/// Partial matches are denials.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionChecker;

impl PermissionChecker {
    pub fn new() -> Self {
        Self
    }

    /// `(held & required) == required`
    pub fn has_permissions(&self, held: ChatPermissions, required: ChatPermissions) -> bool {
        held.has_all(required)
    }

    /// Fail with `ServiceError::PermissionDenied` naming the missing bits
    pub fn assert_permissions(
        &self,
        held: ChatPermissions,
        required: ChatPermissions,
    ) -> ServiceResult<()> {
        if self.has_permissions(held, required) {
            return Ok(());
        }

        let missing = held.missing(required);
        let names = missing.list().join(", ");
        warn!(
            held = %held,
            required = %required,
            missing = %names,
            "Permission denied"
        );
        Err(ServiceError::permission_denied(names))
    }

    /// Check the permissions a chat grants by ownership and visibility
    pub fn assert_role_permissions(
        &self,
        is_owner: bool,
        is_public: bool,
        required: ChatPermissions,
    ) -> ServiceResult<()> {
        self.assert_permissions(ChatPermissions::for_role(is_owner, is_public), required)
    }
}
