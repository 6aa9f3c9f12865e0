//! Identity of the caller as seen by report operations.
//!
//! The API layer resolves an [`AuthContext`] from the session and passes it
//! explicitly into every operation that needs to know who is acting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::roles;

/// Authenticated principal attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

impl AuthContext {
    #[must_use]
    pub fn new(user_id: i32, username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            role: role.into(),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Owner-or-admin rule for mutating an existing report.
    #[must_use]
    pub fn may_modify(&self, owner_id: i32) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

impl fmt::Display for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} ({})", self.username, self.user_id, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_may_modify_any_report() {
        let admin = AuthContext::new(1, "admin", roles::ADMIN);
        assert!(admin.is_admin());
        assert!(admin.may_modify(1));
        assert!(admin.may_modify(42));
    }

    #[test]
    fn operator_may_modify_only_own_reports() {
        let operator = AuthContext::new(7, "night-shift", roles::OPERATOR);
        assert!(!operator.is_admin());
        assert!(operator.may_modify(7));
        assert!(!operator.may_modify(8));
    }

    #[test]
    fn role_comparison_is_exact() {
        let shouty = AuthContext::new(3, "x", "ADMIN");
        assert!(!shouty.is_admin());
    }
}
