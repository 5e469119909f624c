//! Identity Entity
//!
//! The authenticated principal attached to a request, as serialized
//! inside session records and exposed in API responses.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::Role;

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier within the configured user set
    pub id: String,
    /// Normalized (lowercase) email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Role granted at session creation
    pub role: Role,
}

impl Identity {
    /// Check if this identity carries the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Placeholder admin identity used when the session store is
    /// unreachable and the degradation policy allows failing open.
    /// Never produced in production configurations.
    pub fn synthetic_admin() -> Self {
        Self {
            id: "dev-admin".to_string(),
            email: "dev-admin@localhost".to_string(),
            name: "Development Admin".to_string(),
            role: Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        let admin = Identity::synthetic_admin();
        assert!(admin.is_admin());

        let user = Identity {
            id: "user".to_string(),
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            role: Role::User,
        };
        assert!(!user.is_admin());
    }

    #[test]
    fn test_identity_wire_shape() {
        let admin = Identity::synthetic_admin();
        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["id"], "dev-admin");
    }
}
