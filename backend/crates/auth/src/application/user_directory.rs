//! Configured User Directory
//!
//! The credential backend is a small immutable set of users sourced from
//! environment variables at startup. There is no user database; the
//! directory is built once and shared behind an `Arc`.
//!
//! Admin password material is resolved in precedence order:
//! 1. `NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64` (base64-wrapped bcrypt hash,
//!    survives `$` mangling in env tooling)
//! 2. `NEXTAUTH_ADMIN_PASSWORD_HASH` (raw bcrypt hash)
//! 3. `NEXTAUTH_ADMIN_PASSWORD` (plaintext, hashed once at startup)
//!
//! An email configured without any password material becomes an
//! OAuth-only entry: it resolves for identity enrichment but can never
//! pass password login.

use platform::password::{ClearTextPassword, DEFAULT_COST, HashedPassword};

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::user_role::Role;
use crate::error::{AuthError, AuthResult};

/// A single configured user
#[derive(Debug, Clone)]
pub struct ConfigUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// `None` marks an OAuth-only account
    pub password_hash: Option<HashedPassword>,
}

impl ConfigUser {
    /// Identity carried by sessions and responses
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }

    pub fn is_oauth_only(&self) -> bool {
        self.password_hash.is_none()
    }
}

/// Immutable set of users known to the credential verifier
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<ConfigUser>,
}

impl UserDirectory {
    pub fn new(users: Vec<ConfigUser>) -> Self {
        Self { users }
    }

    /// Build the directory from process environment variables
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the directory from an arbitrary variable lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests inject a map.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut users = Vec::new();

        if let Some(email) = setting(&lookup, "ADMIN_EMAIL") {
            users.push(ConfigUser {
                id: "admin".to_string(),
                email,
                name: "Admin".to_string(),
                role: Role::Admin,
                password_hash: admin_password_hash(&lookup)?,
            });
        }

        if let Some(email) = setting(&lookup, "USER_EMAIL") {
            let password_hash = match setting(&lookup, "USER_PASSWORD_HASH") {
                Some(hash) => Some(parse_hash(&hash, "USER_PASSWORD_HASH")?),
                None => hash_plaintext(secret(&lookup, "USER_PASSWORD"), "USER_PASSWORD")?,
            };
            users.push(ConfigUser {
                id: "user".to_string(),
                email,
                name: "User".to_string(),
                role: Role::User,
                password_hash,
            });
        }

        Ok(Self::new(users))
    }

    /// Well-known local accounts for development without environment setup
    pub fn development() -> AuthResult<Self> {
        // Low cost keeps startup instant; these credentials are public anyway.
        const DEV_COST: u32 = 4;

        let admin_hash = dev_hash("admin123", DEV_COST)?;
        let user_hash = dev_hash("user123", DEV_COST)?;

        Ok(Self::new(vec![
            ConfigUser {
                id: "admin".to_string(),
                email: "admin@example.com".to_string(),
                name: "Admin".to_string(),
                role: Role::Admin,
                password_hash: Some(admin_hash),
            },
            ConfigUser {
                id: "user".to_string(),
                email: "user@example.com".to_string(),
                name: "User".to_string(),
                role: Role::User,
                password_hash: Some(user_hash),
            },
            ConfigUser {
                id: "oauth".to_string(),
                email: "oauth@example.com".to_string(),
                name: "OAuth User".to_string(),
                role: Role::User,
                password_hash: None,
            },
        ]))
    }

    /// Case-insensitive email lookup
    pub fn find_by_email(&self, email: &str) -> Option<&ConfigUser> {
        let needle = email.trim();
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}

/// Read a trimmed, non-empty setting
fn setting<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a secret verbatim (passwords are never trimmed)
fn secret<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty())
}

fn admin_password_hash<F>(lookup: &F) -> AuthResult<Option<HashedPassword>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(encoded) = setting(lookup, "NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64") {
        let bytes = platform::crypto::from_base64(&encoded).map_err(|_| {
            AuthError::Validation(
                "NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64 is not valid base64".to_string(),
            )
        })?;
        let decoded = String::from_utf8(bytes).map_err(|_| {
            AuthError::Validation(
                "NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64 does not decode to UTF-8".to_string(),
            )
        })?;
        return Ok(Some(parse_hash(
            decoded.trim(),
            "NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64",
        )?));
    }

    if let Some(hash) = setting(lookup, "NEXTAUTH_ADMIN_PASSWORD_HASH") {
        return Ok(Some(parse_hash(&hash, "NEXTAUTH_ADMIN_PASSWORD_HASH")?));
    }

    hash_plaintext(
        secret(lookup, "NEXTAUTH_ADMIN_PASSWORD"),
        "NEXTAUTH_ADMIN_PASSWORD",
    )
}

fn parse_hash(raw: &str, source: &str) -> AuthResult<HashedPassword> {
    HashedPassword::from_hash_string(raw)
        .map_err(|_| AuthError::Validation(format!("{source} is not a bcrypt hash")))
}

fn hash_plaintext(raw: Option<String>, source: &str) -> AuthResult<Option<HashedPassword>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let password = ClearTextPassword::new(raw)
        .map_err(|e| AuthError::Validation(format!("{source}: {e}")))?;
    let hashed = password
        .hash(DEFAULT_COST)
        .map_err(|e| AuthError::Internal(format!("Failed to hash {source}: {e}")))?;
    Ok(Some(hashed))
}

fn dev_hash(password: &str, cost: u32) -> AuthResult<HashedPassword> {
    ClearTextPassword::new(password)
        .and_then(|p| p.hash(cost))
        .map_err(|e| AuthError::Internal(format!("Failed to build development user: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a HashMap<&'a str, String>) -> impl Fn(&str) -> Option<String> + 'a {
        |name| vars.get(name).cloned()
    }

    fn test_hash(password: &str) -> HashedPassword {
        ClearTextPassword::new(password).unwrap().hash(4).unwrap()
    }

    #[test]
    fn test_empty_environment() {
        let vars = HashMap::new();
        let dir = UserDirectory::from_lookup(lookup(&vars)).unwrap();
        assert!(dir.is_empty());
    }

    #[test]
    fn test_admin_from_raw_hash() {
        let hash = test_hash("hunter2");
        let vars = HashMap::from([
            ("ADMIN_EMAIL", "boss@example.com".to_string()),
            ("NEXTAUTH_ADMIN_PASSWORD_HASH", hash.as_str().to_string()),
        ]);

        let dir = UserDirectory::from_lookup(lookup(&vars)).unwrap();
        let admin = dir.find_by_email("boss@example.com").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.id, "admin");

        let password = ClearTextPassword::new("hunter2").unwrap();
        assert!(admin.password_hash.as_ref().unwrap().verify(&password));
    }

    #[test]
    fn test_base64_hash_takes_precedence() {
        let winning = test_hash("right");
        let losing = test_hash("wrong");
        let vars = HashMap::from([
            ("ADMIN_EMAIL", "boss@example.com".to_string()),
            (
                "NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64",
                platform::crypto::to_base64(winning.as_str().as_bytes()),
            ),
            ("NEXTAUTH_ADMIN_PASSWORD_HASH", losing.as_str().to_string()),
        ]);

        let dir = UserDirectory::from_lookup(lookup(&vars)).unwrap();
        let admin = dir.find_by_email("boss@example.com").unwrap();

        let password = ClearTextPassword::new("right").unwrap();
        assert!(admin.password_hash.as_ref().unwrap().verify(&password));
    }

    #[test]
    fn test_plaintext_user_password_hashed_at_startup() {
        let vars = HashMap::from([
            ("USER_EMAIL", "member@example.com".to_string()),
            ("USER_PASSWORD", "letmein".to_string()),
        ]);

        let dir = UserDirectory::from_lookup(lookup(&vars)).unwrap();
        let user = dir.find_by_email("member@example.com").unwrap();
        assert_eq!(user.role, Role::User);

        let password = ClearTextPassword::new("letmein").unwrap();
        assert!(user.password_hash.as_ref().unwrap().verify(&password));
    }

    #[test]
    fn test_email_without_password_is_oauth_only() {
        let vars = HashMap::from([("USER_EMAIL", "sso@example.com".to_string())]);
        let dir = UserDirectory::from_lookup(lookup(&vars)).unwrap();
        assert!(dir.find_by_email("sso@example.com").unwrap().is_oauth_only());
    }

    #[test]
    fn test_invalid_hash_rejected() {
        let vars = HashMap::from([
            ("ADMIN_EMAIL", "boss@example.com".to_string()),
            ("NEXTAUTH_ADMIN_PASSWORD_HASH", "not-a-bcrypt-hash".to_string()),
        ]);
        assert!(UserDirectory::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let vars = HashMap::from([
            ("ADMIN_EMAIL", "boss@example.com".to_string()),
            (
                "NEXTAUTH_ADMIN_PASSWORD_HASH_BASE64",
                "!!!not base64!!!".to_string(),
            ),
        ]);
        assert!(UserDirectory::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_find_by_email_case_insensitive() {
        let dir = UserDirectory::development().unwrap();
        assert!(dir.find_by_email("Admin@Example.COM").is_some());
        assert!(dir.find_by_email("  admin@example.com  ").is_some());
        assert!(dir.find_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_development_accounts() {
        let dir = UserDirectory::development().unwrap();
        assert_eq!(dir.len(), 3);

        let admin = dir.find_by_email("admin@example.com").unwrap();
        assert!(admin.role.is_admin());
        let password = ClearTextPassword::new("admin123").unwrap();
        assert!(admin.password_hash.as_ref().unwrap().verify(&password));

        assert!(dir.find_by_email("oauth@example.com").unwrap().is_oauth_only());
    }
}
