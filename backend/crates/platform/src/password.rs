//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Zeroization of clear-text material
//! - Redacted Debug output
//! - Hash verification delegated entirely to the bcrypt library
//!   (its comparison is the single source of truth; no pre-checks,
//!   no secondary hashing, no length-based shortcuts)

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default bcrypt work factor for hashes produced at startup
/// from plaintext-configured passwords.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt hash strings are always 60 characters in the `$2x$` family.
const BCRYPT_HASH_LEN: usize = 60;

// ============================================================================
// Error Types
// ============================================================================

/// Password handling errors
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Password was empty or whitespace-only
    #[error("Password cannot be empty")]
    Empty,

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a recognizable bcrypt string
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a submitted password.
    ///
    /// The only rejection here is the empty string; anything else is
    /// forwarded to bcrypt untouched so that verification behaves
    /// identically to the stored-hash producer.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(raw))
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with bcrypt at the given cost.
    ///
    /// Used at startup to turn plaintext-configured passwords into
    /// hashes, so every verification afterwards goes through the same
    /// bcrypt comparison.
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordError> {
        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt password hash (`$2a$` / `$2b$` / `$2y$` string)
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("admin123").unwrap();
/// let hashed = password.hash(4).unwrap();
/// assert!(hashed.verify(&password));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored bcrypt hash string (e.g., from environment config)
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordError> {
        let hash = s.into();

        let known_prefix =
            hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$");
        if !known_prefix || hash.len() != BCRYPT_HASH_LEN {
            return Err(PasswordError::InvalidHashFormat);
        }

        Ok(Self { hash })
    }

    /// Get the hash string for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash.
    ///
    /// bcrypt performs the comparison internally; a malformed stored
    /// hash verifies as false rather than erroring out of a login flow.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
