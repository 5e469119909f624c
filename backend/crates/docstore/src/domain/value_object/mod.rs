//! Value Objects

pub mod slug;
pub mod version_id;

/// Longest accepted path segment
pub const MAX_SEGMENT_LEN: usize = 100;

/// Validate a route segment before it may appear in a filesystem path.
///
/// Slugs and version ids go through the same gate: charset
/// `[a-z0-9_-]`, length 1-100, and an explicit rejection of traversal
/// and separator sequences. The charset check alone already excludes
/// `.`/`/`/`\`/control bytes; the explicit check stays so the contract
/// is visible at the boundary.
pub(crate) fn validate_path_segment(raw: &str, what: &str) -> Result<(), String> {
    if raw.is_empty() {
        return Err(format!("{what} must not be empty"));
    }
    if raw.len() > MAX_SEGMENT_LEN {
        return Err(format!("{what} must be at most {MAX_SEGMENT_LEN} characters"));
    }
    if raw.contains("..")
        || raw.contains('/')
        || raw.contains('\\')
        || raw.contains('\0')
        || raw.contains('\r')
        || raw.contains('\n')
    {
        return Err(format!("{what} contains forbidden characters"));
    }
    if !raw
        .bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-'))
    {
        return Err(format!(
            "{what} may only contain lowercase letters, digits, '_' and '-'"
        ));
    }
    Ok(())
}
