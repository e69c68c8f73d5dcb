//! Log sanitization utilities
//!
//! Keeps credentials (passwords, tokens, client secrets, passcodes) and
//! oversized SDK output out of debug/error logs.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "********";

/// Parameter names whose values must never be logged.
const SECRET_KEYS: &[&str] = &[
    "application_credential_secret",
    "auth_token",
    "client_secret",
    "passcode",
    "password",
    "token",
];

/// Whether the value stored under `key` is a secret.
pub fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.contains(&key)
}

/// MSRV-compatible replacement for `str::floor_char_boundary`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a string for safe logging.
///
/// Strings over the limit keep their first `TRUNCATE_LIMIT` bytes (cut on a
/// char boundary) followed by a note with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}
