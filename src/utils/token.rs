//! Session token derivation.
//!
//! The token is a reversible base64 encoding of `username:password`,
//! replicated for compatibility with the existing backend contract. It is
//! not a security scheme; a deployment against a real server should swap
//! in a server-issued opaque token behind the same session interface.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn derive(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}

/// Splits a token back into its credential pair. Returns `None` when the
/// token is not valid base64 or lacks the separator.
pub fn reverse(token: &str) -> Option<(String, String)> {
    let decoded = STANDARD.decode(token).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_and_reverse_round_trip() {
        let token = derive("alice", "p1");
        assert_eq!(reverse(&token), Some(("alice".into(), "p1".into())));
    }

    #[test]
    fn reverse_rejects_garbage() {
        assert_eq!(reverse("%%%"), None);
        assert_eq!(reverse(&STANDARD.encode("no-separator")), None);
    }

    #[test]
    fn password_may_contain_the_separator() {
        let token = derive("alice", "a:b:c");
        assert_eq!(reverse(&token), Some(("alice".into(), "a:b:c".into())));
    }
}
