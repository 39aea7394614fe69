//! Password hashing: iterated SHA-256 with a per-user random salt.
//!
//! The stored form is `iterations$salt$digest` with base64url fields, so
//! old hashes keep verifying if the iteration count is ever raised.
//! Because the salt is per user, login fetches the row by name and
//! verifies, rather than filtering by a deterministic digest in SQL.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

const ITERATIONS: u32 = 10_000;
const SALT_LEN: usize = 16;

pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = stretch(password.as_bytes(), &salt, ITERATIONS);
    format!(
        "{ITERATIONS}${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

/// Checks a plaintext against a stored hash. Anything that does not parse
/// as a stored hash simply fails verification.
pub fn verify(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(iterations), Some(salt), Some(digest)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (URL_SAFE_NO_PAD.decode(salt), URL_SAFE_NO_PAD.decode(digest))
    else {
        return false;
    };
    stretch(password.as_bytes(), &salt, iterations).as_slice() == expected
}

fn stretch(password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password);
    let mut digest: [u8; 32] = hasher.finalize().into();
    for _ in 1..iterations {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(digest);
        digest = hasher.finalize().into();
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_its_own_password() {
        let stored = hash("hunter2");
        assert!(verify("hunter2", &stored));
        assert!(!verify("hunter3", &stored));
    }

    #[test]
    fn salts_are_per_user() {
        assert_ne!(hash("same"), hash("same"));
    }

    #[test]
    fn stored_form_has_three_fields() {
        let stored = hash("p");
        assert_eq!(stored.split('$').count(), 3);
        assert!(stored.starts_with(&format!("{ITERATIONS}$")));
    }

    #[test]
    fn garbage_never_verifies() {
        assert!(!verify("p", ""));
        assert!(!verify("p", "not-a-hash"));
        assert!(!verify("p", "ten$salt$digest"));
        assert!(!verify("p", "100$!!$!!"));
    }
}
