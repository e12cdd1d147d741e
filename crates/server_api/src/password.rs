//! Salted, iterated SHA-256 password digests.
//!
//! Stored form: `sha256$<rounds>$<salt_b64>$<digest_b64>`.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const SCHEME: &str = "sha256";
const DEFAULT_ROUNDS: u32 = 100_000;

pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4();
    hash_with(password, salt.as_bytes(), DEFAULT_ROUNDS)
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (STANDARD_NO_PAD.decode(salt), STANDARD_NO_PAD.decode(expected))
    else {
        return false;
    };

    constant_time_eq(&digest(password, &salt, rounds), &expected)
}

fn hash_with(password: &str, salt: &[u8], rounds: u32) -> String {
    format!(
        "{SCHEME}${rounds}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(digest(password, salt, rounds))
    )
}

fn digest(password: &str, salt: &[u8], rounds: u32) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut out = hasher.finalize();
    for _ in 1..rounds.max(1) {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(out);
        out = hasher.finalize();
    }
    out.to_vec()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
