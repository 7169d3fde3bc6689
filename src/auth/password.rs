// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential verification.
//!
//! Passwords are stored as Argon2 PHC strings (salt embedded). The login
//! flow must take the same code path whether the email exists or not, so
//! an unknown account verifies against a process-wide dummy hash instead
//! of returning early.

use std::sync::OnceLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

/// Hash a plaintext password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| password_hash::Error::Crypto)?;
    let salt = SaltString::encode_b64(&salt_bytes)?;
    let argon2 = Argon2::default();
    let phc = argon2.hash_password(password.as_bytes(), &salt)?.to_string();
    Ok(phc)
}

/// Verify a plaintext password against a stored PHC hash.
///
/// The comparison inside Argon2 is constant-time. An unparseable stored
/// hash verifies as false rather than erroring, so a corrupt record reads
/// the same as a wrong password.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        let argon2 = Argon2::default();
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    } else {
        false
    }
}

/// A hash no password matches, verified against when the email is unknown
/// so login latency does not reveal whether an account exists.
pub fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        hash_password("6ae7c1583d4b9f20ad3bb2b68f4d2e71").unwrap_or_default()
    })
}
