//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Two independent values are derived from the master password and the
//! vault salt:
//!
//! - the **encryption key**: `PBKDF2(password, salt)`
//! - the **verification hash**: `PBKDF2(password || ":verification", salt || "verify")`
//!
//! Only the verification hash is ever persisted.  Because both the
//! password and the salt input differ, the stored hash says nothing about
//! the encryption key beyond what brute-forcing the password would.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{Result, VaultError};

/// PBKDF2 round count.  Changing this invalidates every existing vault,
/// so it is a constant rather than a setting.
pub const PBKDF2_ITERATIONS: u32 = 310_000;

/// Length of the vault salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the verification hash in bytes (256 bits).
pub const HASH_LEN: usize = 32;

const VERIFY_PASSWORD_SUFFIX: &[u8] = b":verification";
const VERIFY_SALT_SUFFIX: &[u8] = b"verify";

/// Derive the 256-bit AES key for a vault.
///
/// Deterministic: the same password and salt always give the same key.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<VaultKey> {
    check_salt(salt)?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut key);
    Ok(VaultKey::new(key))
}

/// Derive the hash used to check a master password on unlock.
pub fn derive_verification_hash(password: &[u8], salt: &[u8]) -> Result<[u8; HASH_LEN]> {
    check_salt(salt)?;

    let mut tagged_password = Zeroizing::new(Vec::with_capacity(
        password.len() + VERIFY_PASSWORD_SUFFIX.len(),
    ));
    tagged_password.extend_from_slice(password);
    tagged_password.extend_from_slice(VERIFY_PASSWORD_SUFFIX);

    let mut tagged_salt = Vec::with_capacity(salt.len() + VERIFY_SALT_SUFFIX.len());
    tagged_salt.extend_from_slice(salt);
    tagged_salt.extend_from_slice(VERIFY_SALT_SUFFIX);

    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(&tagged_password, &tagged_salt, PBKDF2_ITERATIONS, &mut hash);
    Ok(hash)
}

/// Compare a freshly derived hash against the stored one in constant time.
pub fn verify_hash(candidate: &[u8], stored: &[u8]) -> bool {
    // ct_eq already returns false on length mismatch without short-circuiting
    // on content.
    candidate.ct_eq(stored).into()
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

fn check_salt(salt: &[u8]) -> Result<()> {
    if salt.is_empty() {
        return Err(VaultError::KeyDerivationFailed("salt must not be empty".into()));
    }
    Ok(())
}
