//! AES-256-GCM authenticated encryption of single vault fields.
//!
//! Every call to `encrypt` draws a fresh random 96-bit nonce, so two
//! encryptions under the same key never share one.
//!
//! Layout of a sealed field:
//!   [ 12-byte nonce | ciphertext | 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::VaultKey;
use crate::errors::{Result, VaultError};

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`, returning nonce || ciphertext || tag.
pub fn encrypt(key: &VaultKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + sealed.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&sealed);
    Ok(output)
}

/// Decrypt a value produced by `encrypt`.
///
/// Any authentication failure (wrong key, flipped bit, truncation) is a
/// hard `DecryptionFailed`.  Degrading gracefully is the caller's call.
pub fn decrypt(key: &VaultKey, sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)
}
