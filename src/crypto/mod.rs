//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key and verification-hash derivation (`kdf`)
//! - A zeroize-on-drop wrapper for the derived vault key (`keys`)
//! - AES-256-GCM field encryption and decryption (`encryption`)

pub mod encryption;
pub mod kdf;
pub mod keys;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, derive_verification_hash, generate_salt, verify_hash, PBKDF2_ITERATIONS};
pub use keys::VaultKey;
