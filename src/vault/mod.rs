//! Vault module — the encrypted credential store.
//!
//! This module provides:
//! - Plaintext credential types for callers (`credential`)
//! - The persisted record, ciphertext newtype and schema migration (`format`)
//! - `PasswordVault`, which implements every vault operation (`store`)

pub mod credential;
pub mod format;
pub mod store;

pub use credential::{default_favicon, Category, Credential, CredentialUpdate, NewCredential};
pub use format::{Encrypted, FieldDecryption, StoredCredential, VaultRecord, CURRENT_VERSION};
pub use store::{PasswordVault, DEFAULT_STORAGE_KEY};
