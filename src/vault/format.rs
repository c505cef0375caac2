//! Persisted vault record and its JSON encoding.
//!
//! The whole vault is stored as one JSON document under a single
//! storage key:
//!
//! ```text
//! {
//!   "credentials": [ { "id", "website", "username",
//!                      "password": hex(nonce|ciphertext|tag),
//!                      "notes"?: hex(nonce|ciphertext|tag),
//!                      "category", "createdAt", "updatedAt", "favicon"? } ],
//!   "salt": hex(32 bytes),
//!   "masterPasswordHash": hex(32 bytes),
//!   "version": 1
//! }
//! ```
//!
//! Parsing looks at `version` before anything else and runs the record
//! through `migrate`, so no other field is trusted until the schema is
//! known.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::credential::Category;
use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{HASH_LEN, SALT_LEN};
use crate::crypto::VaultKey;
use crate::errors::{Result, VaultError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Current schema version.
pub const CURRENT_VERSION: u64 = 1;

// ---------------------------------------------------------------------------
// Encrypted
// ---------------------------------------------------------------------------

/// A sealed field value: hex(nonce || ciphertext || tag).
///
/// Held as the stored hex text and only decoded in `open`, so a damaged
/// field (non-hex characters, odd length) is an integrity failure of that
/// one field rather than a parse error for the whole record.
#[derive(Clone, PartialEq, Eq)]
pub struct Encrypted(String);

impl Encrypted {
    /// Encrypt `plaintext` under `key` with a fresh nonce.
    pub fn seal(key: &VaultKey, plaintext: &str) -> Result<Self> {
        encrypt(key, plaintext.as_bytes()).map(|sealed| Self(hex::encode(sealed)))
    }

    /// Authenticated decryption of this field.
    ///
    /// Never fails hard: a wrong key, a flipped bit, anything other than
    /// lowercase hex of even length, or non-UTF-8 output all come back as `FieldDecryption::IntegrityFailed`.
    pub fn open(&self, key: &VaultKey) -> FieldDecryption {
        // Legacy records may carry an empty password string.
        if self.0.is_empty() {
            return FieldDecryption::Plain(String::new());
        }

        // Sealed fields are always written as lowercase hex, so any other
        // character (including an uppercase digit) is damage.
        if !self.0.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return FieldDecryption::IntegrityFailed;
        }
        let Ok(bytes) = hex::decode(&self.0) else {
            return FieldDecryption::IntegrityFailed;
        };
        match decrypt(key, &bytes) {
            Ok(plain) => match String::from_utf8(plain) {
                Ok(text) => FieldDecryption::Plain(text),
                Err(_) => FieldDecryption::IntegrityFailed,
            },
            Err(_) => FieldDecryption::IntegrityFailed,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Wrap stored hex text as-is.  Validity is only checked by `open`.
    pub fn from_hex(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Encrypted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Encrypted({} hex chars)", self.0.len())
    }
}

impl Serialize for Encrypted {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Encrypted {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

/// Outcome of decrypting one sealed field.
///
/// Kept as a tagged value so the vault can collapse integrity failures
/// to an empty string at its boundary while tests can still tell the
/// two cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDecryption {
    Plain(String),
    IntegrityFailed,
}

impl FieldDecryption {
    pub fn is_intact(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    /// The display value: the plaintext, or `""` if authentication failed.
    pub fn into_display(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::IntegrityFailed => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A credential as it sits in storage: sensitive fields are ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: Encrypted,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Encrypted>,
    #[serde(default)]
    pub category: Category,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// The persisted vault container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRecord {
    pub credentials: Vec<StoredCredential>,

    /// Salt for both PBKDF2 derivations (hex in JSON).
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode_32")]
    pub salt: [u8; SALT_LEN],

    /// Verification hash of the master password (hex in JSON).
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode_32")]
    pub master_password_hash: [u8; HASH_LEN],

    pub version: u64,
}

impl VaultRecord {
    /// An empty vault at the current schema version.
    pub fn new(salt: [u8; SALT_LEN], master_password_hash: [u8; HASH_LEN]) -> Self {
        Self {
            credentials: Vec::new(),
            salt,
            master_password_hash,
            version: CURRENT_VERSION,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.credentials.iter().position(|c| c.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a stored vault document, migrating it to the current schema.
pub fn parse_record(raw: &str) -> Result<VaultRecord> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| VaultError::InvalidVaultFormat(format!("vault JSON: {e}")))?;

    let value = migrate(value)?;

    serde_json::from_value(value)
        .map_err(|e| VaultError::InvalidVaultFormat(format!("vault record: {e}")))
}

/// Serialize a vault record for storage.
pub fn serialize_record(record: &VaultRecord) -> Result<String> {
    serde_json::to_string(record)
        .map_err(|e| VaultError::SerializationError(format!("vault record: {e}")))
}

/// Bring a raw document up to `CURRENT_VERSION`.
///
/// Each historical version gets one arm that rewrites `value` into the
/// next version's shape.  Version 1 is the first schema, so there are no
/// rewrite steps yet.
fn migrate(value: Value) -> Result<Value> {
    let version = value
        .get("version")
        .ok_or_else(|| VaultError::InvalidVaultFormat("missing version field".into()))?
        .as_u64()
        .ok_or_else(|| VaultError::InvalidVaultFormat("version is not an integer".into()))?;

    match version {
        CURRENT_VERSION => Ok(value),
        other => Err(VaultError::UnsupportedVersion(other)),
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for hex-encoded fixed-size fields
// ---------------------------------------------------------------------------

fn hex_encode<S>(data: &[u8; 32], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(data))
}

fn hex_decode_32<'de, D>(deserializer: D) -> std::result::Result<[u8; 32], D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        serde::de::Error::custom(format!("expected 32 bytes, got {}", bytes.len()))
    })
}
