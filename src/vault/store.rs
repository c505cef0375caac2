//! High-level vault operations.
//!
//! `PasswordVault` wraps the record format, the crypto layer and an
//! injected `KeyValueStore`.  Every operation reads the whole record,
//! works on it in memory, and writes the whole record back with a
//! single `set`; there are no partial writes.
//!
//! Expected conditions are values, not errors:
//! - no vault yet: `false`, `None` or an empty list
//! - wrong master password: `false` or `None`
//! - a field that fails authenticated decryption: `""`
//!
//! Storage failures are always returned as `Err`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::crypto::kdf::{derive_key, derive_verification_hash, generate_salt, verify_hash};
use crate::crypto::VaultKey;
use crate::errors::{Result, VaultError};
use crate::storage::KeyValueStore;

use super::credential::{Credential, CredentialUpdate, NewCredential};
use super::format::{
    parse_record, serialize_record, Encrypted, FieldDecryption, StoredCredential, VaultRecord,
};

/// Storage key the vault lives under unless told otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "trails_password_vault_v1";

/// The credential vault.
///
/// Holds no key material between calls: each operation derives what it
/// needs from the master password it is given and drops it on return.
/// An internal lock serializes operations on one handle, so a re-key can
/// never interleave with another mutation.
pub struct PasswordVault<S> {
    store: S,
    storage_key: String,
    lock: Mutex<()>,
}

impl<S: KeyValueStore> PasswordVault<S> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Use `store` with the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_storage_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Use `store` with a custom storage key (e.g. one per profile).
    pub fn with_storage_key(store: S, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Vault lifecycle
    // ------------------------------------------------------------------

    /// Returns `true` if a vault is stored.  No decryption.
    pub fn vault_exists(&self) -> Result<bool> {
        let _guard = self.guard();
        self.store.contains(&self.storage_key)
    }

    /// Create an empty vault protected by `master_password`.
    ///
    /// Fails with `VaultAlreadyExists` if one is already stored.
    pub fn create_vault(&self, master_password: &str) -> Result<()> {
        require_password(master_password)?;
        let _guard = self.guard();

        if self.store.contains(&self.storage_key)? {
            return Err(VaultError::VaultAlreadyExists(self.storage_key.clone()));
        }

        let salt = generate_salt();
        let hash = derive_verification_hash(master_password.as_bytes(), &salt)?;
        self.write_record(&VaultRecord::new(salt, hash))?;

        debug!(storage_key = %self.storage_key, "vault created");
        Ok(())
    }

    /// Irreversibly remove the stored vault.
    pub fn delete_vault(&self) -> Result<()> {
        let _guard = self.guard();
        self.store.remove(&self.storage_key)?;
        debug!(storage_key = %self.storage_key, "vault deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Verification
    // ------------------------------------------------------------------

    /// Check `master_password` against the stored verification hash.
    ///
    /// Never derives the encryption key.  An empty password, a missing
    /// vault and a wrong password all give `Ok(false)`.
    pub fn verify_master_password(&self, master_password: &str) -> Result<bool> {
        if master_password.is_empty() {
            return Ok(false);
        }
        let _guard = self.guard();

        match self.read_record()? {
            Some(record) => verify_against(&record, master_password),
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Decrypt and return every credential.
    ///
    /// Does not verify the password first: with a wrong password every
    /// sensitive field fails authentication and comes back as `""`.
    pub fn load_credentials(&self, master_password: &str) -> Result<Vec<Credential>> {
        require_password(master_password)?;
        let _guard = self.guard();

        let Some(record) = self.read_record()? else {
            return Ok(Vec::new());
        };
        let key = derive_key(master_password.as_bytes(), &record.salt)?;

        Ok(record
            .credentials
            .iter()
            .map(|stored| unseal(stored, &key).into_credential())
            .collect())
    }

    /// Decrypt a single credential by id.
    pub fn find_credential(&self, master_password: &str, id: &str) -> Result<Option<Credential>> {
        require_password(master_password)?;
        let _guard = self.guard();

        let Some(record) = self.read_record()? else {
            return Ok(None);
        };
        let Some(index) = record.position(id) else {
            return Ok(None);
        };
        let key = derive_key(master_password.as_bytes(), &record.salt)?;

        Ok(Some(unseal(&record.credentials[index], &key).into_credential()))
    }

    /// Number of stored credentials.  No decryption.
    pub fn credential_count(&self) -> Result<usize> {
        let _guard = self.guard();
        Ok(self
            .read_record()?
            .map_or(0, |record| record.credentials.len()))
    }

    /// Encrypt and append a new credential.
    ///
    /// Returns the stored credential with its plaintext fields, or `None`
    /// if there is no vault or the master password is wrong.
    pub fn save_credential(
        &self,
        master_password: &str,
        credential: NewCredential,
    ) -> Result<Option<Credential>> {
        require_password(master_password)?;
        let _guard = self.guard();

        let Some(mut record) = self.read_record()? else {
            return Ok(None);
        };
        if !verify_against(&record, master_password)? {
            debug!("save rejected: master password mismatch");
            return Ok(None);
        }
        let key = derive_key(master_password.as_bytes(), &record.salt)?;

        let notes = credential.notes.filter(|n| !n.is_empty());
        let now = now_millis();
        let id = fresh_id(&record);

        let stored = StoredCredential {
            id: id.clone(),
            website: credential.website.clone(),
            username: credential.username.clone(),
            password: Encrypted::seal(&key, &credential.password)?,
            notes: notes
                .as_deref()
                .map(|n| Encrypted::seal(&key, n))
                .transpose()?,
            category: credential.category,
            created_at: now,
            updated_at: now,
            favicon: credential.favicon.clone(),
        };

        record.credentials.push(stored);
        self.write_record(&record)?;
        debug!(id = %id, total = record.credentials.len(), "credential saved");

        Ok(Some(Credential {
            id,
            website: credential.website,
            username: credential.username,
            password: credential.password,
            notes,
            category: credential.category,
            created_at: now,
            updated_at: now,
            favicon: credential.favicon,
        }))
    }

    /// Apply a partial update to the credential `id`.
    ///
    /// Only the sensitive fields being changed are re-encrypted; the
    /// others keep their existing ciphertext.  Returns `false` if there is
    /// no vault, the password is wrong, or `id` is unknown.
    pub fn update_credential(
        &self,
        master_password: &str,
        id: &str,
        update: CredentialUpdate,
    ) -> Result<bool> {
        require_password(master_password)?;
        let _guard = self.guard();

        let Some(mut record) = self.read_record()? else {
            return Ok(false);
        };
        let Some(index) = record.position(id) else {
            return Ok(false);
        };
        if !verify_against(&record, master_password)? {
            debug!(id, "update rejected: master password mismatch");
            return Ok(false);
        }

        let needs_key = update.password.as_deref().is_some_and(|p| !p.is_empty())
            || matches!(update.notes, Some(Some(ref n)) if !n.is_empty());
        let key = if needs_key {
            Some(derive_key(master_password.as_bytes(), &record.salt)?)
        } else {
            None
        };

        let entry = &mut record.credentials[index];

        if let Some(website) = update.website {
            entry.website = website;
        }
        if let Some(username) = update.username {
            entry.username = username;
        }
        if let Some(category) = update.category {
            entry.category = category;
        }
        if let Some(favicon) = update.favicon {
            entry.favicon = favicon.filter(|f| !f.is_empty());
        }
        if let (Some(password), Some(key)) = (update.password.as_deref(), key.as_ref()) {
            if !password.is_empty() {
                entry.password = Encrypted::seal(key, password)?;
            }
        }
        match update.notes {
            Some(Some(notes)) if !notes.is_empty() => {
                if let Some(key) = key.as_ref() {
                    entry.notes = Some(Encrypted::seal(key, &notes)?);
                }
            }
            Some(_) => entry.notes = None,
            None => {}
        }
        entry.updated_at = now_millis().max(entry.updated_at);

        self.write_record(&record)?;
        debug!(id, "credential updated");
        Ok(true)
    }

    /// Remove the credential `id`.  Needs no password: nothing is
    /// decrypted.  Returns `false` if there is no vault or no such id.
    pub fn delete_credential(&self, id: &str) -> Result<bool> {
        let _guard = self.guard();

        let Some(mut record) = self.read_record()? else {
            return Ok(false);
        };
        let Some(index) = record.position(id) else {
            return Ok(false);
        };

        record.credentials.remove(index);
        self.write_record(&record)?;
        debug!(id, "credential deleted");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Re-keying
    // ------------------------------------------------------------------

    /// Replace the master password.
    ///
    /// Decrypts everything under the old key, then builds a new salt,
    /// verification hash and key, re-encrypts everything, and stores the
    /// new record in one write.  On any failure the stored vault is left
    /// as it was.
    ///
    /// Returns `false` if there is no vault or `old_password` is wrong.
    /// Fails with `RekeyAborted` if any field cannot be decrypted under the
    /// old key, rather than re-encrypting it as `""`.
    pub fn change_master_password(&self, old_password: &str, new_password: &str) -> Result<bool> {
        require_password(old_password)?;
        require_password(new_password)?;
        let _guard = self.guard();

        let Some(record) = self.read_record()? else {
            return Ok(false);
        };
        if !verify_against(&record, old_password)? {
            debug!("re-key rejected: master password mismatch");
            return Ok(false);
        }

        let old_key = derive_key(old_password.as_bytes(), &record.salt)?;
        let mut plaintexts = Vec::with_capacity(record.credentials.len());
        for stored in &record.credentials {
            let opened = unseal(stored, &old_key);
            if !opened.is_intact() {
                return Err(VaultError::RekeyAborted(format!(
                    "credential {} could not be decrypted with the current key",
                    stored.id
                )));
            }
            plaintexts.push(opened.into_credential());
        }
        drop(old_key);

        let salt = generate_salt();
        let hash = derive_verification_hash(new_password.as_bytes(), &salt)?;
        let new_key = derive_key(new_password.as_bytes(), &salt)?;

        let mut rekeyed = VaultRecord::new(salt, hash);
        for (stored, plain) in record.credentials.iter().zip(&plaintexts) {
            rekeyed.credentials.push(StoredCredential {
                password: Encrypted::seal(&new_key, &plain.password)?,
                notes: plain
                    .notes
                    .as_deref()
                    .map(|n| Encrypted::seal(&new_key, n))
                    .transpose()?,
                ..stored.clone()
            });
        }

        for plain in &mut plaintexts {
            plain.password.zeroize();
            if let Some(notes) = plain.notes.as_mut() {
                notes.zeroize();
            }
        }

        self.write_record(&rekeyed)?;
        debug!(count = rekeyed.credentials.len(), "vault re-keyed");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The lock protects no data of its own, so a poisoned lock is
        // still usable.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_record(&self) -> Result<Option<VaultRecord>> {
        match self.store.get(&self.storage_key)? {
            Some(raw) => parse_record(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn write_record(&self, record: &VaultRecord) -> Result<()> {
        let json = serialize_record(record)?;
        self.store.set(&self.storage_key, &json)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A stored credential after decryption, with per-field outcomes kept.
struct Unsealed<'a> {
    stored: &'a StoredCredential,
    password: FieldDecryption,
    notes: Option<FieldDecryption>,
}

impl Unsealed<'_> {
    fn is_intact(&self) -> bool {
        self.password.is_intact() && self.notes.as_ref().map_or(true, FieldDecryption::is_intact)
    }

    fn into_credential(self) -> Credential {
        let stored = self.stored;
        Credential {
            id: stored.id.clone(),
            website: stored.website.clone(),
            username: stored.username.clone(),
            password: self.password.into_display(),
            notes: self.notes.map(FieldDecryption::into_display),
            category: stored.category,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            favicon: stored.favicon.clone(),
        }
    }
}

fn unseal<'a>(stored: &'a StoredCredential, key: &VaultKey) -> Unsealed<'a> {
    let password = stored.password.open(key);
    if !password.is_intact() {
        warn!(id = %stored.id, field = "password", "field failed authenticated decryption");
    }

    let notes = stored.notes.as_ref().map(|n| n.open(key));
    if notes.as_ref().is_some_and(|n| !n.is_intact()) {
        warn!(id = %stored.id, field = "notes", "field failed authenticated decryption");
    }

    Unsealed {
        stored,
        password,
        notes,
    }
}

fn verify_against(record: &VaultRecord, master_password: &str) -> Result<bool> {
    let candidate = derive_verification_hash(master_password.as_bytes(), &record.salt)?;
    Ok(verify_hash(&candidate, &record.master_password_hash))
}

/// Reject empty passwords before spending time on key derivation.
fn require_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(VaultError::InvalidInput("master password cannot be empty".into()));
    }
    Ok(())
}

fn fresh_id(record: &VaultRecord) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !record.contains_id(&id) {
            return id;
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_master_password_is_rejected_before_derivation() {
        let vault = PasswordVault::new(MemoryStore::new());
        assert!(matches!(
            vault.create_vault(""),
            Err(VaultError::InvalidInput(_))
        ));
        assert!(!vault.vault_exists().unwrap());
        assert!(matches!(
            vault.load_credentials(""),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn operations_without_vault_are_no_ops() {
        let vault = PasswordVault::new(MemoryStore::new());

        assert!(!vault.verify_master_password("pw").unwrap());
        assert!(vault.load_credentials("pw").unwrap().is_empty());
        assert!(vault
            .save_credential("pw", NewCredential::login("a", "b", "c"))
            .unwrap()
            .is_none());
        assert!(!vault
            .update_credential("pw", "id", CredentialUpdate::default())
            .unwrap());
        assert!(!vault.delete_credential("id").unwrap());
        assert!(!vault.change_master_password("pw", "new").unwrap());
        assert_eq!(vault.credential_count().unwrap(), 0);
        assert!(!vault.vault_exists().unwrap());
    }

    #[test]
    fn custom_storage_key_is_used() {
        let vault = PasswordVault::with_storage_key(MemoryStore::new(), "profile-2");
        vault.create_vault("pw").unwrap();
        assert!(vault.store().get("profile-2").unwrap().is_some());
        assert!(vault.store().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
