use thiserror::Error;

/// All errors that can occur in CredVault.
///
/// "Vault not found" and "wrong master password" are deliberately absent:
/// both are expected conditions and surface as `false`, `None` or an empty
/// list from the vault API.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Input errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault already exists under storage key '{0}'")]
    VaultAlreadyExists(String),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Unsupported vault version {0}")]
    UnsupportedVersion(u64),

    #[error("Master password change aborted: {0}")]
    RekeyAborted(String),

    // --- Persistence errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl VaultError {
    /// Returns `true` for failures of the underlying storage, as opposed
    /// to input, format or crypto problems.
    ///
    /// Front-ends use this to tell "we couldn't save" apart from
    /// everything else.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_))
    }
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
