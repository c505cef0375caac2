//! The derived vault key.

use zeroize::Zeroize;

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// A 256-bit AES key derived from the master password.
///
/// The bytes are wiped when the value is dropped, so a key never
/// outlives the operation that derived it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(..)")
    }
}
