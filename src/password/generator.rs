//! Random password generation.
//!
//! Characters are drawn from the OS-seeded thread CSPRNG (`rand::rng`),
//! never from a non-cryptographic generator.

use rand::RngCore;

/// Length used when the caller has no preference.
pub const DEFAULT_LENGTH: usize = 20;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Pool used when every class is disabled.
const FALLBACK_POOL: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Which character classes to draw from.  All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl GeneratorOptions {
    /// The character pool for these options, in a fixed class order.
    ///
    /// Never empty: with every class disabled this is the alphanumeric
    /// fallback pool.
    pub fn pool(&self) -> Vec<u8> {
        let mut pool = Vec::with_capacity(90);
        if self.uppercase {
            pool.extend_from_slice(UPPERCASE.as_bytes());
        }
        if self.lowercase {
            pool.extend_from_slice(LOWERCASE.as_bytes());
        }
        if self.numbers {
            pool.extend_from_slice(NUMBERS.as_bytes());
        }
        if self.symbols {
            pool.extend_from_slice(SYMBOLS.as_bytes());
        }

        if pool.is_empty() {
            pool.extend_from_slice(FALLBACK_POOL.as_bytes());
        }
        pool
    }
}

/// Generate a `length`-character password.
///
/// Each character is an independent 32-bit random draw reduced modulo
/// the pool size.
pub fn generate_password(length: usize, options: &GeneratorOptions) -> String {
    let pool = options.pool();
    let pool_len = pool.len() as u64;
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let index = u64::from(rng.next_u32()) % pool_len;
            // The pool is ASCII only, so every byte is a full char.
            char::from(pool[index as usize])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_follows_options() {
        let only_digits = GeneratorOptions {
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };
        assert_eq!(only_digits.pool(), NUMBERS.as_bytes());

        let all = GeneratorOptions::default().pool();
        assert_eq!(
            all.len(),
            UPPERCASE.len() + LOWERCASE.len() + NUMBERS.len() + SYMBOLS.len()
        );
    }

    #[test]
    fn empty_selection_falls_back_to_alphanumeric() {
        let none = GeneratorOptions {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
        };
        assert_eq!(none.pool(), FALLBACK_POOL.as_bytes());
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_password(0, &GeneratorOptions::default()), "");
    }
}
