use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};
use crate::password::GeneratorOptions;
use crate::vault::DEFAULT_STORAGE_KEY;

/// User-level configuration, loaded from `credvault.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.  The PBKDF2 iteration count is
/// intentionally absent: it is fixed per vault format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where the vault is stored.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Storage key of the vault record inside that directory.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Default length for `generate`.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    #[serde(default = "default_true")]
    pub generator_uppercase: bool,

    #[serde(default = "default_true")]
    pub generator_lowercase: bool,

    #[serde(default = "default_true")]
    pub generator_numbers: bool,

    #[serde(default = "default_true")]
    pub generator_symbols: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".credvault".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_generator_length() -> usize {
    crate::password::DEFAULT_LENGTH
}

fn default_true() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            storage_key: default_storage_key(),
            generator_length: default_generator_length(),
            generator_uppercase: true,
            generator_lowercase: true,
            generator_numbers: true,
            generator_symbols: true,
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = "credvault.toml";

    /// Load settings from `<dir>/credvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.storage_key.is_empty() {
            return Err(VaultError::ConfigError(
                "storage_key cannot be empty".into(),
            ));
        }

        Ok(settings)
    }

    /// Full path of the vault directory for a given working directory.
    pub fn vault_dir_path(&self, base: &Path) -> PathBuf {
        base.join(&self.vault_dir)
    }

    /// Convert the generator settings into generator options.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            uppercase: self.generator_uppercase,
            lowercase: self.generator_lowercase,
            numbers: self.generator_numbers,
            symbols: self.generator_symbols,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".credvault");
        assert_eq!(s.storage_key, "trails_password_vault_v1");
        assert_eq!(s.generator_length, 20);
        assert_eq!(s.generator_options(), GeneratorOptions::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, ".credvault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
storage_key = "work"
generator_length = 32
generator_symbols = false
"#;
        fs::write(tmp.path().join("credvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert_eq!(settings.storage_key, "work");
        assert_eq!(settings.generator_length, 32);
        assert!(!settings.generator_options().symbols);
        assert!(settings.generator_options().uppercase);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("credvault.toml"), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_rejects_empty_storage_key() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("credvault.toml"), "storage_key = \"\"\n").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn vault_dir_path_joins_base() {
        let s = Settings {
            vault_dir: "secrets".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            s.vault_dir_path(Path::new("/home/user")),
            PathBuf::from("/home/user/secrets")
        );
    }
}
