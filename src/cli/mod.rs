//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::{Zeroize, Zeroizing};

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::password::{calculate_password_strength, strength_label};
use crate::storage::FileStore;
use crate::vault::{Category, PasswordVault};

/// Minimum length for a new master password chosen at the prompt.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable read for the master password in scripted use.
pub const PASSWORD_ENV: &str = "CREDVAULT_PASSWORD";

/// Environment variable read for the replacement password by `passwd`.
pub const NEW_PASSWORD_ENV: &str = "CREDVAULT_NEW_PASSWORD";

/// CredVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Local encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .credvault, or `vault_dir` from credvault.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault protected by a master password
    Init,

    /// Save a new credential
    Add {
        /// Website or label (e.g. github.com)
        website: String,
        /// Username or login
        username: String,
        /// Credential category: login, note, or card
        #[arg(short, long, default_value = "login")]
        category: Category,
        /// Free-form notes (stored encrypted)
        #[arg(long)]
        notes: Option<String>,
        /// Icon URL (default: derived from the website)
        #[arg(long)]
        favicon: Option<String>,
        /// Generate a random password instead of prompting for one
        #[arg(short, long)]
        generate: bool,
    },

    /// List all credentials
    List {
        /// Show decrypted passwords in the table
        #[arg(long)]
        show: bool,
        /// Only show credentials whose website or username contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print a credential's password
    Get {
        /// Credential id (see `credvault list`)
        id: String,
    },

    /// Change fields of an existing credential
    Edit {
        /// Credential id
        id: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the notes field
        #[arg(long)]
        clear_notes: bool,
        #[arg(short, long)]
        category: Option<Category>,
        /// New icon URL
        #[arg(long, conflicts_with = "clear_favicon")]
        favicon: Option<String>,
        /// Remove the icon URL
        #[arg(long)]
        clear_favicon: bool,
    },

    /// Delete a credential
    Remove {
        /// Credential id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault's master password
    Passwd,

    /// Generate a random password
    Generate {
        /// Password length (default: 20, or `generator_length` from credvault.toml)
        #[arg(short, long)]
        length: Option<usize>,
        #[arg(long)]
        no_uppercase: bool,
        #[arg(long)]
        no_lowercase: bool,
        #[arg(long)]
        no_numbers: bool,
        #[arg(long)]
        no_symbols: bool,
    },

    /// Score a password's strength (prompts if omitted)
    Strength {
        password: Option<String>,
    },

    /// Permanently delete the vault and every credential in it
    Destroy {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the working directory, apply CLI overrides, and
/// open the vault over a `FileStore`.
pub fn open_vault(cli: &Cli) -> Result<(Settings, PasswordVault<FileStore>)> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.vault_dir {
        settings.vault_dir.clone_from(dir);
    }

    let store = FileStore::new(settings.vault_dir_path(&cwd));
    let vault = PasswordVault::with_storage_key(store, settings.storage_key.clone());
    Ok((settings, vault))
}

/// Directory the vault lives in, for messages.
pub fn vault_location(vault: &PasswordVault<FileStore>) -> PathBuf {
    vault.store().dir().to_path_buf()
}

/// Fail with a hint if there is no vault yet.
pub fn require_vault(vault: &PasswordVault<FileStore>) -> Result<()> {
    if vault.vault_exists()? {
        return Ok(());
    }
    output::tip("Run `credvault init` to create a vault.");
    Err(VaultError::CommandFailed(format!(
        "no vault found in {}",
        vault_location(vault).display()
    )))
}

/// Get the master password, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for the master password and check it against the vault.
pub fn unlock(vault: &PasswordVault<FileStore>) -> Result<Zeroizing<String>> {
    let password = prompt_master_password()?;
    if !vault.verify_master_password(&password)? {
        return Err(VaultError::CommandFailed("wrong master password".into()));
    }
    Ok(password)
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `CREDVAULT_PASSWORD` for scripted use (`env_var` lets
/// `passwd` read the new password from a different variable).
/// Enforces a minimum length and reports the strength.
pub fn prompt_new_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSWORD_LEN {
                return Err(VaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        let score = calculate_password_strength(&password);
        output::info(&format!("Strength: {} ({score}/100)", strength_label(score)));

        return Ok(Zeroizing::new(password));
    }
}

/// Read a secret value from piped stdin, or prompt for it on a terminal.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let value = buf.trim_end_matches(['\r', '\n']).to_string();
        buf.zeroize();
        return Ok(Zeroizing::new(value));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Ask for a yes/no confirmation, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
}
