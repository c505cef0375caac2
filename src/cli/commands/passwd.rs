//! `credvault passwd` — change the vault master password.
//!
//! Every credential is decrypted with the old password and re-encrypted
//! under a key derived from the new one, with a fresh salt.  The vault is
//! written once, at the end.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, require_vault, unlock, Cli, NEW_PASSWORD_ENV};
use crate::errors::{Result, VaultError};

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (_settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;

    output::info("Enter your current master password.");
    let old_password = unlock(&vault)?;

    output::info("Choose your new master password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV)?;

    if !vault.change_master_password(&old_password, &new_password)? {
        return Err(VaultError::CommandFailed(
            "master password was not changed".into(),
        ));
    }

    output::success(&format!(
        "Master password changed ({} credential(s) re-encrypted)",
        vault.credential_count()?
    ));
    Ok(())
}
