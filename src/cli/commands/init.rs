//! `credvault init` — create a new vault.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, vault_location, Cli, PASSWORD_ENV};
use crate::errors::{Result, VaultError};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (_settings, vault) = open_vault(cli)?;

    if vault.vault_exists()? {
        output::tip("Use `credvault add` to save credentials in the existing vault.");
        return Err(VaultError::VaultAlreadyExists(
            vault_location(&vault).display().to_string(),
        ));
    }

    let password = prompt_new_password(PASSWORD_ENV)?;
    vault.create_vault(&password)?;

    output::success(&format!(
        "Vault created in {}",
        vault_location(&vault).display()
    ));
    output::tip("Run `credvault add <WEBSITE> <USERNAME>` to save a credential.");
    output::tip("Run `credvault generate` to create a strong password.");

    Ok(())
}
