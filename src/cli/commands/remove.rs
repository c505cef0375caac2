//! `credvault remove` — delete a credential.

use crate::cli::output;
use crate::cli::{confirm, open_vault, require_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `remove` command.
///
/// No master password is needed: the entry is removed without being
/// decrypted.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let (_settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;

    if !force && !confirm(&format!("Delete credential '{id}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    if !vault.delete_credential(id)? {
        return Err(VaultError::CommandFailed(format!(
            "no credential with id '{id}'"
        )));
    }

    output::success(&format!(
        "Deleted credential '{id}' ({} left)",
        vault.credential_count()?
    ));
    Ok(())
}
