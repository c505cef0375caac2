//! `credvault destroy` — delete the whole vault.

use crate::cli::output;
use crate::cli::{confirm, open_vault, require_vault, vault_location, Cli};
use crate::errors::Result;

/// Execute the `destroy` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let (_settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;

    if !force {
        let count = vault.credential_count()?;
        let prompt = format!(
            "Permanently delete the vault in {} and its {count} credential(s)?",
            vault_location(&vault).display()
        );
        if !confirm(&prompt)? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete_vault()?;
    output::success("Vault deleted.");
    Ok(())
}
