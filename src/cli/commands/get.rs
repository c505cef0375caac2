//! `credvault get` — print a single credential's password.

use crate::cli::{open_vault, require_vault, unlock, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let (_settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;
    let master = unlock(&vault)?;

    let credential = vault
        .find_credential(&master, id)?
        .ok_or_else(|| VaultError::CommandFailed(format!("no credential with id '{id}'")))?;

    // Plain stdout so the value can be piped.
    println!("{}", credential.password);

    Ok(())
}
