//! `credvault list` — display all credentials in a table.

use crate::cli::output;
use crate::cli::{open_vault, require_vault, unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, show: bool, search: Option<&str>) -> Result<()> {
    let (_settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;
    let master = unlock(&vault)?;

    let mut credentials = vault.load_credentials(&master)?;
    let total = credentials.len();

    match search {
        Some(query) => {
            credentials.retain(|c| c.matches_search(query));
            output::info(&format!(
                "{} of {total} credential(s) match '{query}'",
                credentials.len()
            ));
        }
        None => output::info(&format!("{total} credential(s)")),
    }
    output::print_credentials_table(&credentials, show);

    Ok(())
}
