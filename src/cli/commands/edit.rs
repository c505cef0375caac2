//! `credvault edit` — change fields of an existing credential.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, require_vault, unlock, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::{Category, CredentialUpdate};

/// Arguments of the `edit` command.
pub struct EditArgs<'a> {
    pub id: &'a str,
    pub website: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: bool,
    pub notes: Option<&'a str>,
    pub clear_notes: bool,
    pub category: Option<Category>,
    pub favicon: Option<&'a str>,
    pub clear_favicon: bool,
}

impl EditArgs<'_> {
    fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.username.is_none()
            && !self.password
            && self.notes.is_none()
            && !self.clear_notes
            && self.category.is_none()
            && self.favicon.is_none()
            && !self.clear_favicon
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, args: &EditArgs<'_>) -> Result<()> {
    if args.is_empty() {
        output::tip(
            "Pass at least one of --website, --username, --password, --notes, \
             --clear-notes, --category, --favicon, --clear-favicon.",
        );
        return Err(VaultError::CommandFailed("nothing to change".into()));
    }

    let (_settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;
    let master = unlock(&vault)?;

    let password = if args.password {
        Some(read_secret("New password")?)
    } else {
        None
    };

    let notes = if args.clear_notes {
        Some(None)
    } else {
        args.notes.map(|n| Some(n.to_string()))
    };

    let favicon = if args.clear_favicon {
        Some(None)
    } else {
        args.favicon.map(|f| Some(f.to_string()))
    };

    let update = CredentialUpdate {
        website: args.website.map(str::to_string),
        username: args.username.map(str::to_string),
        password: password.as_ref().map(|p| p.as_str().to_owned()),
        notes,
        category: args.category,
        favicon,
    };

    if !vault.update_credential(&master, args.id, update)? {
        return Err(VaultError::CommandFailed(format!(
            "no credential with id '{}'",
            args.id
        )));
    }

    output::success(&format!("Updated credential {}", args.id));
    Ok(())
}
