//! `credvault add` — save a new credential.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, require_vault, unlock, Cli};
use crate::errors::{Result, VaultError};
use crate::password::{calculate_password_strength, generate_password};
use crate::vault::{Category, NewCredential};

/// Arguments of the `add` command.
pub struct AddArgs<'a> {
    pub website: &'a str,
    pub username: &'a str,
    pub category: Category,
    pub notes: Option<&'a str>,
    pub favicon: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let (settings, vault) = open_vault(cli)?;
    require_vault(&vault)?;
    let master = unlock(&vault)?;

    let secret = if args.generate {
        zeroize::Zeroizing::new(generate_password(
            settings.generator_length,
            &settings.generator_options(),
        ))
    } else {
        read_secret(&format!("Password for {}@{}", args.username, args.website))?
    };

    let mut credential = NewCredential::login(args.website, args.username, secret.as_str())
        .with_category(args.category);
    if let Some(notes) = args.notes {
        credential = credential.with_notes(notes);
    }
    if let Some(favicon) = args.favicon {
        credential = credential.with_favicon(favicon);
    }
    let credential = credential.with_default_favicon();

    let saved = vault
        .save_credential(&master, credential)?
        .ok_or_else(|| VaultError::CommandFailed("credential was not saved".into()))?;

    output::success(&format!(
        "Saved {}@{} ({} total)",
        saved.username,
        saved.website,
        vault.credential_count()?
    ));
    output::info(&format!("Id: {}", saved.id));
    output::strength(calculate_password_strength(&saved.password));
    if args.generate {
        output::tip("Run `credvault get <ID>` to print the generated password.");
    }

    Ok(())
}
