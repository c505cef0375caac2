//! `credvault generate` — print a random password.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::password::{calculate_password_strength, generate_password};

/// Upper bound on generated length, to catch typos like `-l 2000000`.
const MAX_LENGTH: usize = 4096;

/// Class switches of the `generate` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassFlags {
    pub no_uppercase: bool,
    pub no_lowercase: bool,
    pub no_numbers: bool,
    pub no_symbols: bool,
}

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>, flags: ClassFlags) -> Result<()> {
    let (settings, _vault) = open_vault(cli)?;

    let length = length.unwrap_or(settings.generator_length);
    if length == 0 || length > MAX_LENGTH {
        return Err(VaultError::InvalidInput(format!(
            "length must be between 1 and {MAX_LENGTH}"
        )));
    }

    let mut options = settings.generator_options();
    options.uppercase &= !flags.no_uppercase;
    options.lowercase &= !flags.no_lowercase;
    options.numbers &= !flags.no_numbers;
    options.symbols &= !flags.no_symbols;

    let password = zeroize::Zeroizing::new(generate_password(length, &options));

    println!("{}", password.as_str());
    output::strength(calculate_password_strength(&password));

    Ok(())
}
