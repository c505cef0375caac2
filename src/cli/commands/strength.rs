//! `credvault strength` — score a password.

use crate::cli::output;
use crate::cli::{read_secret, Cli};
use crate::errors::Result;
use crate::password::calculate_password_strength;

/// Execute the `strength` command.
pub fn execute(_cli: &Cli, password: Option<&str>) -> Result<()> {
    let score = match password {
        Some(p) => {
            output::warning("Password provided on command line; it may appear in shell history.");
            calculate_password_strength(p)
        }
        None => calculate_password_strength(&read_secret("Password to score")?),
    };

    output::strength(score);
    Ok(())
}
