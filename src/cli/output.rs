//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::DateTime;
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::password::{strength_label, Strength};
use crate::vault::Credential;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a strength score with its label, coloured by band.
pub fn strength(score: u8) {
    let label = format!("{} ({score}/100)", strength_label(score));
    let styled = match Strength::from_score(score) {
        Strength::VeryWeak => style(label).red().bold(),
        Strength::Weak => style(label).red(),
        Strength::Fair => style(label).yellow(),
        Strength::Strong => style(label).green(),
        Strength::VeryStrong => style(label).green().bold(),
    };
    println!("Strength: {styled}");
}

/// Format epoch milliseconds for display.
pub fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Print a table of credentials.  Passwords are masked unless `show`.
pub fn print_credentials_table(credentials: &[Credential], show: bool) {
    if credentials.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `credvault add <WEBSITE> <USERNAME>` to save your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Website", "Username", "Password", "Category", "Updated",
    ]);

    for c in credentials {
        let password = if show {
            c.password.clone()
        } else if c.password.is_empty() {
            String::new()
        } else {
            "\u{2022}".repeat(8)
        };

        table.add_row(vec![
            c.id.clone(),
            c.website.clone(),
            c.username.clone(),
            password,
            c.category.to_string(),
            format_millis(c.updated_at),
        ]);
    }

    println!("{table}");
}
