use clap::Parser;
use credvault::cli::commands::{add::AddArgs, edit::EditArgs, generate::ClassFlags};
use credvault::cli::{Cli, Commands};

fn main() {
    credvault::logging::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => credvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref website,
            ref username,
            category,
            ref notes,
            ref favicon,
            generate,
        } => {
            let args = AddArgs {
                website,
                username,
                category,
                notes: notes.as_deref(),
                favicon: favicon.as_deref(),
                generate,
            };
            credvault::cli::commands::add::execute(&cli, &args)
        }
        Commands::List { show, ref search } => {
            credvault::cli::commands::list::execute(&cli, show, search.as_deref())
        }
        Commands::Get { ref id } => credvault::cli::commands::get::execute(&cli, id),
        Commands::Edit {
            ref id,
            ref website,
            ref username,
            password,
            ref notes,
            clear_notes,
            category,
            ref favicon,
            clear_favicon,
        } => {
            let args = EditArgs {
                id,
                website: website.as_deref(),
                username: username.as_deref(),
                password,
                notes: notes.as_deref(),
                clear_notes,
                category,
                favicon: favicon.as_deref(),
                clear_favicon,
            };
            credvault::cli::commands::edit::execute(&cli, &args)
        }
        Commands::Remove { ref id, force } => {
            credvault::cli::commands::remove::execute(&cli, id, force)
        }
        Commands::Passwd => credvault::cli::commands::passwd::execute(&cli),
        Commands::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_numbers,
            no_symbols,
        } => {
            let flags = ClassFlags {
                no_uppercase,
                no_lowercase,
                no_numbers,
                no_symbols,
            };
            credvault::cli::commands::generate::execute(&cli, length, flags)
        }
        Commands::Strength { ref password } => {
            credvault::cli::commands::strength::execute(&cli, password.as_deref())
        }
        Commands::Destroy { force } => credvault::cli::commands::destroy::execute(&cli, force),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
