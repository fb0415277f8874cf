mod cards;
mod catalog;
mod cli;
mod error;
mod fmt;
mod logging;
mod picker;
mod router;
mod settings;
mod tui;
mod wizard;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};
use router::Destination;

fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        None => cli::app::run(None),
        Some(Commands::Book) => cli::app::run(Some(Destination::BookEventFlow)),
        Some(Commands::Themes) => cli::catalog::themes(),
        Some(Commands::Models) => cli::catalog::models(),
        Some(Commands::Packages) => cli::catalog::packages(),
        Some(Commands::Locations { state }) => cli::catalog::locations(state.as_deref()),
        Some(Commands::Config { init }) => cli::config::run(init),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "crewbook", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
