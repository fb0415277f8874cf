pub mod app;
pub mod book;
pub mod catalog;
pub mod config;
pub mod events;
pub mod explore;
pub mod home;
pub mod theme_details;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crewbook", about = "Book hosts, models and uniforms for your event.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the booking flow straight away.
    Book,
    /// List the theme catalog.
    Themes,
    /// List the model catalog.
    Models,
    /// List crew packages and what they include.
    Packages,
    /// List states, or the cities of one state.
    Locations {
        /// State id, e.g. KA
        #[arg(long)]
        state: Option<String>,
    },
    /// Show the active settings.
    Config {
        /// Write a default settings file if none exists
        #[arg(long)]
        init: bool,
    },
    /// Print shell completions.
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}
