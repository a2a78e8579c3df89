mod categorizer;
mod cli;
mod db;
mod dedup;
mod error;
mod fmt;
mod models;
mod parser;
mod pipeline;
mod reporter;
mod resolver;
mod settings;
mod store;

use clap::Parser;

use cli::{AccountsCommands, CategoriesCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Accounts { command } => match command {
            AccountsCommands::Add { name } => cli::accounts::add(&name),
            AccountsCommands::List => cli::accounts::list(),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add { name } => cli::categories::add(&name),
            CategoriesCommands::List => cli::categories::list(),
        },
        Commands::Payees => cli::payees::list(),
        Commands::Import { file, month } => cli::import::run(&file, month),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
