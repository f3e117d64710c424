//! lineisam CLI
//!
//! Builds and queries sorted key indexes over line-oriented text files.
//!
//! # Commands
//!
//! - `create` / `-c` - Build an index for a data file
//! - `list` / `-l` - Print the data file in key order
//! - `search` / `-s` - Look up one record by key
//! - `verify` - Check an index against its data file
//!
//! Run without arguments to enter one command at a prompt.

mod cli;
mod commands;
mod interactive;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = match cli.command {
        Some(command) => command,
        None => match interactive::prompt()? {
            Some(command) => command,
            None => return Ok(()),
        },
    };

    run(command)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Create {
            input_file,
            output_file,
            key_length,
            no_mirror,
            sync,
        } => commands::create::run(&input_file, &output_file, key_length, !no_mirror, sync)?,
        Commands::List {
            data_file,
            index_file,
            key_length,
        } => commands::list::run(&data_file, &index_file, key_length)?,
        Commands::Search {
            data_file,
            index_file,
            key_length,
            key_value,
            format,
        } => commands::search::run(&data_file, &index_file, key_length, &key_value, format)?,
        Commands::Verify {
            data_file,
            index_file,
            key_length,
            format,
        } => commands::verify::run(&data_file, &index_file, key_length, format)?,
        Commands::Version => {
            println!("lineisam CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("lineisam core v{}", lineisam_core::VERSION);
        }
    }

    Ok(())
}
