//! Command-line definition.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sorted key indexes over line-oriented text files.
#[derive(Debug, Parser)]
#[command(name = "lineisam")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(global = true, short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build an index for a data file
    #[command(short_flag = 'c')]
    Create {
        /// Data file to index
        input_file: PathBuf,
        /// Index file to write (overwritten)
        output_file: PathBuf,
        /// Number of leading bytes of each line used as its key
        key_length: usize,
        /// Skip the <output_file>-print mirror
        #[arg(long)]
        no_mirror: bool,
        /// Sync the index to disk before exiting
        #[arg(long)]
        sync: bool,
    },

    /// Print every record in key order
    #[command(short_flag = 'l')]
    List {
        /// Data file the index was built from
        data_file: PathBuf,
        /// Index file
        index_file: PathBuf,
        /// Key length the index was built with
        key_length: usize,
    },

    /// Look up one record by key
    #[command(short_flag = 's')]
    Search {
        /// Data file the index was built from
        data_file: PathBuf,
        /// Index file
        index_file: PathBuf,
        /// Key length the index was built with
        key_length: usize,
        /// Key to look up
        key_value: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check an index against its data file
    Verify {
        /// Data file the index was built from
        data_file: PathBuf,
        /// Index file
        index_file: PathBuf,
        /// Key length the index was built with
        key_length: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines
    Text,
    /// A JSON document
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_select_commands() {
        let cli = Cli::try_parse_from(["lineisam", "-c", "in.txt", "out.idx", "6"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Create { key_length: 6, no_mirror: false, .. })
        ));

        let cli = Cli::try_parse_from(["lineisam", "-l", "in.txt", "out.idx", "6"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { key_length: 6, .. })));

        let cli =
            Cli::try_parse_from(["lineisam", "-s", "in.txt", "out.idx", "6", "banana"]).unwrap();
        match cli.command {
            Some(Commands::Search { key_value, format, .. }) => {
                assert_eq!(key_value, "banana");
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn long_names_select_commands() {
        let cli = Cli::try_parse_from([
            "lineisam", "search", "d.txt", "i.idx", "4", "abcd", "--format", "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Search { format: OutputFormat::Json, .. })
        ));
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["lineisam", "-c", "in.txt", "out.idx"]).is_err());
        assert!(Cli::try_parse_from(["lineisam", "-s", "in.txt", "out.idx", "6"]).is_err());
    }

    #[test]
    fn non_numeric_key_length_is_rejected() {
        assert!(Cli::try_parse_from(["lineisam", "-l", "in.txt", "out.idx", "six"]).is_err());
    }

    #[test]
    fn no_arguments_means_interactive() {
        let cli = Cli::try_parse_from(["lineisam"]).unwrap();
        assert!(cli.command.is_none());
    }
}
