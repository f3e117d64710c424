//! One-shot command prompt used when no arguments are given.

use crate::cli::{Cli, Commands};
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead, Write};
use tracing::debug;

const USAGE: &str =
    "Usage: <-flag> <input_file or data file> <output_file or index file> <key_length> <optional: key value>";

/// What a line typed at the prompt turned into.
#[derive(Debug)]
pub enum PromptOutcome {
    /// A command to run.
    Run(Commands),
    /// The first word is not a known command.
    Unrecognized(String),
    /// Nothing was entered.
    Empty,
}

/// Reads one command line from stdin.
///
/// Returns `None` when the line named no known command; the caller then
/// does nothing. Argument errors terminate the process with clap's usage
/// message and a non-zero status.
pub fn prompt() -> Result<Option<Commands>, Box<dyn std::error::Error>> {
    println!();
    println!("Enter command (-c: create index, -l: list records, -s: search): ");
    eprintln!("{USAGE}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    match parse_line(&line) {
        Ok(PromptOutcome::Run(command)) => Ok(Some(command)),
        Ok(PromptOutcome::Unrecognized(word)) => {
            debug!(command = %word, "unrecognized command");
            println!("Invalid command, please try again.");
            Ok(None)
        }
        Ok(PromptOutcome::Empty) => Err(format!("Correct {USAGE}").into()),
        Err(e) => e.exit(),
    }
}

/// Parses a prompt line with the same definition as the command line.
///
/// The command word is matched case-insensitively; file names and keys are
/// kept as typed. Only an unknown command word yields
/// [`PromptOutcome::Unrecognized`]; any other problem is a clap error.
pub fn parse_line(line: &str) -> Result<PromptOutcome, clap::Error> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(PromptOutcome::Empty);
    };

    let command_word = first.to_lowercase();
    if !is_known_word(&command_word) {
        return Ok(PromptOutcome::Unrecognized(first.to_string()));
    }

    let args = ["lineisam", command_word.as_str()].into_iter().chain(words);
    match Cli::try_parse_from(args)? {
        Cli {
            command: Some(command),
            ..
        } => Ok(PromptOutcome::Run(command)),
        Cli { command: None, .. } => Ok(PromptOutcome::Empty),
    }
}

/// Returns true if `word` names a subcommand or a top-level flag.
fn is_known_word(word: &str) -> bool {
    let cli = Cli::command();

    let subcommand = cli.get_subcommands().any(|sub| {
        sub.get_name() == word
            || sub.get_all_aliases().any(|alias| alias == word)
            || flag_matches(word, sub.get_short_flag(), sub.get_long_flag())
    });

    subcommand
        || cli
            .get_arguments()
            .any(|arg| flag_matches(word, arg.get_short(), arg.get_long()))
        || matches!(word, "-h" | "--help" | "--version")
}

fn flag_matches(word: &str, short: Option<char>, long: Option<&str>) -> bool {
    if let Some(long) = long {
        if word.strip_prefix("--") == Some(long) {
            return true;
        }
    }
    match (short, word.strip_prefix('-')) {
        (Some(c), Some(rest)) => rest.len() == c.len_utf8() && rest.starts_with(c),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_search_line() {
        match parse_line("-s fruit.txt fruit.idx 6 banana\n").unwrap() {
            PromptOutcome::Run(Commands::Search {
                key_length,
                key_value,
                ..
            }) => {
                assert_eq!(key_length, 6);
                assert_eq!(key_value, "banana");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn keeps_file_name_case() {
        match parse_line("-c Data.TXT Out.IDX 4").unwrap() {
            PromptOutcome::Run(Commands::Create { input_file, .. }) => {
                assert_eq!(input_file.to_str(), Some("Data.TXT"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn unknown_flag_is_unrecognized() {
        assert!(matches!(
            parse_line("-x a b 3").unwrap(),
            PromptOutcome::Unrecognized(word) if word == "-x"
        ));
        assert!(matches!(
            parse_line("bogus a b 3").unwrap(),
            PromptOutcome::Unrecognized(_)
        ));
    }

    #[test]
    fn short_argument_list_is_usage_error() {
        let err = parse_line("-c a b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn extra_argument_after_known_command_is_usage_error() {
        let err = parse_line("-c a.txt b.idx 3 extra").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn unknown_option_after_known_command_is_usage_error() {
        assert!(parse_line("-s a.txt b.idx 3 key --bogus").is_err());
        assert!(parse_line("list a.txt b.idx 3 -z").is_err());
    }

    #[test]
    fn command_word_is_case_insensitive() {
        assert!(matches!(
            parse_line("-C Data.txt Out.idx 4").unwrap(),
            PromptOutcome::Run(Commands::Create { .. })
        ));
        match parse_line("-S Data.txt Out.idx 4 KeyX").unwrap() {
            PromptOutcome::Run(Commands::Search {
                data_file,
                key_value,
                ..
            }) => {
                assert_eq!(data_file.to_str(), Some("Data.txt"));
                assert_eq!(key_value, "KeyX");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            parse_line("VERIFY d.txt i.idx 2").unwrap(),
            PromptOutcome::Run(Commands::Verify { .. })
        ));
    }

    #[test]
    fn blank_line_is_empty() {
        assert!(matches!(parse_line("   \n").unwrap(), PromptOutcome::Empty));
    }
}
