//! Command parsing for the REPL.

use crate::error::ParseError;
use crate::export::SnapshotFormat;
use crate::operations::OperationRegistry;
use std::path::PathBuf;

/// Command words recognized besides operation names.
pub const COMMAND_WORDS: [&str; 7] = ["history", "last", "clear", "export", "help", "exit", "quit"];

const HISTORY_USAGE: &str = "history [operation]";
const EXPORT_USAGE: &str = "export <path> [json|bin]";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blank or whitespace-only input
    Empty,
    /// Run an operation over raw operand tokens
    Calculate {
        operation: String,
        operands: Vec<String>,
    },
    /// List history, optionally only one operation's records
    History { operation: Option<String> },
    /// Show the most recent record
    Last,
    /// Clear the history
    Clear,
    /// Write a history snapshot to a file
    Export { path: PathBuf, format: SnapshotFormat },
    /// Show help
    Help,
    /// Leave the REPL
    Exit,
    /// Anything unrecognized
    Unknown { word: String },
}

/// Parse one input line.
///
/// Command words and operation names are case-insensitive. Operand tokens
/// are kept verbatim; turning them into numbers is the operation's job.
pub fn parse(line: &str, registry: &OperationRegistry) -> Result<Command, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((first, args)) = parts.split_first() else {
        return Ok(Command::Empty);
    };
    let word = first.to_lowercase();

    match word.as_str() {
        "history" => parse_history(args),
        "last" => no_args(args, "last").map(|_| Command::Last),
        "clear" => no_args(args, "clear").map(|_| Command::Clear),
        "export" => parse_export(args),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" => no_args(args, "exit").map(|_| Command::Exit),
        name if registry.contains(name) => Ok(Command::Calculate {
            operation: name.to_string(),
            operands: args.iter().map(|s| s.to_string()).collect(),
        }),
        other => Ok(Command::Unknown {
            word: other.to_string(),
        }),
    }
}

fn no_args(args: &[&str], usage: &'static str) -> Result<(), ParseError> {
    match args.first() {
        Some(extra) => Err(ParseError::UnexpectedArgument {
            argument: extra.to_string(),
            usage,
        }),
        None => Ok(()),
    }
}

fn parse_history(args: &[&str]) -> Result<Command, ParseError> {
    match args {
        [] => Ok(Command::History { operation: None }),
        [operation] => Ok(Command::History {
            operation: Some(operation.to_lowercase()),
        }),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument {
            argument: extra.to_string(),
            usage: HISTORY_USAGE,
        }),
    }
}

fn parse_export(args: &[&str]) -> Result<Command, ParseError> {
    match args {
        [] => Err(ParseError::MissingArgument {
            argument: "path",
            usage: EXPORT_USAGE,
        }),
        [path] => {
            let path = PathBuf::from(*path);
            let format = SnapshotFormat::from_path(&path);
            Ok(Command::Export { path, format })
        }
        [path, format] => Ok(Command::Export {
            path: PathBuf::from(*path),
            format: format.parse()?,
        }),
        [_, _, extra, ..] => Err(ParseError::UnexpectedArgument {
            argument: extra.to_string(),
            usage: EXPORT_USAGE,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_line(line: &str) -> Result<Command, ParseError> {
        parse(line, &OperationRegistry::standard())
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(parse_line(""), Ok(Command::Empty));
        assert_eq!(parse_line("   \t "), Ok(Command::Empty));
    }

    #[test]
    fn operation_keeps_raw_operands() {
        assert_eq!(
            parse_line("ADD 1 2.5 x"),
            Ok(Command::Calculate {
                operation: "add".into(),
                operands: vec!["1".into(), "2.5".into(), "x".into()],
            })
        );
    }

    #[test]
    fn history_accepts_optional_filter() {
        assert_eq!(
            parse_line("history"),
            Ok(Command::History { operation: None })
        );
        assert_eq!(
            parse_line("history Mean"),
            Ok(Command::History {
                operation: Some("mean".into())
            })
        );
        assert!(matches!(
            parse_line("history add mean"),
            Err(ParseError::UnexpectedArgument { .. })
        ));
    }

    #[test]
    fn exit_words_are_recognized() {
        assert_eq!(parse_line("exit"), Ok(Command::Exit));
        assert_eq!(parse_line("QUIT"), Ok(Command::Exit));
        assert!(parse_line("exit now").is_err());
    }

    #[test]
    fn export_infers_or_parses_format() {
        assert_eq!(
            parse_line("export out.bin"),
            Ok(Command::Export {
                path: PathBuf::from("out.bin"),
                format: SnapshotFormat::Binary,
            })
        );
        assert_eq!(
            parse_line("export out.dat json"),
            Ok(Command::Export {
                path: PathBuf::from("out.dat"),
                format: SnapshotFormat::Json,
            })
        );
        assert_eq!(
            parse_line("export out.dat xml"),
            Err(ParseError::UnknownFormat("xml".into()))
        );
        assert!(matches!(
            parse_line("export"),
            Err(ParseError::MissingArgument { argument: "path", .. })
        ));
    }

    #[test]
    fn unrecognized_word_is_unknown() {
        assert_eq!(
            parse_line("foo 1 2"),
            Ok(Command::Unknown { word: "foo".into() })
        );
    }
}
