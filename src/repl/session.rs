//! REPL session state and command dispatch.
//!
//! A `Session` owns the operation registry and the single history store.
//! It processes one line at a time and never panics or exits on a bad
//! command: every recoverable error comes back as a `Reply::Error`.

use super::command::{self, Command, COMMAND_WORDS};
use crate::core::{Guard, History, HistoryRecord, State};
use crate::error::CalcError;
use crate::export::{HistorySnapshot, SnapshotFormat};
use crate::operations::{parse_operands, OperationRegistry};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, info};

/// Shortest fraction of a candidate's length a token must cover to be
/// offered as a suggestion.
const SUGGESTION_CUTOFF: f64 = 0.6;

const USAGE_HINT: &str =
    "Usage: <operation> <number> <number> ... | history | last | clear | export <path> | help | exit";

/// Lifecycle of a session.
///
/// `AwaitingInput` and `Running` together make up the live phase; a session
/// is `Running` only while it processes a line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ReplState {
    AwaitingInput,
    Running,
    Terminated,
}

impl State for ReplState {
    fn name(&self) -> &str {
        match self {
            Self::AwaitingInput => "AwaitingInput",
            Self::Running => "Running",
            Self::Terminated => "Terminated",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}

/// What the session has to say about one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Nothing to print
    Silent,
    /// Normal output
    Output(String),
    /// A user-facing error; the session keeps running
    Error(String),
    /// The session has terminated
    Goodbye(String),
}

impl Reply {
    /// Text to show the user, if any.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Silent => None,
            Self::Output(text) | Self::Goodbye(text) => Some(text.clone()),
            Self::Error(text) => Some(format!("Error: {text}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Interactive calculator session.
#[derive(Debug)]
pub struct Session {
    registry: OperationRegistry,
    history: History,
    state: ReplState,
    accepting: Guard<ReplState>,
    history_limit: Option<NonZeroUsize>,
}

impl Session {
    pub fn new(registry: OperationRegistry) -> Self {
        Self {
            registry,
            history: History::new(),
            state: ReplState::AwaitingInput,
            accepting: Guard::accepting_input(),
            history_limit: None,
        }
    }

    /// Show at most `limit` records when listing history.
    pub fn with_history_limit(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_final()
    }

    /// Process one line of input.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if !self.accepting.check(&self.state) {
            return Reply::Error("the session has ended".to_string());
        }

        let command = match command::parse(line, &self.registry) {
            Ok(Command::Empty) => return Reply::Silent,
            Ok(command) => command,
            Err(e) => return self.report(e.into()),
        };

        debug!(?command, "dispatching");
        self.transition(ReplState::Running);
        let reply = self.execute(command);
        if !self.state.is_final() {
            self.transition(ReplState::AwaitingInput);
        }
        reply
    }

    /// End the session, as `exit` or end of input do.
    pub fn terminate(&mut self) -> Reply {
        self.transition(ReplState::Terminated);
        info!(records = self.history.len(), "session terminated");
        Reply::Goodbye("Goodbye!".to_string())
    }

    fn transition(&mut self, next: ReplState) {
        if self.state != next {
            debug!(from = self.state.name(), to = next.name(), "session state change");
            self.state = next;
        }
    }

    fn execute(&mut self, command: Command) -> Reply {
        let outcome = match command {
            Command::Empty => Ok(Reply::Silent),
            Command::Calculate {
                operation,
                operands,
            } => self.calculate(&operation, &operands).map(Reply::Output),
            Command::History { operation } => {
                Ok(Reply::Output(self.render_history(operation.as_deref())))
            }
            Command::Last => Ok(Reply::Output(match self.history.last() {
                Some(record) => record.to_string(),
                None => "History is empty.".to_string(),
            })),
            Command::Clear => {
                self.history.clear();
                Ok(Reply::Output("History cleared.".to_string()))
            }
            Command::Export { path, format } => self.export(&path, format).map(Reply::Output),
            Command::Help => Ok(Reply::Output(self.help())),
            Command::Exit => Ok(self.terminate()),
            Command::Unknown { word } => Ok(self.unknown_command(&word)),
        };

        outcome.unwrap_or_else(|e| self.report(e))
    }

    fn report(&self, error: CalcError) -> Reply {
        info!(error = %error, "command failed");
        Reply::Error(error.to_string())
    }

    fn calculate(&mut self, name: &str, tokens: &[String]) -> Result<String, CalcError> {
        let operands = parse_operands(tokens).map_err(|reason| CalcError::invalid(name, reason))?;
        let result = self.registry.evaluate(name, &operands)?;

        let record = HistoryRecord::new(name, operands, result);
        let line = record.to_string();
        info!(operation = name, result, "calculation succeeded");
        self.history.append(record);
        Ok(line)
    }

    fn render_history(&self, operation: Option<&str>) -> String {
        let records: Vec<&HistoryRecord> = match operation {
            Some(name) => self.history.filter_by_operation(name).collect(),
            None => self.history.list().collect(),
        };

        if records.is_empty() {
            return match operation {
                Some(name) => format!("No {name} calculations in history."),
                None => "History is empty.".to_string(),
            };
        }

        let skip = self
            .history_limit
            .map_or(0, |limit| records.len().saturating_sub(limit.get()));

        let mut out = String::from("Calculation history:");
        if skip > 0 {
            out.push_str(&format!(
                " (showing last {} of {})",
                records.len() - skip,
                records.len()
            ));
        }
        for (i, record) in records.iter().enumerate().skip(skip) {
            out.push_str(&format!(
                "\n{:>4}. {}  [{}]",
                i + 1,
                record,
                record.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        out
    }

    fn export(&self, path: &Path, format: SnapshotFormat) -> Result<String, CalcError> {
        let snapshot = HistorySnapshot::capture(&self.history);
        snapshot.write_to(path, format)?;
        Ok(format!(
            "Exported {} record(s) to {}",
            snapshot.records.len(),
            path.display()
        ))
    }

    fn help(&self) -> String {
        let mut out = String::from(
            "Commands:\n\
             \x20 <operation> <n1> <n2> ...  run an operation\n\
             \x20 history [operation]        list calculations\n\
             \x20 last                       show the most recent calculation\n\
             \x20 clear                      clear the history\n\
             \x20 export <path> [json|bin]   save the history to a file\n\
             \x20 help                       show this message\n\
             \x20 exit | quit                leave the calculator\n\
             Operations:",
        );
        for op in self.registry.operations() {
            out.push_str(&format!(
                "\n  {:<10} {:<22} {}",
                op.name(),
                format!("({} operands)", op.arity()),
                op.summary()
            ));
        }
        out
    }

    fn unknown_command(&self, word: &str) -> Reply {
        info!(command = word, "unknown command");
        match self.suggest(word) {
            Some(candidate) => Reply::Error(format!(
                "unknown command \"{word}\". Did you mean \"{candidate}\"?"
            )),
            None => Reply::Error(format!("unknown command \"{word}\". {USAGE_HINT}")),
        }
    }

    fn suggest(&self, word: &str) -> Option<&'static str> {
        let matcher = SkimMatcherV2::default();
        let typed = word.chars().count() as f64;
        COMMAND_WORDS
            .iter()
            .copied()
            .chain(self.registry.names())
            .filter(|candidate| typed / candidate.chars().count() as f64 >= SUGGESTION_CUTOFF)
            .filter_map(|candidate| {
                matcher
                    .fuzzy_match(candidate, word)
                    .map(|score| (score, candidate))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, candidate)| candidate)
    }
}
