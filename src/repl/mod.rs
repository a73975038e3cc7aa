//! The read-eval-print loop.
//!
//! [`Session`] holds all the state and decides what each line means.
//! [`Repl`] drives a session from an interactive line editor, and [`drive`]
//! drives one from any buffered reader, which is how piped input and the
//! tests run it.

mod command;
mod session;

pub use command::{parse, Command, COMMAND_WORDS};
pub use session::{ReplState, Reply, Session};

use crate::error::StartupError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, Write};
use tracing::{error, info};

pub const PROMPT: &str = "abacus> ";

const BANNER: &str = "abacus calculator. Type 'help' for commands, 'exit' to quit.";
const INTERRUPT_HINT: &str = "Use 'exit' or Ctrl-D to quit.";

/// Interactive loop on top of a line editor.
pub struct Repl {
    editor: DefaultEditor,
    session: Session,
}

impl Repl {
    pub fn new(session: Session) -> Result<Self, StartupError> {
        let editor = DefaultEditor::new()?;
        Ok(Self { editor, session })
    }

    /// Read and evaluate lines until the session terminates.
    pub fn run(&mut self) {
        println!("{BANNER}");
        info!("interactive session started");

        while !self.session.is_terminated() {
            let reply = match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    self.session.handle_line(&line)
                }
                Err(ReadlineError::Interrupted) => Reply::Output(INTERRUPT_HINT.to_string()),
                Err(ReadlineError::Eof) => self.session.terminate(),
                Err(e) => {
                    error!(error = %e, "failed to read input");
                    self.session.terminate()
                }
            };

            if let Some(text) = reply.render() {
                println!("{text}");
            }
        }
    }
}

/// Feed every line of `input` to `session`, writing replies to `output`.
///
/// Stops early when the session terminates. End of input terminates a
/// session that is still live. A line that is not valid UTF-8 is reported
/// like any other bad command and skipped.
pub fn drive<R, W>(session: &mut Session, mut input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => session.handle_line(line.trim_end_matches(['\n', '\r'])),
            Err(e) => {
                info!(error = %e, "skipping input line");
                Reply::Error("input is not valid UTF-8".to_string())
            }
        };
        if let Some(text) = reply.render() {
            writeln!(output, "{text}")?;
        }
        if session.is_terminated() {
            return Ok(());
        }
    }

    if let Some(text) = session.terminate().render() {
        writeln!(output, "{text}")?;
    }
    Ok(())
}
