use abacus::cli::Args;
use abacus::logging;
use abacus::repl::{self, Repl, Session};
use abacus::OperationRegistry;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.config();

    // Held until exit so the file sink flushes.
    let _log_guard = logging::init(&config.log).context("Failed to initialize logging")?;
    info!(?config, "starting abacus");

    let session =
        Session::new(OperationRegistry::standard()).with_history_limit(config.history_limit);

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let mut repl = Repl::new(session).context("Failed to start the REPL")?;
        repl.run();
    } else {
        let mut session = session;
        repl::drive(&mut session, stdin.lock(), &mut io::stdout().lock())
            .context("Failed to read input")?;
    }

    info!("abacus exited");
    Ok(())
}
