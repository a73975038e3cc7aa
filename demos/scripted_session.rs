//! Scripted Session
//!
//! This example drives a calculator session from an in-memory script, the
//! same way piped stdin is handled by the binary.
//!
//! Key concepts:
//! - A `Session` is driven line by line without a terminal
//! - Bad commands are reported inline and the session keeps going
//! - The history only grows on successful calculations
//! - Exporting a snapshot and reading it back
//!
//! Run with: cargo run --example scripted_session

use abacus::repl::drive;
use abacus::{HistorySnapshot, OperationRegistry, Session, SnapshotFormat};
use std::io;

fn main() -> io::Result<()> {
    println!("=== Scripted Session Example ===\n");

    let mut session = Session::new(OperationRegistry::standard());
    let operations: Vec<&str> = session.registry().names().collect();
    println!("Operations: {}\n", operations.join(", "));

    let export_path = std::env::temp_dir().join("abacus-scripted-session.json");
    let script = format!(
        "add 0.1 0.2\n\
         mean 2 4 9\n\
         divide 1 0\n\
         ad 1 2\n\
         stdev 2 4 4 4 5 5 7 9\n\
         history\n\
         export {}\n\
         exit\n",
        export_path.display()
    );

    let stdout = io::stdout();
    drive(&mut session, script.as_bytes(), &mut stdout.lock())?;

    println!("\nSession state: {:?}", session.state());
    println!("Records kept: {}", session.history().len());

    match HistorySnapshot::read_from(&export_path, SnapshotFormat::Json) {
        Ok(snapshot) => println!(
            "Snapshot v{} holds {} record(s)",
            snapshot.version,
            snapshot.records.len()
        ),
        Err(e) => println!("Could not read snapshot back: {e}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
