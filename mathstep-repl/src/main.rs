mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs::File, io::{self, BufRead, BufReader, IsTerminal}};
use tracing_subscriber::EnvFilter;

/// Runs a line of input in the session, printing the result or the error.
fn run_line(input: &str, session: &mut Session) {
    if input.trim().is_empty() || input.trim_start().starts_with('#') {
        return;
    }
    match session.execute(input) {
        Ok(out) => print!("{}", out),
        Err(err) => err.report_to_stderr(),
    }
}

/// Runs every line of the given reader in a new session.
fn run_lines(reader: impl BufRead) {
    let mut session = Session::default();
    for line in reader.lines() {
        match line {
            Ok(line) => run_line(&line, &mut session),
            Err(err) => {
                eprintln!("{}", err);
                break;
            },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run commands from a file
        match File::open(&filename) {
            Ok(file) => run_lines(BufReader::new(file)),
            Err(err) => eprintln!("{}: {}", filename, err),
        }
    } else if !io::stdin().is_terminal() {
        // read commands from stdin
        run_lines(io::stdin().lock());
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };
        let mut session = Session::default();

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(&input, session);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
