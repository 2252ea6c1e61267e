#![forbid(unsafe_code)]

//! fpick binary entry point.

use std::io::{self, Write};
use std::process;

use fpick::app::EXIT_ERROR;
use fpick::cli::{self, Command, Opts};
use fpick::{Outcome, logging};

fn main() {
    let opts = match Opts::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Command::Version) => {
            println!("fpick {}", cli::VERSION);
            return;
        }
        Err(err) => {
            eprintln!("fpick: {err}");
            eprintln!("Run with --help for usage information.");
            process::exit(EXIT_ERROR);
        }
    };

    if let Err(err) = logging::init() {
        eprintln!("fpick: logging disabled: {err}");
    }

    let outcome = match fpick::execute(&opts) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(%err, "run failed");
            eprintln!("fpick: {err}");
            process::exit(EXIT_ERROR);
        }
    };

    if let Outcome::Selected(line) = &outcome {
        let mut stdout = io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            eprintln!("fpick: cannot write selection: {err}");
            process::exit(EXIT_ERROR);
        }
    }
    process::exit(outcome.exit_code());
}
