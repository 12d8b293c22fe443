use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use wisp::ReplSession;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        return run_file(&args[1]);
    }

    run_interactive();
    ExitCode::SUCCESS
}

/// Non-interactive mode: read `path`, feed it to the interpreter one line
/// at a time (the language has no multi-line grouping construct), printing
/// each result or error to stdout in the same form the interactive loop
/// would. Exits with a failure status if any line errors.
fn run_file(path: &str) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("Error reading {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = ReplSession::new();
    let mut saw_error = false;
    for line in source.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match session.run(line) {
            Ok(text) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            Err(err) => {
                println!("{}: {err}", err.category());
                saw_error = true;
            }
        }
    }

    if saw_error { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Interactive mode: `>>> ` prompt, one line per input, printed result or
/// category-prefixed error, until EOF.
fn run_interactive() {
    let mut session = ReplSession::new();
    let stdin = io::stdin();

    loop {
        print!(">>> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line);
        match read {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        match session.run(line) {
            Ok(text) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            Err(err) => println!("{}: {err}", err.category()),
        }
    }
}
