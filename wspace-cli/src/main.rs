//! Whitespace CLI: run, check, assemble, and convert programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/usage/assembly error
//! - 2: Decode or label error found before execution
//! - 3: Runtime error

mod commands;

use std::process;

use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "assemble" => commands::assemble(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "stn" => commands::stn(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Log to stderr so stdout carries only program output. `RUST_LOG`
/// overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: wspace <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog.ws> [--input FILE | --stdin] [--max-steps N]  Execute a program");
    eprintln!("  check <prog.ws>                         Decode and collect labels only");
    eprintln!("  assemble <input.wsa> [-o output.ws]     Assemble mnemonics to whitespace");
    eprintln!("  disassemble <prog.ws>                   Disassemble whitespace to mnemonics");
    eprintln!("  stn <input.stn> [-o output.ws]          Convert S/T/N letters to whitespace");
}
