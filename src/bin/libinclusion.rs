//! libinclusion - language inclusion between finite automata.
//!
//! Usage: `libinclusion <file_A> <file_B>`. Exit code 0 on success, 1 on a
//! usage error, 2 on an internal error.

use clap::Parser;
use colored::Colorize;
use libinclusion::cli::{self, Cli};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; they are not usage errors
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::run(cli) {
        eprintln!("{}: {err:#}", "error".red().bold());
        process::exit(2);
    }
}
