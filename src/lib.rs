use crate::cli::{Args, Process};
use crate::helpers::fmt_error;
use clap::{Command, CommandFactory, Parser};
use clap_complete::{Generator, generate};
use std::io;
use tracing::{Level, debug, warn};

pub mod cli;
pub mod command;
pub mod errors;
pub mod helpers;
pub mod input;
pub mod inventory;
pub mod menu;
pub mod purge;
pub mod repl;
pub mod s3;
pub mod session;
pub mod storage;

pub fn print_completions<G: Generator>(
    generator: G,
    cmd: &mut Command,
) {
    // get_name returns a str, to_owned = to_string (but restriction::str_to_string)
    generate(generator, cmd, cmd.get_name().to_owned(), &mut io::stdout());
}

const fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbosity))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn async_main_rs() -> anyhow::Result<i32> {
    // before parsing, so `.env` can provide BUCKET_UTIL_EXCLUDE and the AWS_* variables:
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();

    if let Some(generator) = args.generator {
        let mut cmd = Args::command();

        print_completions(generator, &mut cmd);
        return Ok(0);
    }

    init_logging(args.verbose);
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable .env"),
    }

    args.process().await
}

/// Run the tool and return the process exit code.
pub async fn main_rs() -> i32 {
    async_main_rs().await.unwrap_or_else(|err| {
        eprintln!("{}", fmt_error(&err));
        1
    })
}
