//! # startwork
//!
//! Create a `go.work` file containing every Go module under the current
//! working directory.
//!
//! ## Usage
//!
//! ```bash
//! # Write go.work for all modules below the current directory
//! startwork
//!
//! # Same, logging each discovered module to stderr
//! startwork -vv
//! ```
//!
//! `--help` prints the usage text and then carries on with the normal run.
//! An existing `go.work` is never modified: the run stops with exit status 1.

use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use console::Style;
use startworklib::{start_work, StartworkOptions};
use tracing::debug;

const LONG_ABOUT: &str = "\
startwork creates a go.work file containing all the modules under
the current working directory. It expects there to not already be a go.work
file contained in the current working directory. (A future version may
support adding the modules under the current working directory to an
already existing go.work file.) It's intended to help easily set up a
go.work file for many modules, or to create a workspace similar to what
GOPATH mode provided.";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("startwork")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create a go.work file for every Go module under the current directory")
        .long_about(LONG_ABOUT)
        // --help is handled by hand: it prints usage but does not stop the run
        .disable_help_flag(true)
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Print help (the go.work file is still created)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (repeat for more detail)"),
        )
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = format!("startwork={level},startworklib={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run() -> Result<(), anyhow::Error> {
    let result = start_work(&StartworkOptions::new())?;

    for skipped in &result.skipped {
        debug!(path = ?skipped.path, reason = %skipped.reason, "skipped");
    }

    Ok(())
}

fn main() -> ExitCode {
    let mut cmd = build_command();
    let matches = cmd.get_matches_mut();

    init_tracing(matches.get_count("verbose"));

    if matches.get_flag("help") {
        println!("{}", cmd.render_long_help());
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let prefix = Style::new().for_stderr().red().bold().apply_to("Error:");
            eprintln!("{prefix} {e}");
            ExitCode::FAILURE
        }
    }
}
