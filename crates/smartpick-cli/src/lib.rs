pub mod cli;
pub mod commands;
pub mod logging;
pub mod server;

#[cfg(test)]
pub mod test_util;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

use smartpick_lib::output::ConsoleIO;
use smartpick_lib::runtime::Runtime;

use cli::{Cli, Command};

/// Main CLI entry point. Parses args and dispatches to the appropriate command.
///
/// `train` works from the dataset alone; every other command loads the
/// dataset and the trained model once before it starts.
pub fn try_run<IN, OUT, ERR>(
    args: &[&str],
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;
    let paths = cli.paths;

    match cli.command {
        Command::Train {
            classifier,
            classifier_path,
        } => commands::train::run_train(
            &paths,
            classifier.then_some(classifier_path.as_path()),
            io,
        ),
        Command::Ask { query, top_n } => {
            let runtime = Runtime::load(&paths.dataset, &paths.model)?;
            commands::ask::run_ask(&query.join(" "), top_n, &runtime, io)
        }
        Command::Chat { top_n } => {
            let runtime = Runtime::load(&paths.dataset, &paths.model)?;
            commands::chat::run_chat(top_n, &runtime, io)
        }
        Command::Serve { bind } => {
            let runtime = Runtime::load(&paths.dataset, &paths.model)?;
            commands::serve::run_serve(bind, runtime, io)
        }
    }
}

/// Print `err` and pick the process exit code.
///
/// Help and version requests from clap exit through clap itself so they keep
/// its formatting and exit status.
pub fn report_error(err: &anyhow::Error) -> ExitCode {
    if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
        clap_err.exit();
    }
    eprintln!("Error: {err:#}");
    ExitCode::FAILURE
}
