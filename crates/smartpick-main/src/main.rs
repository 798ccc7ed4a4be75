use std::process::ExitCode;

use smartpick_lib::output::StdIO;

fn main() -> ExitCode {
    smartpick_cli::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut io = StdIO::new();

    match smartpick_cli::try_run(&args, &mut io) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => smartpick_cli::report_error(&err),
    }
}
