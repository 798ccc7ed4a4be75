use std::io::{BufRead, Write};

use smartpick_lib::output::ConsoleIO;
use smartpick_lib::runtime::Runtime;

/// Run the `smartpick ask` command.
pub fn run_ask<IN, OUT, ERR>(
    query: &str,
    top_n: usize,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let recommendation = runtime.recommend(query, top_n);
    write!(io.stdout(), "{recommendation}")?;
    Ok(())
}
