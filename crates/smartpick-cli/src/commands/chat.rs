use std::io::{BufRead, Write};

use smartpick_lib::output::ConsoleIO;
use smartpick_lib::runtime::Runtime;
use tracing::debug;

const BANNER: &str = "SmartPick - ask me about phones! (type 'exit' to quit)";

/// Run the `smartpick chat` loop until `exit`, `quit` or end of input.
pub fn run_chat<IN, OUT, ERR>(
    top_n: usize,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    writeln!(io.stdout(), "{BANNER}")?;

    loop {
        write!(io.stdout(), "\nYour query: ")?;
        io.stdout().flush()?;

        let Some(line) = io.read_line()? else {
            writeln!(io.stdout())?;
            break;
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        debug!(query, "Chat query");
        let recommendation = runtime.recommend(query, top_n);
        write!(io.stdout(), "\nTop results:\n\n{recommendation}")?;
    }

    writeln!(io.stdout(), "Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use smartpick_lib::output::BufferedIO;

    use super::*;
    use crate::test_util::{runtime_from_rows, samsung_and_apple};

    #[test]
    fn chat_answers_until_exit() {
        let runtime = runtime_from_rows(&samsung_and_apple());
        let mut io = BufferedIO::with_stdin("apple under 15000\n\nEXIT\nsamsung\n");

        run_chat(5, &runtime, &mut io).unwrap();

        assert_eq!(
            io.stdout_to_string(),
            "SmartPick - ask me about phones! (type 'exit' to quit)\n\
             \nYour query: \
             \nTop results:\n\nNo phones match your query constraints.\n\
             \nYour query: \
             \nYour query: Goodbye!\n"
        );
    }

    #[test]
    fn chat_prints_table() {
        let runtime = runtime_from_rows(&samsung_and_apple());
        let mut io = BufferedIO::with_stdin("samsung under 15000\nquit\n");

        run_chat(5, &runtime, &mut io).unwrap();

        let stdout = io.stdout_to_string();
        assert!(stdout.contains("\nTop results:\n\nbrand_name      model price"));
        assert!(stdout.contains("   samsung Galaxy M34 12000"));
        assert!(stdout.ends_with("Goodbye!\n"));
    }

    #[test]
    fn chat_stops_at_end_of_input() {
        let runtime = runtime_from_rows(&samsung_and_apple());
        let mut io = BufferedIO::with_stdin("");

        run_chat(5, &runtime, &mut io).unwrap();

        assert_eq!(
            io.stdout_to_string(),
            "SmartPick - ask me about phones! (type 'exit' to quit)\n\nYour query: \nGoodbye!\n"
        );
    }

    #[test]
    fn try_run_chat_loads_runtime() {
        let workspace = crate::test_util::TrainedWorkspace::new(&samsung_and_apple());
        let (result, io) = crate::test_util::run_cli(&workspace, &["chat"], "quit\n");
        result.unwrap();
        assert!(io.stdout_to_string().ends_with("Your query: Goodbye!\n"));
    }
}
