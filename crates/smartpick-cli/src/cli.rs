use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use smartpick_lib::config::{
    DEFAULT_CLASSIFIER_PATH, DEFAULT_DATASET_PATH, DEFAULT_MODEL_PATH, DEFAULT_TOP_N,
};

#[derive(Parser, Debug)]
#[command(
    name = "smartpick",
    about = "Phone recommendations from plain-language queries"
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: DataPaths,

    #[command(subcommand)]
    pub command: Command,
}

/// Locations of the dataset and the trained model.
#[derive(Args, Debug)]
pub struct DataPaths {
    /// Smartphone dataset (CSV with a header row).
    #[arg(long, global = true, env = "SMARTPICK_DATASET", default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,

    /// Trained rating model written by `smartpick train`.
    #[arg(long, global = true, env = "SMARTPICK_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit the rating model on the dataset and save it.
    Train {
        /// Also fit the price-bucket classifier.
        #[arg(long)]
        classifier: bool,
        /// Where to save the price-bucket classifier.
        #[arg(long, default_value = DEFAULT_CLASSIFIER_PATH)]
        classifier_path: PathBuf,
    },

    /// Answer a single query, e.g. `smartpick ask samsung under 20000`.
    Ask {
        /// Query text. Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Maximum number of phones to show.
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },

    /// Interactive prompt. Type `exit` or `quit` to leave.
    Chat {
        /// Maximum number of phones to show per answer.
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },

    /// Serve recommendations over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "SMARTPICK_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_joins_words_and_reads_top_n() {
        let cli = Cli::try_parse_from([
            "smartpick", "ask", "-n", "3", "samsung", "under", "20000",
        ])
        .unwrap();
        match cli.command {
            Command::Ask { query, top_n } => {
                assert_eq!(query.join(" "), "samsung under 20000");
                assert_eq!(top_n, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_paths_after_subcommand() {
        let cli = Cli::try_parse_from([
            "smartpick",
            "chat",
            "--dataset",
            "/data/phones.csv",
            "--model",
            "/data/model.json",
        ])
        .unwrap();
        assert_eq!(cli.paths.dataset, PathBuf::from("/data/phones.csv"));
        assert_eq!(cli.paths.model, PathBuf::from("/data/model.json"));
    }

    #[test]
    fn ask_requires_query() {
        assert!(Cli::try_parse_from(["smartpick", "ask"]).is_err());
    }

    #[test]
    fn serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["smartpick", "serve", "--bind", "nowhere"]).is_err());
    }
}
