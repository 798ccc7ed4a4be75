use std::io::{BufRead, Write};
use std::path::Path;

use smartpick_lib::catalog::Catalog;
use smartpick_lib::model::train::{train_price_buckets, train_regressor};
use smartpick_lib::output::ConsoleIO;

use crate::cli::DataPaths;

/// Run the `smartpick train` command.
pub fn run_train<IN, OUT, ERR>(
    paths: &DataPaths,
    classifier_path: Option<&Path>,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let catalog = Catalog::load(&paths.dataset)?;
    if !catalog.missing_columns().is_empty() {
        writeln!(
            io.stderr(),
            "Dataset lacks feature columns: {}. Training defaults will stand in.",
            catalog.missing_columns().join(", ")
        )?;
    }

    let model = train_regressor(&catalog)?;
    model.save(&paths.model)?;
    writeln!(
        io.stdout(),
        "Rating model saved to {}",
        paths.model.display()
    )?;
    writeln!(io.stdout(), "  {}", model.report)?;

    if let Some(path) = classifier_path {
        let buckets = train_price_buckets(&catalog)?;
        buckets.save(path)?;
        writeln!(io.stdout(), "Price-bucket model saved to {}", path.display())?;
        writeln!(
            io.stdout(),
            "  train={} test={} accuracy={:.4}",
            buckets.train_rows,
            buckets.test_rows,
            buckets.accuracy
        )?;
    }

    Ok(())
}
