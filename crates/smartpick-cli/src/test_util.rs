use std::path::PathBuf;

use smartpick_lib::catalog::Catalog;
use smartpick_lib::model::train::train_regressor;
use smartpick_lib::runtime::Runtime;

pub use smartpick_test_util::dataset::{
    PhoneRow, dataset_dir, mixed_catalog, samsung_and_apple, to_csv,
};

/// A tempdir holding a dataset and a model trained on it.
///
/// The caller must hold the returned [`tempfile::TempDir`] for as long as the
/// files are needed.
pub struct TrainedWorkspace {
    pub tmp: tempfile::TempDir,
    pub dataset: PathBuf,
    pub model: PathBuf,
}

impl TrainedWorkspace {
    pub fn new(rows: &[PhoneRow]) -> Self {
        let (tmp, dataset) = dataset_dir(rows);
        let model = tmp.path().join("model.json");
        train_regressor(&Catalog::load(&dataset).unwrap())
            .unwrap()
            .save(&model)
            .unwrap();
        Self {
            tmp,
            dataset,
            model,
        }
    }

    /// Global path flags pointing at this workspace.
    pub fn path_args(&self) -> [String; 4] {
        [
            "--dataset".to_string(),
            self.dataset.display().to_string(),
            "--model".to_string(),
            self.model.display().to_string(),
        ]
    }
}

/// Build an in-memory [`Runtime`] with a model trained on `rows`.
pub fn runtime_from_rows(rows: &[PhoneRow]) -> Runtime {
    let catalog = Catalog::from_reader(to_csv(rows).as_bytes()).unwrap();
    let model = train_regressor(&catalog).unwrap();
    Runtime { catalog, model }
}

/// Run `smartpick <args...>` against `workspace` with the given stdin.
pub fn run_cli(
    workspace: &TrainedWorkspace,
    args: &[&str],
    stdin: &str,
) -> (anyhow::Result<()>, smartpick_lib::output::BufferedIO) {
    let mut io = smartpick_lib::output::BufferedIO::with_stdin(stdin);
    let paths = workspace.path_args();
    let mut argv: Vec<&str> = vec!["smartpick"];
    argv.extend_from_slice(args);
    argv.extend(paths.iter().map(String::as_str));
    let result = crate::try_run(&argv, &mut io);
    (result, io)
}
