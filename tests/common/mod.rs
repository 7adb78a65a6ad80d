//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PACKAGE: &str = "android.hardware.automotive.vehicle";
pub const PACKAGE_DIR: &str = "android/hardware/automotive/vehicle";
pub const GOLDEN_NAME: &str = "android.hardware.automotive.vehicle-types-meta.json";

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Root of the checked-in generated sources.
pub fn data_dir() -> PathBuf {
    manifest_dir().join("tests/data")
}

pub fn golden_path() -> PathBuf {
    manifest_dir().join("tests/golden").join(GOLDEN_NAME)
}

/// Temporary workspace holding a run's outputs (and, optionally, a private
/// copy of the input tree).
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn create() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Copies the fixture tree into `<workspace>/input` and returns that root.
    pub fn copy_inputs(&self) -> PathBuf {
        let root = self.path("input");
        let pkg = root.join(PACKAGE_DIR);
        std::fs::create_dir_all(&pkg).expect("create package dir");
        for entry in std::fs::read_dir(data_dir().join(PACKAGE_DIR)).expect("list fixtures") {
            let entry = entry.expect("fixture entry");
            std::fs::copy(entry.path(), pkg.join(entry.file_name())).expect("copy fixture");
        }
        root
    }
}

pub fn emugen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_emugen"))
}

/// Runs the generator over `input_dir`, writing to `output`.
pub fn run_generate(input_dir: &Path, output: &Path, extra: &[&str]) -> Output {
    emugen()
        .arg("--input_dir")
        .arg(input_dir)
        .arg("--output_json")
        .arg(output)
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("run emugen")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
