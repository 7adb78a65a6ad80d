//! CLI argument parsing for the metadata generator.
//!
//! Flag names keep the snake_case spelling build rules already pass; kebab-case
//! aliases are accepted as well.
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Package used when `--package_name` is not given.
pub const DEFAULT_PACKAGE_NAME: &str = "android.hardware.automotive.vehicle";

/// Master declaration read from the input package.
pub const DEFAULT_DECLARATION: &str = "VehicleProperty";

#[derive(Parser, Debug)]
#[command(
    name = "emugen",
    version,
    about = "Parses the VHAL property AIDL interface generated Java files to a json file to be used by emulator",
    after_help = "Example:\n  emugen --input_dir out/soong/.intermediates/hardware/interfaces/automotive/vehicle/aidl_property/android.hardware.automotive.vehicle.property-V3-java-source/gen/ \\\n    --package_name android.hardware.automotive.vehicle \\\n    --output_json /tmp/android.hardware.automotive.vehicle-types-meta.json"
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["input_dir", "input_files"])
))]
pub struct Args {
    /// Directory containing the generated Java sources (package directories below it)
    #[arg(long = "input_dir", visible_alias = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// One or more generated Java files; the input directory is derived from the first
    #[arg(
        long = "input_files",
        visible_alias = "input-files",
        value_name = "FILE",
        num_args = 1..
    )]
    pub input_files: Vec<PathBuf>,

    /// Package of the definition files
    #[arg(
        long = "package_name",
        visible_alias = "package-name",
        value_name = "NAME",
        default_value = DEFAULT_PACKAGE_NAME
    )]
    pub package_name: String,

    /// Output JSON file
    #[arg(long = "output_json", visible_alias = "output-json", value_name = "PATH")]
    pub output_json: PathBuf,

    /// Created (empty) when the check against --check_against passes
    #[arg(
        long = "output_empty_file",
        visible_alias = "output-empty-file",
        value_name = "PATH"
    )]
    pub output_empty_file: Option<PathBuf>,

    /// Reference JSON file the generated output must match byte for byte
    #[arg(long = "check_against", visible_alias = "check-against", value_name = "PATH")]
    pub check_against: Option<PathBuf>,

    /// Name of the master declaration (and of its file)
    #[arg(long, value_name = "NAME", default_value = DEFAULT_DECLARATION)]
    pub declaration: String,

    /// Emit debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
