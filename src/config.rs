//! Resolved settings for one generator run.
use crate::cli::Args;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Sentinel constant excluded from the master declaration.
pub const SENTINEL_NAME: &str = "INVALID";

/// Documentation tag naming a related definition file.
pub const CROSS_REFERENCE_TAG: &str = "data_enum";

/// Emulator can display at least this many characters before cutting.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 30;

/// Where the checked-in reference artifact lives; named in remediation output.
pub const CANONICAL_REFERENCE_PATH: &str = "${ANDROID_BUILD_TOP}/hardware/interfaces/automotive/vehicle/aidl/emu_metadata/android.hardware.automotive.vehicle-types-meta.json";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub input_dir: PathBuf,
    pub package_name: String,
    /// Package name with `.` mapped to path separators.
    pub package_dir: PathBuf,
    pub declaration: String,
    pub output_json: PathBuf,
    pub check_against: Option<PathBuf>,
    pub output_empty_file: Option<PathBuf>,
    pub sentinel: String,
    pub cross_reference_tag: String,
    pub max_display_name_length: usize,
    pub canonical_reference: String,
}

impl GeneratorConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let package_dir = package_dir(&args.package_name);
        let input_dir = match (args.input_dir, args.input_files.first()) {
            (Some(dir), _) => dir,
            (None, Some(file)) => infer_input_dir(file, &package_dir),
            (None, None) => {
                return Err(anyhow!("Either --input_dir or --input_files must be specified"));
            }
        };
        if args.output_empty_file.is_some() && args.check_against.is_none() {
            tracing::warn!("--output_empty_file is only used together with --check_against");
        }
        Ok(Self {
            input_dir,
            package_name: args.package_name,
            package_dir,
            declaration: args.declaration,
            output_json: args.output_json,
            check_against: args.check_against,
            output_empty_file: args.output_empty_file,
            sentinel: SENTINEL_NAME.to_string(),
            cross_reference_tag: CROSS_REFERENCE_TAG.to_string(),
            max_display_name_length: MAX_DISPLAY_NAME_LENGTH,
            canonical_reference: CANONICAL_REFERENCE_PATH.to_string(),
        })
    }

    /// Path of the definition file declaring `name`.
    pub fn definition_path(&self, name: &str) -> PathBuf {
        self.input_dir
            .join(&self.package_dir)
            .join(format!("{name}.java"))
    }
}

fn package_dir(package_name: &str) -> PathBuf {
    package_name.split('.').filter(|part| !part.is_empty()).collect()
}

/// Parent of `file`, minus a trailing package directory.
fn infer_input_dir(file: &Path, package_dir: &Path) -> PathBuf {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return PathBuf::from("."),
    };
    let parent_parts: Vec<_> = parent.components().collect();
    let package_parts: Vec<_> = package_dir.components().collect();
    if !package_parts.is_empty() && parent_parts.ends_with(&package_parts) {
        let root: PathBuf = parent_parts[..parent_parts.len() - package_parts.len()]
            .iter()
            .collect();
        if root.as_os_str().is_empty() {
            return PathBuf::from(".");
        }
        return root;
    }
    parent.to_path_buf()
}
