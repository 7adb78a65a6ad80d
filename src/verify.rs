//! Golden-file check of a generated artifact.
use crate::error::VerifyError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct VerifyRequest<'a> {
    pub generated: &'a Path,
    pub reference: &'a Path,
    /// Created empty when the contents match.
    pub marker: Option<&'a Path>,
    /// Destination named in the remediation command.
    pub destination: &'a str,
}

pub fn verify_against_reference(request: &VerifyRequest<'_>) -> Result<()> {
    let reference = fs::read(request.reference)
        .with_context(|| format!("read {}", request.reference.display()))?;
    let generated = fs::read(request.generated)
        .with_context(|| format!("read {}", request.generated.display()))?;
    if reference != generated {
        tracing::debug!(
            reference = %request.reference.display(),
            reference_len = reference.len(),
            generated_len = generated.len(),
            "generated metadata differs from reference"
        );
        return Err(VerifyError::Mismatch {
            destination: request.destination.to_string(),
            generated: absolute(request.generated).display().to_string(),
        }
        .into());
    }
    if let Some(marker) = request.marker {
        fs::write(marker, b"").with_context(|| format!("create {}", marker.display()))?;
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
