use crate::config::GeneratorConfig;
use crate::emit::{render_document, write_output};
use crate::resolve::build_document;
use crate::verify::{verify_against_reference, VerifyRequest};
use anyhow::Result;

/// Generates the metadata file and, when requested, checks it against the
/// reference copy.
pub fn run_generate(config: &GeneratorConfig) -> Result<()> {
    let document = build_document(config)?;
    let text = render_document(&document)?;
    write_output(&config.output_json, &text)?;
    tracing::info!(
        output = %config.output_json.display(),
        enums = document.enums.len(),
        bytes = text.len(),
        "wrote metadata"
    );
    println!(
        "Input at folder: {} successfully parsed. Output at: {}",
        config.input_dir.display(),
        config.output_json.display()
    );

    if let Some(reference) = config.check_against.as_deref() {
        verify_against_reference(&VerifyRequest {
            generated: &config.output_json,
            reference,
            marker: config.output_empty_file.as_deref(),
            destination: &config.canonical_reference,
        })?;
    }
    Ok(())
}
