//! Error taxonomy for definition-file processing.
//!
//! Front-end failures carry a file position; source errors name the offending
//! declaration or field. Everything is fatal for the run.
use std::path::PathBuf;

/// Lexing or structural failure while reading a Java definition file.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("{path}:{line}: unterminated {what}")]
    Unterminated {
        path: PathBuf,
        line: usize,
        what: &'static str,
    },
    #[error("{path}:{line}: unexpected character {ch:?}")]
    UnexpectedChar { path: PathBuf, line: usize, ch: char },
    #[error("{path}:{line}: {message}")]
    Structure {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("{path}: unexpected end of input ({message})")]
    UnexpectedEnd { path: PathBuf, message: String },
}

/// Semantic failure while turning declarations into constant records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("declaration {name} not found in {path}")]
    DeclarationNotFound { name: String, path: PathBuf },
    #[error("referenced definition {name} not found, expected it at {path}")]
    MissingReferencedDefinition { name: String, path: PathBuf },
    #[error("Unsupported expression: {expression} (field {field})")]
    UnsupportedExpression { field: String, expression: String },
    #[error("field {field} has no initializer")]
    MissingInitializer { field: String },
    #[error("field declaration with multiple declarators is not supported: {names}")]
    MultipleDeclarators { names: String },
    #[error("missing comment for property: {field}")]
    MissingDocumentation { field: String },
    #[error("value of {field} does not fit in a 32-bit signed integer: {expression}")]
    ValueOutOfRange { field: String, expression: String },
}

/// Golden-file comparison failure.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(
        "The file: {destination} needs to be updated, run: \n\ncp {generated} {destination}\n"
    )]
    Mismatch {
        destination: String,
        generated: String,
    },
}
