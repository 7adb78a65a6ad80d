//! Java front end for generated definition files.
mod lexer;
mod parser;

pub use lexer::{Comment, Token, TokenKind};
pub use parser::{parse_compilation_unit, CompilationUnit, Expr, Modifier, TypeDecl};

use crate::error::SourceError;
use std::path::Path;

/// Finds the top-level declaration named `name`.
pub fn locate_declaration<'u, 'a>(
    unit: &'u CompilationUnit<'a>,
    name: &str,
    path: &Path,
) -> Result<&'u TypeDecl<'a>, SourceError> {
    let decl = unit
        .find_type(name)
        .ok_or_else(|| SourceError::DeclarationNotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        })?;
    tracing::debug!(
        path = %path.display(),
        declaration = decl.name,
        kind = ?decl.kind,
        line = decl.line,
        "located declaration"
    );
    Ok(decl)
}
