//! Qualifying constant fields and their integer values.
use crate::error::SourceError;
use crate::syntax::{Comment, Expr, Modifier, Token, TokenKind, TypeDecl};

/// A `public static` field with exactly one initialized declarator.
#[derive(Debug)]
pub struct ConstantDeclaration<'d, 'a> {
    pub name: &'a str,
    pub initializer: &'d Expr<'a>,
    pub comment: Option<Comment<'a>>,
    pub line: usize,
}

impl<'a> ConstantDeclaration<'_, 'a> {
    /// Content of the attached documentation comment, if any.
    pub fn doc_content(&self) -> Option<&'a str> {
        self.comment.and_then(|comment| comment.doc_content())
    }

    pub fn value(&self) -> Result<i32, SourceError> {
        evaluate_initializer(self.name, self.initializer)
    }
}

/// Qualifying fields of `decl` (nested member types included) in source order.
pub fn constant_declarations<'d, 'a>(
    decl: &'d TypeDecl<'a>,
) -> Result<Vec<ConstantDeclaration<'d, 'a>>, SourceError> {
    let mut constants = Vec::new();
    for field in decl.fields() {
        if !(field.has(Modifier::Public) && field.has(Modifier::Static)) {
            tracing::debug!(
                declaration = decl.name,
                line = field.line,
                ty = %field.ty,
                "skipping field without public static modifiers"
            );
            continue;
        }
        let declarator = match field.declarators.as_slice() {
            [single] => single,
            many => {
                let names: Vec<&str> = many.iter().map(|d| d.name).collect();
                return Err(SourceError::MultipleDeclarators {
                    names: names.join(", "),
                });
            }
        };
        let initializer =
            declarator
                .initializer
                .as_ref()
                .ok_or_else(|| SourceError::MissingInitializer {
                    field: declarator.name.to_string(),
                })?;
        constants.push(ConstantDeclaration {
            name: declarator.name,
            initializer,
            comment: field.comment,
            line: field.line,
        });
    }
    Ok(constants)
}

/// Evaluates a decimal integer literal, optionally negated.
pub fn evaluate_initializer(field: &str, expr: &Expr<'_>) -> Result<i32, SourceError> {
    let (negative, literal) = match expr.tokens.as_slice() {
        [literal] if literal.kind == TokenKind::IntLiteral => (false, literal),
        [minus, literal] if minus.is_punct('-') && literal.kind == TokenKind::IntLiteral => {
            (true, literal)
        }
        _ => {
            return Err(SourceError::UnsupportedExpression {
                field: field.to_string(),
                expression: expr.text(),
            })
        }
    };
    literal_value(literal, negative).ok_or_else(|| SourceError::ValueOutOfRange {
        field: field.to_string(),
        expression: expr.text(),
    })
}

fn literal_value(literal: &Token<'_>, negative: bool) -> Option<i32> {
    let digits: String = literal.text.chars().filter(|&ch| ch != '_').collect();
    let magnitude: i64 = digits.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_compilation_unit;
    use std::path::Path;

    fn with_constants<F>(body: &str, check: F)
    where
        F: FnOnce(Result<Vec<ConstantDeclaration<'_, '_>>, SourceError>),
    {
        let source = format!("public @interface Probe {{\n{body}\n}}\n");
        let unit = parse_compilation_unit(Path::new("Probe.java"), &source).expect("parse");
        let decl = unit.find_type("Probe").expect("declaration");
        check(constant_declarations(decl));
    }

    fn values(body: &str) -> Vec<(String, Result<i32, String>)> {
        let mut out = Vec::new();
        with_constants(body, |constants| {
            for constant in constants.expect("constants") {
                let value = constant.value().map_err(|err| err.to_string());
                out.push((constant.name.to_string(), value));
            }
        });
        out
    }

    #[test]
    fn evaluates_plain_and_negated_literals() {
        let got = values(
            "public static final int A = 42;\npublic static final int B = -42;\npublic static final int C = 1_000;\npublic static final int D = - 3;",
        );
        assert_eq!(
            got,
            vec![
                ("A".to_string(), Ok(42)),
                ("B".to_string(), Ok(-42)),
                ("C".to_string(), Ok(1000)),
                ("D".to_string(), Ok(-3)),
            ]
        );
    }

    #[test]
    fn accepts_the_full_signed_range() {
        let got = values(
            "public static final int MIN = -2147483648;\npublic static final int MAX = 2147483647;",
        );
        assert_eq!(got[0].1, Ok(i32::MIN));
        assert_eq!(got[1].1, Ok(i32::MAX));
    }

    #[test]
    fn rejects_values_outside_i32() {
        let got = values("public static final int BIG = 2147483648;");
        assert_eq!(
            got[0].1,
            Err("value of BIG does not fit in a 32-bit signed integer: 2147483648".to_string())
        );
    }

    #[test]
    fn rejects_non_literal_expressions() {
        let got = values(
            "public static final int A = 0x10;\npublic static final int B = 1 << 4;\npublic static final int C = (5);\npublic static final int D = Other.VALUE;\npublic static final long E = 5L;\npublic static final int F = 1_;\npublic static final int G = -2_;",
        );
        let errors: Vec<String> = got.into_iter().filter_map(|(_, v)| v.err()).collect();
        assert_eq!(
            errors,
            [
                "Unsupported expression: 0x10 (field A)",
                "Unsupported expression: 1 << 4 (field B)",
                "Unsupported expression: (5) (field C)",
                "Unsupported expression: Other.VALUE (field D)",
                "Unsupported expression: 5L (field E)",
                "Unsupported expression: 1_ (field F)",
                "Unsupported expression: -2_ (field G)",
            ]
        );
    }

    #[test]
    fn keeps_only_public_static_fields_in_order() {
        with_constants(
            "/** doc */\npublic static final int A = 1;\nstatic final int B = 2;\npublic final int C = 3;\npublic static int D = 4;",
            |constants| {
                let constants = constants.expect("constants");
                let names: Vec<&str> = constants.iter().map(|c| c.name).collect();
                assert_eq!(names, ["A", "D"]);
                assert_eq!(constants[0].doc_content(), Some(" doc "));
                assert_eq!(constants[1].doc_content(), None);
            },
        );
    }

    #[test]
    fn plain_comment_is_not_documentation() {
        with_constants("// note\npublic static final int A = 1;", |constants| {
            let constants = constants.expect("constants");
            assert!(constants[0].comment.is_some());
            assert_eq!(constants[0].doc_content(), None);
        });
    }

    #[test]
    fn multiple_declarators_fail_fast() {
        with_constants("public static final int A = 1, B = 2;", |constants| {
            let err = constants.unwrap_err();
            assert_eq!(
                err.to_string(),
                "field declaration with multiple declarators is not supported: A, B"
            );
        });
    }

    #[test]
    fn missing_initializer_is_an_error() {
        with_constants("public static int A;", |constants| {
            assert!(matches!(
                constants.unwrap_err(),
                SourceError::MissingInitializer { ref field } if field == "A"
            ));
        });
    }
}
