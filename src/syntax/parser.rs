//! Structural Java parser.
//!
//! Only the shape needed to find constant fields is modelled: package clause,
//! imports, type declarations (nested ones included) and field declarators with
//! their raw initializer tokens. Method bodies, initializer blocks, annotation
//! arguments and type headers are skipped by balanced delimiters.
use super::lexer::{tokenize, Comment, Lexed, Token, TokenKind};
use crate::error::SyntaxError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
    Sealed,
    NonSealed,
}

impl Modifier {
    fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            "static" => Self::Static,
            "final" => Self::Final,
            "abstract" => Self::Abstract,
            "native" => Self::Native,
            "synchronized" => Self::Synchronized,
            "transient" => Self::Transient,
            "volatile" => Self::Volatile,
            "strictfp" => Self::Strictfp,
            "default" => Self::Default,
            "sealed" => Self::Sealed,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    /// `@interface`
    Annotation,
}

#[derive(Debug)]
pub struct CompilationUnit<'a> {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl<'a>>,
}

impl<'a> CompilationUnit<'a> {
    /// Top-level type declaration with the given simple name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl<'a>> {
        self.types.iter().find(|decl| decl.name == name)
    }
}

#[derive(Debug)]
pub struct TypeDecl<'a> {
    pub kind: TypeKind,
    pub name: &'a str,
    pub line: usize,
    pub members: Vec<Member<'a>>,
}

impl<'a> TypeDecl<'a> {
    /// Every field of this declaration and of its nested member types, in
    /// source order.
    pub fn fields(&self) -> Vec<&FieldDecl<'a>> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'s>(&'s self, out: &mut Vec<&'s FieldDecl<'a>>) {
        for member in &self.members {
            match member {
                Member::Field(field) => out.push(field),
                Member::Type(nested) => nested.collect_fields(out),
            }
        }
    }
}

#[derive(Debug)]
pub enum Member<'a> {
    Field(FieldDecl<'a>),
    Type(TypeDecl<'a>),
}

#[derive(Debug)]
pub struct FieldDecl<'a> {
    pub modifiers: Vec<Modifier>,
    pub ty: String,
    pub declarators: Vec<Declarator<'a>>,
    /// Comment directly preceding the field's first token.
    pub comment: Option<Comment<'a>>,
    pub line: usize,
}

impl FieldDecl<'_> {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Debug)]
pub struct Declarator<'a> {
    pub name: &'a str,
    pub initializer: Option<Expr<'a>>,
}

/// Unevaluated initializer expression.
#[derive(Debug)]
pub struct Expr<'a> {
    pub tokens: Vec<Token<'a>>,
}

impl Expr<'_> {
    /// Source text of the expression with whitespace runs collapsed.
    pub fn text(&self) -> String {
        join_tokens(&self.tokens)
    }
}

pub fn parse_compilation_unit<'a>(
    path: &Path,
    source: &'a str,
) -> Result<CompilationUnit<'a>, SyntaxError> {
    let lexed = tokenize(path, source)?;
    Parser {
        path,
        lexed,
        pos: 0,
    }
    .compilation_unit()
}

fn join_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut prev_end = None;
    for token in tokens {
        if prev_end.is_some_and(|end| token.start > end) {
            out.push(' ');
        }
        out.push_str(token.text);
        prev_end = Some(token.end);
    }
    out
}

fn punct(token: &Token<'_>) -> Option<char> {
    match token.kind {
        TokenKind::Punct => token.text.chars().next(),
        _ => None,
    }
}

struct Parser<'a, 'p> {
    path: &'p Path,
    lexed: Lexed<'a>,
    pos: usize,
}

impl<'a> Parser<'a, '_> {
    fn compilation_unit(mut self) -> Result<CompilationUnit<'a>, SyntaxError> {
        let mut unit = CompilationUnit {
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
        };
        while let Some(token) = self.peek() {
            if token.is_punct(';') {
                self.pos += 1;
                continue;
            }
            if token.is_ident("package") {
                self.pos += 1;
                unit.package = Some(self.text_until_semicolon()?);
                continue;
            }
            if token.is_ident("import") {
                self.pos += 1;
                let import = self.text_until_semicolon()?;
                unit.imports.push(import);
                continue;
            }
            self.modifiers()?;
            let Some(kind) = self.type_keyword() else {
                let found = self.peek().unwrap_or(token);
                return Err(self.error(
                    &found,
                    format!("expected a type declaration, found `{}`", found.text),
                ));
            };
            unit.types.push(self.type_decl(kind)?);
        }
        Ok(unit)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.lexed.tokens.get(self.pos + offset).copied()
    }

    fn next_token(&mut self, expected: &str) -> Result<Token<'a>, SyntaxError> {
        let token = self.peek().ok_or_else(|| self.eof(expected))?;
        self.pos += 1;
        Ok(token)
    }

    fn eat_punct(&mut self, ch: char) -> bool {
        if self.peek().is_some_and(|token| token.is_punct(ch)) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect_punct(&mut self, ch: char) -> Result<Token<'a>, SyntaxError> {
        let token = self.next_token(&format!("`{ch}`"))?;
        if !token.is_punct(ch) {
            return Err(self.error(&token, format!("expected `{ch}`, found `{}`", token.text)));
        }
        Ok(token)
    }

    fn expect_ident(&mut self, what: &str) -> Result<Token<'a>, SyntaxError> {
        let token = self.next_token(what)?;
        if token.kind != TokenKind::Ident {
            return Err(self.error(&token, format!("expected {what}, found `{}`", token.text)));
        }
        Ok(token)
    }

    fn error(&self, token: &Token<'_>, message: String) -> SyntaxError {
        SyntaxError::Structure {
            path: self.path.to_path_buf(),
            line: token.line,
            message,
        }
    }

    fn eof(&self, expected: &str) -> SyntaxError {
        SyntaxError::UnexpectedEnd {
            path: self.path.to_path_buf(),
            message: format!("expected {expected}"),
        }
    }

    fn text_until_semicolon(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        while !self.next_token("`;`")?.is_punct(';') {}
        Ok(join_tokens(&self.lexed.tokens[start..self.pos - 1]))
    }

    /// Consumes modifiers and annotations.
    fn modifiers(&mut self) -> Result<Vec<Modifier>, SyntaxError> {
        let mut modifiers = Vec::new();
        while let Some(token) = self.peek() {
            if token.is_punct('@') {
                if self.peek_at(1).is_some_and(|next| next.is_ident("interface")) {
                    break;
                }
                self.annotation()?;
                continue;
            }
            if token.is_ident("non")
                && self.peek_at(1).is_some_and(|t| t.is_punct('-'))
                && self.peek_at(2).is_some_and(|t| t.is_ident("sealed"))
            {
                self.pos += 3;
                modifiers.push(Modifier::NonSealed);
                continue;
            }
            let modifier = match token.kind {
                TokenKind::Ident => Modifier::from_keyword(token.text),
                _ => None,
            };
            let Some(modifier) = modifier else {
                break;
            };
            self.pos += 1;
            modifiers.push(modifier);
        }
        Ok(modifiers)
    }

    fn annotation(&mut self) -> Result<(), SyntaxError> {
        self.expect_punct('@')?;
        self.expect_ident("annotation name")?;
        while self.peek().is_some_and(|t| t.is_punct('.'))
            && self
                .peek_at(1)
                .is_some_and(|t| t.kind == TokenKind::Ident)
        {
            self.pos += 2;
        }
        if self.peek().is_some_and(|t| t.is_punct('(')) {
            self.skip_balanced()?;
        }
        Ok(())
    }

    /// Detects a type declaration keyword at the cursor without consuming it.
    fn type_keyword(&self) -> Option<TypeKind> {
        let token = self.peek()?;
        if token.is_punct('@') {
            return self
                .peek_at(1)
                .filter(|next| next.is_ident("interface"))
                .map(|_| TypeKind::Annotation);
        }
        if token.kind != TokenKind::Ident {
            return None;
        }
        match token.text {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "enum" => Some(TypeKind::Enum),
            "record" => {
                let named = self
                    .peek_at(1)
                    .is_some_and(|t| t.kind == TokenKind::Ident);
                let header = self
                    .peek_at(2)
                    .is_some_and(|t| t.is_punct('(') || t.is_punct('<'));
                (named && header).then_some(TypeKind::Record)
            }
            _ => None,
        }
    }

    fn type_decl(&mut self, kind: TypeKind) -> Result<TypeDecl<'a>, SyntaxError> {
        let keyword = self.next_token("type keyword")?;
        if kind == TypeKind::Annotation {
            self.pos += 1;
        }
        let name = self.expect_ident("type name")?;
        // Type parameters, record components, extends/implements/permits.
        loop {
            let token = self.peek().ok_or_else(|| self.eof("type body"))?;
            if token.is_punct('{') {
                break;
            }
            if token.is_punct('(') {
                self.skip_balanced()?;
            } else {
                self.pos += 1;
            }
        }
        let members = self.type_body(kind)?;
        Ok(TypeDecl {
            kind,
            name: name.text,
            line: keyword.line,
            members,
        })
    }

    fn type_body(&mut self, kind: TypeKind) -> Result<Vec<Member<'a>>, SyntaxError> {
        self.expect_punct('{')?;
        if kind == TypeKind::Enum {
            self.skip_enum_constants()?;
        }
        let mut members = Vec::new();
        loop {
            let token = self.peek().ok_or_else(|| self.eof("`}`"))?;
            if token.is_punct('}') {
                self.pos += 1;
                return Ok(members);
            }
            if let Some(member) = self.member()? {
                members.push(member);
            }
        }
    }

    fn skip_enum_constants(&mut self) -> Result<(), SyntaxError> {
        loop {
            let token = self.peek().ok_or_else(|| self.eof("`}`"))?;
            match punct(&token) {
                Some('}') => return Ok(()),
                Some(';') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some('(' | '[' | '{') => self.skip_balanced()?,
                _ => self.pos += 1,
            }
        }
    }

    fn member(&mut self) -> Result<Option<Member<'a>>, SyntaxError> {
        let first = self.peek().ok_or_else(|| self.eof("member"))?;
        if first.is_punct(';') {
            self.pos += 1;
            return Ok(None);
        }
        let comment = first
            .leading_comment
            .map(|index| self.lexed.comments[index]);
        let modifiers = self.modifiers()?;

        let token = self.peek().ok_or_else(|| self.eof("member"))?;
        if token.is_punct('{') {
            self.skip_balanced()?;
            return Ok(None);
        }
        if let Some(kind) = self.type_keyword() {
            return Ok(Some(Member::Type(self.type_decl(kind)?)));
        }
        if token.is_punct('<') {
            self.skip_method()?;
            return Ok(None);
        }

        let ty = self.type_ref()?;
        if self.peek().is_some_and(|t| t.is_punct('(')) {
            // Constructor.
            self.skip_method()?;
            return Ok(None);
        }
        let name = self.expect_ident("member name")?;
        if self.peek().is_some_and(|t| t.is_punct('(')) {
            self.skip_method()?;
            return Ok(None);
        }
        let declarators = self.declarators(name)?;
        Ok(Some(Member::Field(FieldDecl {
            modifiers,
            ty,
            declarators,
            comment,
            line: first.line,
        })))
    }

    fn type_ref(&mut self) -> Result<String, SyntaxError> {
        while self.peek().is_some_and(|t| t.is_punct('@')) {
            self.annotation()?;
        }
        let start = self.pos;
        self.expect_ident("type")?;
        loop {
            let Some(token) = self.peek() else {
                break;
            };
            let next = self.peek_at(1);
            if token.is_punct('<') {
                self.skip_angles()?;
            } else if token.is_punct('.') && next.is_some_and(|t| t.kind == TokenKind::Ident) {
                self.pos += 2;
            } else if token.is_punct('[') && next.is_some_and(|t| t.is_punct(']')) {
                self.pos += 2;
            } else {
                break;
            }
        }
        Ok(join_tokens(&self.lexed.tokens[start..self.pos]))
    }

    fn declarators(&mut self, first: Token<'a>) -> Result<Vec<Declarator<'a>>, SyntaxError> {
        let mut declarators = Vec::new();
        let mut name = first;
        loop {
            while self.peek().is_some_and(|t| t.is_punct('['))
                && self.peek_at(1).is_some_and(|t| t.is_punct(']'))
            {
                self.pos += 2;
            }
            let initializer = if self.eat_punct('=') {
                Some(self.expression()?)
            } else {
                None
            };
            declarators.push(Declarator {
                name: name.text,
                initializer,
            });

            let token = self.next_token("`;`")?;
            match punct(&token) {
                Some(';') => return Ok(declarators),
                Some(',') => name = self.expect_ident("field name")?,
                _ => {
                    return Err(self.error(
                        &token,
                        format!(
                            "expected `,` or `;` after field {}, found `{}`",
                            name.text, token.text
                        ),
                    ))
                }
            }
        }
    }

    /// Collects initializer tokens up to the next top-level `,` or `;`.
    fn expression(&mut self) -> Result<Expr<'a>, SyntaxError> {
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            let token = self.peek().ok_or_else(|| self.eof("`;`"))?;
            match punct(&token) {
                Some('(' | '[' | '{') => depth += 1,
                Some(')' | ']' | '}') => {
                    if depth == 0 {
                        return Err(self.error(&token, format!("unbalanced `{}`", token.text)));
                    }
                    depth -= 1;
                }
                Some(';') if depth == 0 => break,
                Some(',') if depth == 0 && self.starts_declarator(1) => break,
                _ => {}
            }
            self.pos += 1;
        }
        if start == self.pos {
            let token = self.peek().ok_or_else(|| self.eof("expression"))?;
            return Err(self.error(&token, "expected an initializer expression".to_string()));
        }
        Ok(Expr {
            tokens: self.lexed.tokens[start..self.pos].to_vec(),
        })
    }

    /// Whether the tokens at `offset` begin another declarator: a name,
    /// optional `[]` pairs, then `=`, `,` or `;`. A comma inside type
    /// arguments (`Map.<K, V>of()`) is followed by something else.
    fn starts_declarator(&self, offset: usize) -> bool {
        if !self
            .peek_at(offset)
            .is_some_and(|t| t.kind == TokenKind::Ident)
        {
            return false;
        }
        let mut offset = offset + 1;
        while self.peek_at(offset).is_some_and(|t| t.is_punct('['))
            && self.peek_at(offset + 1).is_some_and(|t| t.is_punct(']'))
        {
            offset += 2;
        }
        self.peek_at(offset)
            .as_ref()
            .and_then(punct)
            .is_some_and(|ch| matches!(ch, '=' | ',' | ';'))
    }

    /// Skips a method, constructor or annotation element: up to a `;` or
    /// through a brace-delimited body.
    fn skip_method(&mut self) -> Result<(), SyntaxError> {
        loop {
            let token = self.peek().ok_or_else(|| self.eof("method body"))?;
            match punct(&token) {
                Some(';') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some('{') => return self.skip_balanced(),
                Some('(' | '[') => self.skip_balanced()?,
                _ => self.pos += 1,
            }
        }
    }

    /// Skips from an opening delimiter through its matching closer.
    fn skip_balanced(&mut self) -> Result<(), SyntaxError> {
        let open = self.next_token("opening delimiter")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.peek().ok_or_else(|| {
                self.eof(&format!("closing delimiter for `{}` on line {}", open.text, open.line))
            })?;
            match punct(&token) {
                Some('(' | '[' | '{') => depth += 1,
                Some(')' | ']' | '}') => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn skip_angles(&mut self) -> Result<(), SyntaxError> {
        let mut depth = 0usize;
        loop {
            let token = self.next_token("`>`")?;
            match punct(&token) {
                Some('<') => depth += 1,
                Some('>') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> CompilationUnit<'_> {
        parse_compilation_unit(Path::new("Test.java"), source).expect("parse")
    }

    const GENERATED: &str = r#"/*
 * This file is auto-generated.  DO NOT MODIFY.
 */
package android.hardware.automotive.vehicle;
import java.util.List;
import static java.lang.Math.max;
/** @hide */
@SuppressWarnings(value = {"unused"})
public @interface VehicleGear {
  /** Unknown gear. */
  public static final int GEAR_UNKNOWN = 0;
  public static final int GEAR_NEUTRAL = 1;
}
"#;

    #[test]
    fn reads_package_imports_and_annotation_type() {
        let unit = parse(GENERATED);
        assert_eq!(
            unit.package.as_deref(),
            Some("android.hardware.automotive.vehicle")
        );
        assert_eq!(unit.imports, ["java.util.List", "static java.lang.Math.max"]);
        let decl = unit.find_type("VehicleGear").expect("declaration");
        assert_eq!(decl.kind, TypeKind::Annotation);
        assert_eq!(decl.line, 9);

        let fields = decl.fields();
        let names: Vec<&str> = fields.iter().map(|f| f.declarators[0].name).collect();
        assert_eq!(names, ["GEAR_UNKNOWN", "GEAR_NEUTRAL"]);
        assert_eq!(fields[0].ty, "int");
        assert!(fields[0].has(Modifier::Public) && fields[0].has(Modifier::Static));
        assert_eq!(
            fields[0].comment.and_then(|c| c.doc_content()),
            Some(" Unknown gear. ")
        );
        assert!(fields[1].comment.is_none());
    }

    #[test]
    fn skips_methods_initializers_and_enum_constants() {
        let source = r#"
package p;
class Other { int x = 1; }
public class Holder<T extends Comparable<T>> extends Base implements Api {
    static { register(); }
    public Holder(int a) { this.a = a; }
    private final java.util.Map<String, List<Integer>> table = new HashMap<>();
    public static <K> K pick(K[] keys) { return keys[0]; }
    int[] values = {1, 2, 3}, more;
    public static final int LAST = -7;
    enum Mode { ON(1) { void x() {} }, OFF(2); Mode(int v) {} int width; }
    record Pair(int a, int b) { static int ZERO = 0; }
    @Override public String toString() { return "}"; }
}
"#;
        let unit = parse(source);
        assert!(unit.find_type("Other").is_some());
        let decl = unit.find_type("Holder").expect("holder");
        assert_eq!(decl.kind, TypeKind::Class);

        let fields = decl.fields();
        let names: Vec<Vec<&str>> = fields
            .iter()
            .map(|f| f.declarators.iter().map(|d| d.name).collect())
            .collect();
        assert_eq!(
            names,
            vec![
                vec!["table"],
                vec!["values", "more"],
                vec!["LAST"],
                vec!["width"],
                vec!["ZERO"],
            ]
        );
        assert_eq!(fields[0].ty, "java.util.Map<String, List<Integer>>");
        let last = fields[2].declarators[0].initializer.as_ref().expect("init");
        assert_eq!(last.text(), "-7");
        assert_eq!(
            fields[1].declarators[0]
                .initializer
                .as_ref()
                .map(|e| e.text()),
            Some("{1, 2, 3}".to_string())
        );
        assert!(fields[1].declarators[1].initializer.is_none());
    }

    #[test]
    fn type_argument_commas_stay_inside_the_initializer() {
        let unit = parse(
            "class A {\n\
             static java.util.Map<String,Integer> M = java.util.Map.<String, Integer>of();\n\
             static Object P = new Pair<String, int[]>(), Q = null, R[] = {};\n\
             public static final int X = 1;\n}",
        );
        let fields = unit.find_type("A").expect("A").fields();
        let names: Vec<Vec<&str>> = fields
            .iter()
            .map(|f| f.declarators.iter().map(|d| d.name).collect())
            .collect();
        assert_eq!(names, vec![vec!["M"], vec!["P", "Q", "R"], vec!["X"]]);
        let init = |field: usize, declarator: usize| {
            fields[field].declarators[declarator]
                .initializer
                .as_ref()
                .map(|e| e.text())
        };
        assert_eq!(
            init(0, 0).as_deref(),
            Some("java.util.Map.<String, Integer>of()")
        );
        assert_eq!(init(1, 0).as_deref(), Some("new Pair<String, int[]>()"));
        assert_eq!(init(2, 0).as_deref(), Some("1"));
    }

    #[test]
    fn nested_types_are_searched_only_through_fields() {
        let unit = parse("interface Outer { interface Inner { int A = 1; } }");
        assert!(unit.find_type("Inner").is_none());
        let outer = unit.find_type("Outer").expect("outer");
        assert_eq!(outer.fields().len(), 1);
    }

    #[test]
    fn collapses_whitespace_in_expression_text() {
        let unit = parse("class A { static int X = (1 <<\n   4)   | 0x10; }");
        let fields = unit.find_type("A").expect("A").fields();
        let expr = fields[0].declarators[0].initializer.as_ref().expect("init");
        assert_eq!(expr.text(), "(1 << 4) | 0x10");
    }

    #[test]
    fn reports_missing_semicolon_with_line() {
        let err = parse_compilation_unit(Path::new("Bad.java"), "class A {\n int X = 1\n}")
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad.java:3: unbalanced `}`");
    }

    #[test]
    fn reports_truncated_input() {
        let err =
            parse_compilation_unit(Path::new("Bad.java"), "class A { int X = 1;").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedEnd { .. }));
    }

    #[test]
    fn rejects_stray_top_level_tokens() {
        let err = parse_compilation_unit(Path::new("Bad.java"), "int x;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad.java:1: expected a type declaration, found `int`"
        );
    }
}
