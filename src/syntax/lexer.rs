//! Java tokenizer.
//!
//! Produces a flat token stream with comments collected on the side. Each token
//! remembers the comment that immediately precedes it, which is how fields pick
//! up their documentation later.
use crate::error::SyntaxError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident,
    /// Decimal integer literal without suffix (`42`, `1_000`).
    IntLiteral,
    /// Any other literal: hex/octal/binary/long/float numbers, strings, chars.
    Literal,
    /// Single punctuation character.
    Punct,
}

#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    /// Index into [`Lexed::comments`] of the last comment before this token,
    /// if no other token sits between them.
    pub leading_comment: Option<usize>,
}

impl Token<'_> {
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct && self.text.starts_with(ch)
    }

    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
    /// `/** ... */`
    Doc,
}

#[derive(Debug, Clone, Copy)]
pub struct Comment<'a> {
    pub kind: CommentKind,
    /// Full comment text including delimiters.
    pub text: &'a str,
    pub line: usize,
}

impl<'a> Comment<'a> {
    /// Text between `/**` and `*/` for documentation comments.
    pub fn doc_content(&self) -> Option<&'a str> {
        match self.kind {
            CommentKind::Doc => Some(&self.text[3..self.text.len() - 2]),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Lexed<'a> {
    pub tokens: Vec<Token<'a>>,
    pub comments: Vec<Comment<'a>>,
}

pub fn tokenize<'a>(path: &Path, source: &'a str) -> Result<Lexed<'a>, SyntaxError> {
    let bom = if source.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };
    Lexer {
        path,
        src: source,
        pos: bom,
        line: 1,
        pending_comment: None,
        out: Lexed::default(),
    }
    .run()
}

struct Lexer<'a, 'p> {
    path: &'p Path,
    src: &'a str,
    pos: usize,
    line: usize,
    pending_comment: Option<usize>,
    out: Lexed<'a>,
}

impl<'a> Lexer<'a, '_> {
    fn run(mut self) -> Result<Lexed<'a>, SyntaxError> {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                self.line += 1;
                self.pos += 1;
                continue;
            }
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
                continue;
            }
            if self.rest().starts_with("//") {
                self.line_comment();
                continue;
            }
            if self.rest().starts_with("/*") {
                self.block_comment()?;
                continue;
            }

            let start = self.pos;
            let line = self.line;
            let kind = if ch.is_ascii_digit() || (ch == '.' && self.next_is_digit()) {
                self.number()
            } else if ch == '"' {
                self.string()?;
                TokenKind::Literal
            } else if ch == '\'' {
                self.char_literal()?;
                TokenKind::Literal
            } else if is_ident_start(ch) {
                self.ident();
                TokenKind::Ident
            } else if ch.is_ascii_punctuation() {
                self.pos += 1;
                TokenKind::Punct
            } else {
                return Err(SyntaxError::UnexpectedChar {
                    path: self.path.to_path_buf(),
                    line,
                    ch,
                });
            };
            self.push(kind, start, line);
        }
        Ok(self.out)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_is_digit(&self) -> bool {
        self.rest()
            .chars()
            .nth(1)
            .is_some_and(|ch| ch.is_ascii_digit())
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize) {
        self.out.tokens.push(Token {
            kind,
            text: &self.src[start..self.pos],
            start,
            end: self.pos,
            line,
            leading_comment: self.pending_comment.take(),
        });
    }

    fn push_comment(&mut self, kind: CommentKind, start: usize, line: usize) {
        self.out.comments.push(Comment {
            kind,
            text: &self.src[start..self.pos],
            line,
        });
        self.pending_comment = Some(self.out.comments.len() - 1);
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let len = self.rest().find('\n').unwrap_or(self.rest().len());
        self.pos += len;
        self.push_comment(CommentKind::Line, start, self.line);
    }

    fn block_comment(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        let line = self.line;
        let Some(close) = self.rest()[2..].find("*/") else {
            return Err(self.unterminated(line, "comment"));
        };
        let len = close + 4;
        self.line += self.rest()[..len].matches('\n').count();
        self.pos += len;
        let text = &self.src[start..self.pos];
        // `/**/` is an empty block comment, not documentation.
        let kind = if text.starts_with("/**") && text.len() > 4 {
            CommentKind::Doc
        } else {
            CommentKind::Block
        };
        self.push_comment(kind, start, line);
        Ok(())
    }

    fn ident(&mut self) {
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, ch)| !is_ident_part(ch))
            .map_or(self.rest().len(), |(idx, _)| idx);
        self.pos += len;
    }

    fn number(&mut self) -> TokenKind {
        let start = self.pos;
        let hex = self.rest().starts_with("0x") || self.rest().starts_with("0X");
        let mut prev = '\0';
        while let Some(ch) = self.peek() {
            let exponent_sign = (ch == '+' || ch == '-')
                && ((matches!(prev, 'e' | 'E') && !hex) || matches!(prev, 'p' | 'P'));
            if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' || exponent_sign) {
                break;
            }
            prev = ch;
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        if is_decimal_int(text) {
            TokenKind::IntLiteral
        } else {
            TokenKind::Literal
        }
    }

    fn string(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        if self.rest().starts_with("\"\"\"") {
            let Some(close) = self.rest()[3..].find("\"\"\"") else {
                return Err(self.unterminated(line, "text block"));
            };
            let len = close + 6;
            self.line += self.rest()[..len].matches('\n').count();
            self.pos += len;
            return Ok(());
        }
        self.quoted('"', line, "string literal")
    }

    fn char_literal(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        self.quoted('\'', line, "character literal")
    }

    fn quoted(&mut self, quote: char, line: usize, what: &'static str) -> Result<(), SyntaxError> {
        let mut chars = self.rest().char_indices().skip(1);
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                }
                '\n' => break,
                ch if ch == quote => {
                    self.pos += idx + 1;
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(self.unterminated(line, what))
    }

    fn unterminated(&self, line: usize, what: &'static str) -> SyntaxError {
        SyntaxError::Unterminated {
            path: self.path.to_path_buf(),
            line,
            what,
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// `0` or a non-zero digit followed by digits and `_` separators. A leading
/// zero makes the literal octal in Java; a trailing `_` is not a literal.
fn is_decimal_int(text: &str) -> bool {
    if text == "0" {
        return true;
    }
    let mut chars = text.chars();
    matches!(chars.next(), Some('1'..='9'))
        && !text.ends_with('_')
        && chars.all(|ch| ch.is_ascii_digit() || ch == '_')
}
