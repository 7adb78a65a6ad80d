//! Documentation comment model.
//!
//! A comment splits into a description (text plus inline `{@tag ...}`
//! elements) and an ordered list of block tags. The description ends at the
//! first line that starts with `@`.
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionElement {
    Text(String),
    InlineTag { name: String, content: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub elements: Vec<DescriptionElement>,
}

impl Description {
    fn parse(text: &str) -> Self {
        let mut elements = Vec::new();
        let mut rest = text;
        while let Some(open) = rest.find("{@") {
            let Some(close) = rest[open..].find('}').map(|idx| open + idx) else {
                break;
            };
            if open > 0 {
                elements.push(DescriptionElement::Text(rest[..open].to_string()));
            }
            let inner = &rest[open + 2..close];
            let name = next_word(inner);
            elements.push(DescriptionElement::InlineTag {
                name: name.to_string(),
                content: inner[name.len()..].to_string(),
            });
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            elements.push(DescriptionElement::Text(rest.to_string()));
        }
        Self { elements }
    }

    /// Description text with inline tags reproduced as written.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                DescriptionElement::Text(text) => out.push_str(text),
                DescriptionElement::InlineTag { name, content } => {
                    out.push_str("{@");
                    out.push_str(name);
                    out.push_str(content);
                    out.push('}');
                }
            }
        }
        out
    }

    /// First blank-line separated paragraph, if it has any text.
    pub fn first_paragraph(&self) -> Option<String> {
        let text = self.to_text();
        let first = text.split("\n\n").next().unwrap_or_default();
        (!first.is_empty()).then(|| first.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTag {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Javadoc {
    pub description: Description,
    pub block_tags: Vec<BlockTag>,
}

impl Javadoc {
    /// Parses the text between `/**` and `*/`.
    pub fn parse(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n");
        let lines = clean_lines(&normalized);
        let first_block = lines.iter().position(|line| line.trim().starts_with('@'));
        let (description_lines, block_lines) = match first_block {
            Some(idx) => lines.split_at(idx),
            None => (lines.as_slice(), &[][..]),
        };

        let description = description_lines.join("\n");
        let description = Description::parse(description.trim_end());

        let block_section = block_lines.join("\n");
        let block_tags = block_start()
            .split(&block_section)
            .filter(|piece| !piece.is_empty())
            .map(parse_block_tag)
            .collect();

        Self {
            description,
            block_tags,
        }
    }

    /// Contents of every block tag called `name`, in written order.
    pub fn tag_values<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.block_tags
            .iter()
            .filter(move |tag| tag.name == name)
            .map(|tag| tag.content.as_str())
    }
}

/// Short label for a documented constant: the first description paragraph
/// when it is a single line of at most `max_len` characters, else `identifier`.
pub fn display_name(doc: &Javadoc, identifier: &str, max_len: usize) -> String {
    match doc.description.first_paragraph() {
        Some(paragraph) if !paragraph.contains('\n') && paragraph.chars().count() <= max_len => {
            paragraph
        }
        _ => identifier.to_string(),
    }
}

fn block_start() -> &'static Regex {
    static BLOCK_START: OnceLock<Regex> = OnceLock::new();
    BLOCK_START.get_or_init(|| Regex::new(r"(?m)^\s*@").expect("valid block tag pattern"))
}

fn parse_block_tag(piece: &str) -> BlockTag {
    let line = piece.trim();
    let name = next_word(line);
    BlockTag {
        name: name.to_string(),
        content: line[name.len()..].trim().to_string(),
    }
}

fn next_word(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|&(_, ch)| ch.is_whitespace())
        .map_or(text.len(), |(idx, _)| idx);
    &text[..end]
}

/// Strips the leading `*` decoration and surrounding blank lines.
fn clean_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content
        .split('\n')
        .map(strip_decoration)
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.to_string()
            }
        })
        .collect();

    if let Some(first) = lines.first_mut() {
        if first.starts_with(' ') || first.starts_with('\t') {
            first.remove(0);
        }
    }
    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines
}

fn strip_decoration(line: &str) -> &str {
    let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
    let rest = &line[indent..];
    let Some(after_star) = rest.strip_prefix('*') else {
        return line;
    };
    after_star
        .strip_prefix([' ', '\t'])
        .unwrap_or(after_star)
}
