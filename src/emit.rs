//! JSON rendering and output publishing.
//!
//! The artifact is compared byte for byte against a checked-in reference, so
//! the layout is fixed: four-space indentation, `": "` between key and value,
//! `[]` for empty arrays, `/` escaped as `\/`, and no trailing newline.
use crate::model::MetadataDocument;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Pretty printer matching the reference artifact's string escaping.
struct ReferenceFormatter {
    inner: PrettyFormatter<'static>,
}

impl ReferenceFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for ReferenceFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut pieces = fragment.split('/');
        if let Some(head) = pieces.next() {
            writer.write_all(head.as_bytes())?;
        }
        for piece in pieces {
            writer.write_all(b"\\/")?;
            writer.write_all(piece.as_bytes())?;
        }
        Ok(())
    }
}

pub fn render_document(document: &MetadataDocument) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, ReferenceFormatter::new());
    document
        .serialize(&mut serializer)
        .context("serialize metadata")?;
    String::from_utf8(buf).context("metadata is not valid UTF-8")
}

/// Replaces `path` with `contents` via a sibling temporary file.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("publish {}", path.display()))?;
    Ok(())
}
