use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;

use crate::projection::ProjectedRecord;

/// Layout of the written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStyle {
    /// spaces per nesting level
    pub indent: usize,
    /// escape everything outside printable ASCII as `\uXXXX`
    pub ascii_only: bool,
}

impl Default for JsonStyle {
    fn default() -> Self {
        Self {
            indent: 4,
            ascii_only: true,
        }
    }
}

/// Pretty formatter that additionally escapes non-printable-ASCII text.
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    // serde_json has already escaped quotes, backslashes and C0 controls;
    // fragments only hold the remaining text.
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (pos, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..pos])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = pos + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize the document as a pretty-printed JSON array. No trailing newline.
pub fn render_document(
    records: &[ProjectedRecord],
    style: &JsonStyle,
) -> serde_json::Result<Vec<u8>> {
    let indent = " ".repeat(style.indent);
    let pretty = PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();

    if style.ascii_only {
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, AsciiFormatter { inner: pretty });
        records.serialize(&mut ser)?;
    } else {
        let mut ser = serde_json::Serializer::with_formatter(&mut out, pretty);
        records.serialize(&mut ser)?;
    }
    Ok(out)
}
