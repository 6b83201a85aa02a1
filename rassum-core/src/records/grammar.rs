//! Fixed-position header grammar
//!
//! Flow, geometry and plan files all start with a header whose fields sit
//! at known line offsets behind fixed-width labels (`Flow Title=`,
//! `Short Identifier=`, ...). A [`LineGrammar`] describes one such header
//! as a table of [`FieldRule`]s plus a [`DescriptionRule`], and a single
//! reader applies it to any of the three formats.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use super::RecordKind;
use crate::{Error, Result};

/// Length of a file key ("u01", "g12", "p03")
pub const KEY_LEN: usize = 3;

/// Derive a key from the last [`KEY_LEN`] characters of a name
///
/// Names shorter than the key length are returned whole.
pub fn suffix_key(name: &str) -> String {
    let count = name.chars().count();
    name.chars().skip(count.saturating_sub(KEY_LEN)).collect()
}

/// A named header field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    ShortId,
    TimeWindow,
    /// Key of the geometry file a plan uses
    GeomRef,
    /// Key of the flow file a plan uses
    FlowRef,
}

/// How a field value is cut out of its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Everything after a label of the given width
    AfterLabel(usize),
    /// The key at the end of the line (`g01` in `Geom File=g01`)
    TrailingKey,
}

/// One entry of a grammar table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub line: usize,
    pub field: Field,
    pub extract: Extract,
}

/// Where a header keeps its free-text description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionRule {
    /// The line after `line`, if `line` starts with `marker`
    Marker { line: usize, marker: &'static str },
    /// All lines between a `begin` and an `end` marker, concatenated
    Bracket {
        begin: &'static str,
        end: &'static str,
    },
}

/// Header grammar for one file kind
#[derive(Debug, Clone, Copy)]
pub struct LineGrammar {
    pub kind: RecordKind,
    /// Number of leading lines the header must have
    pub lines: usize,
    pub fields: &'static [FieldRule],
    pub description: DescriptionRule,
}

/// Flow files (`.uNN`, `.fNN`)
pub const FLOW_GRAMMAR: LineGrammar = LineGrammar {
    kind: RecordKind::Flow,
    lines: 4,
    fields: &[FieldRule {
        line: 0,
        field: Field::Title,
        extract: Extract::AfterLabel(11),
    }],
    description: DescriptionRule::Marker {
        line: 2,
        marker: "BEGIN FILE DESCRIPTION",
    },
};

/// Geometry files (`.gNN`)
pub const GEOM_GRAMMAR: LineGrammar = LineGrammar {
    kind: RecordKind::Geometry,
    lines: 6,
    fields: &[FieldRule {
        line: 0,
        field: Field::Title,
        extract: Extract::AfterLabel(11),
    }],
    description: DescriptionRule::Marker {
        line: 4,
        marker: "BEGIN GEOM DESCRIPTION",
    },
};

/// Plan files (`<project>.pNN`)
pub const PLAN_GRAMMAR: LineGrammar = LineGrammar {
    kind: RecordKind::Plan,
    lines: 31,
    fields: &[
        FieldRule {
            line: 0,
            field: Field::Title,
            extract: Extract::AfterLabel(11),
        },
        FieldRule {
            line: 2,
            field: Field::ShortId,
            extract: Extract::AfterLabel(17),
        },
        FieldRule {
            line: 3,
            field: Field::TimeWindow,
            extract: Extract::AfterLabel(16),
        },
        FieldRule {
            line: 4,
            field: Field::GeomRef,
            extract: Extract::TrailingKey,
        },
        FieldRule {
            line: 5,
            field: Field::FlowRef,
            extract: Extract::TrailingKey,
        },
    ],
    description: DescriptionRule::Bracket {
        begin: "BEGIN DESCRIPTION",
        end: "END DESCRIPTION",
    },
};

/// Fields extracted from one header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: HashMap<Field, String>,
    description: Option<String>,
}

impl Header {
    /// Value of a field, empty if the grammar has no rule for it
    pub fn field(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Move a field value out of the header
    pub fn take(&mut self, field: Field) -> String {
        self.fields.remove(&field).unwrap_or_default()
    }

    /// Description text, or "-" when the header has none
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(crate::report::PLACEHOLDER)
    }
}

impl LineGrammar {
    /// Read the header lines and extract its fields
    pub fn read<R: BufRead>(&self, reader: R, path: &Path) -> Result<Header> {
        let lines = self.read_lines(reader, path)?;
        Ok(self.apply(&lines))
    }

    /// Read exactly `self.lines` trimmed lines
    ///
    /// Invalid UTF-8 is replaced, not rejected.
    pub fn read_lines<R: BufRead>(&self, mut reader: R, path: &Path) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.lines);
        let mut buf = Vec::new();

        while lines.len() < self.lines {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Err(Error::MalformedRecordFile {
                    path: path.to_path_buf(),
                    kind: self.kind,
                    expected: self.lines,
                    found: lines.len(),
                });
            }
            lines.push(String::from_utf8_lossy(&buf).trim().to_string());
        }

        Ok(lines)
    }

    /// Apply the grammar table to already-read lines
    pub fn apply(&self, lines: &[String]) -> Header {
        let fields = self
            .fields
            .iter()
            .map(|rule| {
                let line = lines.get(rule.line).map(String::as_str).unwrap_or("");
                let value = match rule.extract {
                    Extract::AfterLabel(width) => line.chars().skip(width).collect(),
                    Extract::TrailingKey => suffix_key(line),
                };
                (rule.field, value)
            })
            .collect();

        let description = match self.description {
            DescriptionRule::Marker { line, marker } => lines
                .get(line)
                .filter(|l| l.starts_with(marker))
                .and_then(|_| lines.get(line + 1))
                // A blank line after the marker means no description
                .filter(|d| !d.is_empty())
                .cloned(),
            DescriptionRule::Bracket { begin, end } => bracketed(lines, begin, end),
        };

        Header {
            fields,
            description,
        }
    }
}

/// Concatenate the lines strictly between `begin` and `end` markers
fn bracketed(lines: &[String], begin: &str, end: &str) -> Option<String> {
    let mut description: Option<String> = None;
    let mut inside = false;

    for line in lines {
        if line.starts_with(end) {
            inside = false;
        }
        if inside && !line.is_empty() {
            description.get_or_insert_with(String::new).push_str(line);
        }
        if line.starts_with(begin) {
            inside = true;
        }
    }

    description
}
