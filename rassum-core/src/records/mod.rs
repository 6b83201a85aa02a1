//! Flow, geometry and plan records
//!
//! Each record is extracted from the fixed-position header of one file.
//! The three formats share a single line-grammar parser (`grammar`),
//! configured per kind with a small table of field rules.

mod grammar;
mod parser;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use grammar::{
    suffix_key, DescriptionRule, Extract, Field, FieldRule, Header, LineGrammar, FLOW_GRAMMAR,
    GEOM_GRAMMAR, KEY_LEN, PLAN_GRAMMAR,
};
pub use parser::{
    file_key, format_timestamp, modified_timestamp, parse_flow_file, parse_geometry_file,
    parse_plan_file,
};

/// The kind of project file a record was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Steady (`.fNN`) or unsteady (`.uNN`) flow file
    Flow,
    /// Geometry file (`.gNN`)
    Geometry,
    /// Plan file (`<project>.pNN`)
    Plan,
}

impl RecordKind {
    /// Get the short name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Flow => "flow",
            RecordKind::Geometry => "geometry",
            RecordKind::Plan => "plan",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A flow or geometry file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Three-character suffix key (e.g. "u03", "g01")
    pub key: String,
    /// Title from the first header line
    pub title: String,
    /// Description, or "-" when the file has none
    pub description: String,
    /// Last modification time, `YYYY-MM-DD HH:MM`
    pub modified: String,
}

/// Flow file record
pub type FlowRecord = DatasetRecord;

/// Geometry file record
pub type GeomRecord = DatasetRecord;

/// A plan file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Three-character suffix key (e.g. "p01")
    pub key: String,
    pub title: String,
    pub short_id: String,
    /// Concatenated description block, or "-"
    pub description: String,
    pub time_window: String,
    /// Last modification time, `YYYY-MM-DD HH:MM`
    pub modified: String,
    /// Key of the geometry file this plan runs on
    pub geom_key: String,
    /// Key of the flow file this plan runs on
    pub flow_key: String,
}

/// Records that carry a suffix key
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for DatasetRecord {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for PlanRecord {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Records of one kind, keyed by suffix and kept in discovery order
#[derive(Debug, Clone)]
pub struct RecordSet<T> {
    records: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T: Keyed> RecordSet<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Insert a record
    ///
    /// A record whose key is already present replaces the earlier one in
    /// place and the replaced record is returned.
    pub fn insert(&mut self, record: T) -> Option<T> {
        match self.positions.get(record.key()) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.positions
                    .insert(record.key().to_string(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Keyed::key)
    }
}

impl<T: Keyed> Default for RecordSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for RecordSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a, T> IntoIterator for &'a RecordSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
