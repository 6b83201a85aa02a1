//! Flow, geometry and plan file parsers

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tracing::debug;

use super::grammar::{
    suffix_key, Field, Header, LineGrammar, FLOW_GRAMMAR, GEOM_GRAMMAR, PLAN_GRAMMAR,
};
use super::{DatasetRecord, FlowRecord, GeomRecord, PlanRecord};
use crate::Result;

/// Timestamp layout used for every modification time in the report
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Key of a project file, taken from the end of its file name
pub fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|name| suffix_key(&name.to_string_lossy()))
        .unwrap_or_default()
}

/// Format a filesystem time in local time as `YYYY-MM-DD HH:MM`
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Last modification time of a file, formatted for the report
pub fn modified_timestamp(path: &Path) -> Result<String> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(format_timestamp(modified))
}

/// Parse a steady or unsteady flow file header
pub fn parse_flow_file(path: &Path) -> Result<FlowRecord> {
    parse_dataset(path, &FLOW_GRAMMAR)
}

/// Parse a geometry file header
pub fn parse_geometry_file(path: &Path) -> Result<GeomRecord> {
    parse_dataset(path, &GEOM_GRAMMAR)
}

/// Parse a plan file header
pub fn parse_plan_file(path: &Path) -> Result<PlanRecord> {
    let mut header = read_header(path, &PLAN_GRAMMAR)?;

    let record = PlanRecord {
        key: file_key(path),
        title: header.take(Field::Title),
        short_id: header.take(Field::ShortId),
        description: header.description().to_string(),
        time_window: header.take(Field::TimeWindow),
        modified: modified_timestamp(path)?,
        geom_key: header.take(Field::GeomRef),
        flow_key: header.take(Field::FlowRef),
    };

    debug!(
        plan = %record.key,
        geometry = %record.geom_key,
        flow = %record.flow_key,
        "Parsed plan file"
    );
    Ok(record)
}

fn parse_dataset(path: &Path, grammar: &LineGrammar) -> Result<DatasetRecord> {
    let mut header = read_header(path, grammar)?;

    let record = DatasetRecord {
        key: file_key(path),
        title: header.take(Field::Title),
        description: header.description().to_string(),
        modified: modified_timestamp(path)?,
    };

    debug!(kind = %grammar.kind, key = %record.key, "Parsed file header");
    Ok(record)
}

/// Open a file and read its header; the handle is dropped on return
fn read_header(path: &Path, grammar: &LineGrammar) -> Result<Header> {
    let file = File::open(path)?;
    grammar.read(BufReader::new(file), path)
}
