//! Report assembly
//!
//! Flattens a [`Resolution`] into rows over a fixed 17-column schema:
//! one row per plan in discovery order, then one per unused flow, then one
//! per unused geometry. Cells a row has no value for hold the placeholder.

use std::fmt;
use std::ops::Index;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::records::DatasetRecord;
use crate::resolve::{Orphan, Resolution, ResolvedPlan};

/// Value shown for absent fields
pub const PLACEHOLDER: &str = "-";

/// Report columns, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PlanKey,
    PlanTitle,
    PlanShortId,
    PlanDescription,
    TimeRange,
    PlanModified,
    FlowKey,
    FlowTitle,
    FlowDescription,
    FlowModified,
    GeomKey,
    GeomTitle,
    GeomDescription,
    GeomModified,
    PlanInProject,
    GeomInProject,
    FlowInProject,
}

impl Column {
    pub const COUNT: usize = 17;

    /// All columns in output order
    pub const ALL: [Column; Column::COUNT] = [
        Column::PlanKey,
        Column::PlanTitle,
        Column::PlanShortId,
        Column::PlanDescription,
        Column::TimeRange,
        Column::PlanModified,
        Column::FlowKey,
        Column::FlowTitle,
        Column::FlowDescription,
        Column::FlowModified,
        Column::GeomKey,
        Column::GeomTitle,
        Column::GeomDescription,
        Column::GeomModified,
        Column::PlanInProject,
        Column::GeomInProject,
        Column::FlowInProject,
    ];

    /// Header text for this column
    pub fn header(&self) -> &'static str {
        match self {
            Column::PlanKey => "Plan #",
            Column::PlanTitle => "Plan Title",
            Column::PlanShortId => "Plan ShortID",
            Column::PlanDescription => "Plan Descr",
            Column::TimeRange => "Time Range",
            Column::PlanModified => "Plan Mod Time",
            Column::FlowKey => "Load #",
            Column::FlowTitle => "Load Name",
            Column::FlowDescription => "Load Descr",
            Column::FlowModified => "Flow Mod Time",
            Column::GeomKey => "Geom #",
            Column::GeomTitle => "Geom Name",
            Column::GeomDescription => "Geom Descr",
            Column::GeomModified => "Geom Mod Time",
            Column::PlanInProject => "Plan in .prj?",
            Column::GeomInProject => "Geom in .prj?",
            Column::FlowInProject => "Flow in .prj?",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Header texts in output order
pub fn headers() -> impl Iterator<Item = &'static str> {
    Column::ALL.into_iter().map(|c| c.header())
}

/// One report value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Flag(bool),
    #[default]
    Placeholder,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Flag(true) => write!(f, "True"),
            Cell::Flag(false) => write!(f, "False"),
            Cell::Placeholder => write!(f, "{}", PLACEHOLDER),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Flag(b) => serializer.serialize_bool(*b),
            Cell::Placeholder => serializer.serialize_str(PLACEHOLDER),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Flag(b)
    }
}

/// One report row, a mapping from every column to a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    cells: [Cell; Column::COUNT],
}

impl ReportRow {
    /// Row for a plan and the records it uses
    pub fn plan(resolved: &ResolvedPlan<'_>) -> Self {
        let plan = resolved.plan;
        let mut row = Self::default();
        row.set(Column::PlanKey, plan.key.as_str());
        row.set(Column::PlanTitle, plan.title.as_str());
        row.set(Column::PlanShortId, plan.short_id.as_str());
        row.set(Column::PlanDescription, plan.description.as_str());
        row.set(Column::TimeRange, plan.time_window.as_str());
        row.set(Column::PlanModified, plan.modified.as_str());
        row.set_flow(resolved.flow, resolved.flow_active);
        row.set_geometry(resolved.geometry, resolved.geom_active);
        row.set(Column::PlanInProject, resolved.plan_active);
        row
    }

    /// Row for a flow no plan uses
    pub fn orphan_flow(orphan: &Orphan<'_>) -> Self {
        let mut row = Self::default();
        row.set_flow(orphan.record, orphan.active);
        row
    }

    /// Row for a geometry no plan uses
    pub fn orphan_geometry(orphan: &Orphan<'_>) -> Self {
        let mut row = Self::default();
        row.set_geometry(orphan.record, orphan.active);
        row
    }

    pub fn get(&self, column: Column) -> &Cell {
        &self.cells[column.position()]
    }

    /// `(header, cell)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Cell)> {
        Column::ALL
            .into_iter()
            .zip(self.cells.iter())
            .map(|(c, cell)| (c.header(), cell))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn set(&mut self, column: Column, value: impl Into<Cell>) {
        self.cells[column.position()] = value.into();
    }

    fn set_flow(&mut self, flow: &DatasetRecord, active: bool) {
        self.set(Column::FlowKey, flow.key.as_str());
        self.set(Column::FlowTitle, flow.title.as_str());
        self.set(Column::FlowDescription, flow.description.as_str());
        self.set(Column::FlowModified, flow.modified.as_str());
        self.set(Column::FlowInProject, active);
    }

    fn set_geometry(&mut self, geometry: &DatasetRecord, active: bool) {
        self.set(Column::GeomKey, geometry.key.as_str());
        self.set(Column::GeomTitle, geometry.title.as_str());
        self.set(Column::GeomDescription, geometry.description.as_str());
        self.set(Column::GeomModified, geometry.modified.as_str());
        self.set(Column::GeomInProject, active);
    }
}

impl Index<Column> for ReportRow {
    type Output = Cell;

    fn index(&self, column: Column) -> &Cell {
        self.get(column)
    }
}

impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::COUNT))?;
        for (header, cell) in self.iter() {
            map.serialize_entry(header, cell)?;
        }
        map.end()
    }
}

/// Counts printed after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub plans: usize,
    pub flows: usize,
    pub unused_flows: usize,
    pub geometries: usize,
    pub unused_geometries: usize,
}

/// The assembled report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

impl Report {
    /// Flatten a resolution into report rows
    pub fn assemble(resolution: &Resolution<'_>) -> Self {
        let rows = resolution
            .plans
            .iter()
            .map(ReportRow::plan)
            .chain(resolution.orphan_flows.iter().map(ReportRow::orphan_flow))
            .chain(
                resolution
                    .orphan_geometries
                    .iter()
                    .map(ReportRow::orphan_geometry),
            )
            .collect();

        Self {
            rows,
            summary: ReportSummary {
                plans: resolution.plans.len(),
                flows: resolution.flow_count,
                unused_flows: resolution.orphan_flows.len(),
                geometries: resolution.geometry_count,
                unused_geometries: resolution.orphan_geometries.len(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
