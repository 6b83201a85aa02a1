//! rassum core - project file inventory and cross-reference reports
//!
//! Reads a river-model project descriptor and the flow, geometry and plan
//! files next to it, links every plan to the flow and geometry it uses,
//! and reports flows and geometries no plan references.

pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod project;
pub mod records;
pub mod report;
pub mod resolve;
pub mod scan;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{Error, Result};
pub use export::{write_report_file, OutputFormat, ReportWriter};
pub use inventory::Inventory;
pub use project::{ProjectIndex, ProjectLocation};
pub use records::{DatasetRecord, FlowRecord, GeomRecord, PlanRecord, RecordKind, RecordSet};
pub use report::{Cell, Column, Report, ReportRow, ReportSummary, PLACEHOLDER};
pub use resolve::{resolve, Resolution};
