//! Report writers
//!
//! The assembled [`Report`] is written as an xlsx worksheet table, as CSV
//! (one header row, flags as `True`/`False`) or as a JSON array of objects
//! keyed by column header.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{ColNum, RowNum, Table, TableColumn, TableStyle, Workbook};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::report::{headers, Cell, Column, Report, PLACEHOLDER};
use crate::Result;

/// Name of the worksheet holding the report table
pub const SHEET_NAME: &str = "sheet1";

/// Physical format of the written report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Writer for this format
    pub fn writer(&self) -> Box<dyn ReportWriter> {
        match self {
            OutputFormat::Xlsx => Box::new(XlsxReportWriter),
            OutputFormat::Csv => Box::new(CsvReportWriter),
            OutputFormat::Json => Box::new(JsonReportWriter { pretty: true }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {} (expected xlsx, csv or json)", s)),
        }
    }
}

/// Writes a report to a byte sink
pub trait ReportWriter {
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> Result<()>;
}

/// A single-sheet workbook with the report laid out as a styled table
///
/// Flags become boolean cells, so the spreadsheet can filter on them.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    /// Build the workbook in memory
    pub fn workbook(&self, report: &Report) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (i, row) in report.rows.iter().enumerate() {
            let r = (i + 1) as RowNum;
            for (c, cell) in row.cells().iter().enumerate() {
                let c = c as ColNum;
                match cell {
                    Cell::Text(text) => sheet.write_string(r, c, text)?,
                    Cell::Flag(flag) => sheet.write_boolean(r, c, *flag)?,
                    Cell::Placeholder => sheet.write_string(r, c, PLACEHOLDER)?,
                };
            }
        }

        // A table needs at least one body row
        let last_row = report.len().max(1) as RowNum;
        let last_col = (Column::COUNT - 1) as ColNum;
        let columns: Vec<TableColumn> = headers()
            .map(|h| TableColumn::new().set_header(h))
            .collect();
        let table = Table::new()
            .set_columns(&columns)
            .set_style(TableStyle::Medium9);
        sheet.add_table(0, 0, last_row, last_col, &table)?;
        sheet.autofit();

        Ok(workbook)
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        let bytes = self.workbook(report)?.save_to_buffer()?;
        out.write_all(&bytes)?;
        Ok(())
    }
}

/// Comma-separated output with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportWriter;

impl ReportWriter for CsvReportWriter {
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(headers())?;
        for row in &report.rows {
            writer.write_record(row.cells().iter().map(|c| c.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// JSON array of row objects
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportWriter {
    pub pretty: bool,
}

impl ReportWriter for JsonReportWriter {
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &report.rows)?;
        } else {
            serde_json::to_writer(&mut *out, &report.rows)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Default report file name, e.g. `Styx Project Summary_2024-03-01_1530.xlsx`
pub fn default_file_name(base_name: &str, format: OutputFormat, now: DateTime<Local>) -> String {
    format!(
        "{} Project Summary_{}.{}",
        base_name,
        now.format("%Y-%m-%d_%H%M"),
        format.extension()
    )
}

/// Default report path inside `dir`, stamped with the current time
pub fn default_output_path(dir: &Path, base_name: &str, format: OutputFormat) -> PathBuf {
    dir.join(default_file_name(base_name, format, Local::now()))
}

/// Write a report to a file in the given format
pub fn write_report_file(report: &Report, format: OutputFormat, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    format.writer().write_report(report, &mut out)?;
    out.flush()?;

    info!(path = %path.display(), format = %format, rows = report.len(), "Wrote report");
    Ok(())
}
