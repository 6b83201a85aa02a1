//! Single-run project inventory
//!
//! Reads the project index and parses every flow, geometry and plan file
//! found next to it. The inventory owns all records for the run; a
//! [`Resolution`] and a [`Report`] borrow from it.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::ScanConfig;
use crate::project::{ProjectIndex, ProjectLocation};
use crate::records::{
    parse_flow_file, parse_geometry_file, parse_plan_file, FlowRecord, GeomRecord, Keyed,
    PlanRecord, RecordSet,
};
use crate::report::Report;
use crate::resolve::{resolve, Resolution};
use crate::scan::scan_project;
use crate::{Error, Result};

/// Everything read from disk for one project
#[derive(Debug, Clone)]
pub struct Inventory {
    pub location: ProjectLocation,
    pub index: ProjectIndex,
    pub flows: RecordSet<FlowRecord>,
    pub geometries: RecordSet<GeomRecord>,
    pub plans: RecordSet<PlanRecord>,
    /// Files skipped as malformed (only with `skip_malformed`)
    pub skipped: Vec<PathBuf>,
}

impl Inventory {
    /// Read the index and parse all project files
    ///
    /// A missing index aborts the run. A malformed record file aborts the
    /// run too unless `scan.skip_malformed` is set, in which case it is
    /// logged and left out.
    pub fn collect(location: ProjectLocation, scan: &ScanConfig) -> Result<Self> {
        let index = ProjectIndex::read(&location.index_path)?;
        let files = scan_project(&location)?;

        let mut skipped = Vec::new();
        let flows = parse_all(&files.flows, parse_flow_file, scan, &mut skipped)?;
        let geometries = parse_all(&files.geometries, parse_geometry_file, scan, &mut skipped)?;
        let plans = parse_all(&files.plans, parse_plan_file, scan, &mut skipped)?;

        Ok(Self {
            location,
            index,
            flows,
            geometries,
            plans,
            skipped,
        })
    }

    /// Cross-reference plans against flows and geometries
    pub fn resolve(&self) -> Result<Resolution<'_>> {
        resolve(&self.index, &self.flows, &self.geometries, &self.plans)
    }

    /// Resolve and assemble the report in one step
    pub fn report(&self) -> Result<Report> {
        Ok(Report::assemble(&self.resolve()?))
    }
}

fn parse_all<T, F>(
    paths: &[PathBuf],
    parse: F,
    scan: &ScanConfig,
    skipped: &mut Vec<PathBuf>,
) -> Result<RecordSet<T>>
where
    T: Keyed,
    F: Fn(&Path) -> Result<T>,
{
    let mut records = RecordSet::new();

    for path in paths {
        let record = match parse(path) {
            Ok(record) => record,
            Err(e @ Error::MalformedRecordFile { .. }) if scan.skip_malformed => {
                warn!("Skipping {}", e);
                skipped.push(path.clone());
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Some(previous) = records.insert(record) {
            warn!(
                key = previous.key(),
                path = %path.display(),
                "Duplicate file key, keeping the later file"
            );
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordKind;
    use crate::report::{Cell, Column};
    use crate::test_support::{flow_text, geom_text, plan_text, prj_text, write};

    fn project(dir: &Path) -> ProjectLocation {
        ProjectLocation::resolve(&dir.join("Styx.prj")).unwrap()
    }

    #[test]
    fn test_collect_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        write(d, "Styx.prj", &prj_text("Styx", &["g01"], &["u01"], &["p01"]));
        write(d, "Styx.u01", &flow_text("100yr", Some("Design storm")));
        write(d, "Styx.g01", &geom_text("Existing", None));
        write(d, "Styx.g02", &geom_text("Levee Alt", Some("Raised")));
        write(d, "Styx.p01", &plan_text("Existing 100yr", "Ex100", "g01", "u01", &["Base"]));

        let inventory = Inventory::collect(project(d), &ScanConfig::default()).unwrap();
        assert_eq!(inventory.flows.len(), 1);
        assert_eq!(inventory.geometries.len(), 2);
        assert_eq!(inventory.plans.len(), 1);

        let report = inventory.report().unwrap();
        assert_eq!(report.len(), 2);

        let plan_row = &report.rows[0];
        assert_eq!(plan_row[Column::PlanKey], Cell::from("p01"));
        assert_eq!(plan_row[Column::PlanDescription], Cell::from("Base"));
        assert_eq!(plan_row[Column::FlowDescription], Cell::from("Design storm"));
        assert_eq!(plan_row[Column::GeomDescription], Cell::from("-"));
        assert_eq!(plan_row[Column::PlanInProject], Cell::Flag(true));
        assert_eq!(plan_row[Column::GeomInProject], Cell::Flag(true));
        assert_eq!(plan_row[Column::FlowInProject], Cell::Flag(true));

        let orphan = &report.rows[1];
        assert_eq!(orphan[Column::GeomKey], Cell::from("g02"));
        assert_eq!(orphan[Column::GeomInProject], Cell::Flag(false));
        assert_eq!(orphan[Column::PlanKey], Cell::Placeholder);
        assert_eq!(orphan[Column::PlanInProject], Cell::Placeholder);
    }

    #[test]
    fn test_missing_index_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Styx.u01", &flow_text("100yr", None));

        let err = Inventory::collect(project(dir.path()), &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingIndexFile { .. }));
    }

    #[test]
    fn test_unresolved_flow_reference() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        write(d, "Styx.prj", &prj_text("Styx", &["g01"], &["u99"], &["p01"]));
        write(d, "Styx.g01", &geom_text("Existing", None));
        write(d, "Styx.p01", &plan_text("Ghost", "Ghost", "g01", "u99", &[]));

        let inventory = Inventory::collect(project(d), &ScanConfig::default()).unwrap();
        let err = inventory.report().unwrap_err();
        match err {
            Error::UnresolvedReference { plan, kind, key } => {
                assert_eq!(plan, "p01");
                assert_eq!(kind, RecordKind::Flow);
                assert_eq!(key, "u99");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_file_aborts_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        write(d, "Styx.prj", &prj_text("Styx", &[], &[], &[]));
        write(d, "Styx.g01", "Geom Title=Truncated\n");

        let err = Inventory::collect(project(d), &ScanConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecordFile {
                kind: RecordKind::Geometry,
                expected: 6,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_file_skipped_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        write(d, "Styx.prj", &prj_text("Styx", &[], &[], &[]));
        write(d, "Styx.g01", "Geom Title=Truncated\n");
        write(d, "Styx.g02", &geom_text("Complete", None));

        let scan = ScanConfig {
            skip_malformed: true,
        };
        let inventory = Inventory::collect(project(d), &scan).unwrap();
        assert_eq!(inventory.geometries.keys().collect::<Vec<_>>(), vec!["g02"]);
        assert_eq!(inventory.skipped, vec![d.join("Styx.g01")]);

        let report = inventory.report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.summary.unused_geometries, 1);
    }

    #[test]
    fn test_row_count_invariant() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        write(d, "Styx.prj", &prj_text("Styx", &[], &[], &[]));
        for (name, title) in [("Styx.u01", "A"), ("Styx.u02", "B"), ("Styx.f01", "C")] {
            write(d, name, &flow_text(title, None));
        }
        for name in ["Styx.g01", "Styx.g02", "Styx.g03"] {
            write(d, name, &geom_text("G", None));
        }
        write(d, "Styx.p01", &plan_text("One", "1", "g01", "u01", &[]));
        write(d, "Styx.p02", &plan_text("Two", "2", "g01", "f01", &[]));
        write(d, "Other.p03", &plan_text("Elsewhere", "3", "g02", "u02", &[]));

        let inventory = Inventory::collect(project(d), &ScanConfig::default()).unwrap();
        let resolution = inventory.resolve().unwrap();
        let report = Report::assemble(&resolution);

        let expected = inventory.plans.len()
            + (inventory.flows.len() - resolution.used.flow_keys.len())
            + (inventory.geometries.len() - resolution.used.geom_keys.len());
        assert_eq!(report.len(), expected);
        assert_eq!(report.len(), 2 + 1 + 2);
    }
}
