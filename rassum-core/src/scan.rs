//! Project directory scanning
//!
//! Finds the flow, geometry and plan files that sit next to a project
//! descriptor. Files are matched by extension: a kind letter followed by
//! two digits (`.u01`, `.f02`, `.g03`, `.p04`). Plan files must also share
//! the descriptor's base name. Quasi-unsteady (`.qNN`) and other
//! extensions are not collected.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::project::ProjectLocation;
use crate::records::RecordKind;
use crate::Result;

/// Project files found on disk, each list in directory order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFiles {
    pub flows: Vec<PathBuf>,
    pub geometries: Vec<PathBuf>,
    pub plans: Vec<PathBuf>,
}

impl ProjectFiles {
    /// Number of project files found, all kinds together
    pub fn total(&self) -> usize {
        self.flows.len() + self.geometries.len() + self.plans.len()
    }
}

/// Classify a file name as a project file of some kind
pub fn classify(file_name: &str, base_name: &str) -> Option<RecordKind> {
    let (stem, ext) = file_name.rsplit_once('.')?;

    let mut chars = ext.chars();
    let letter = chars.next()?;
    let digits: Vec<char> = chars.collect();
    if digits.len() != 2 || !digits.iter().all(char::is_ascii_digit) {
        return None;
    }

    match letter {
        'u' | 'f' => Some(RecordKind::Flow),
        'g' => Some(RecordKind::Geometry),
        'p' if stem == base_name => Some(RecordKind::Plan),
        _ => None,
    }
}

/// List the project files in the project directory
pub fn scan_project(location: &ProjectLocation) -> Result<ProjectFiles> {
    scan_dir(&location.dir, &location.base_name)
}

/// List the project files for `base_name` in `dir`
pub fn scan_dir(dir: &Path, base_name: &str) -> Result<ProjectFiles> {
    let mut files = ProjectFiles::default();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(kind) = classify(&name.to_string_lossy(), base_name) else {
            continue;
        };

        let list = match kind {
            RecordKind::Flow => &mut files.flows,
            RecordKind::Geometry => &mut files.geometries,
            RecordKind::Plan => &mut files.plans,
        };
        list.push(entry.path());
    }

    debug!(
        dir = %dir.display(),
        flows = files.flows.len(),
        geometries = files.geometries.len(),
        plans = files.plans.len(),
        total = files.total(),
        "Scanned project directory"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_classify_flow_files() {
        assert_eq!(classify("Styx.u01", "Styx"), Some(RecordKind::Flow));
        assert_eq!(classify("Other.f12", "Styx"), Some(RecordKind::Flow));
    }

    #[test]
    fn test_classify_geometry_files() {
        assert_eq!(classify("Styx.g01", "Styx"), Some(RecordKind::Geometry));
        assert_eq!(classify("Old Model.g99", "Styx"), Some(RecordKind::Geometry));
    }

    #[test]
    fn test_classify_plans_require_project_name() {
        assert_eq!(classify("Styx.p01", "Styx"), Some(RecordKind::Plan));
        assert_eq!(classify("Acheron.p01", "Styx"), None);
        assert_eq!(classify("My.Model.p02", "My.Model"), Some(RecordKind::Plan));
    }

    #[test]
    fn test_classify_rejects_other_files() {
        assert_eq!(classify("Styx.prj", "Styx"), None);
        assert_eq!(classify("Styx.q01", "Styx"), None);
        assert_eq!(classify("Styx.u1", "Styx"), None);
        assert_eq!(classify("Styx.u001", "Styx"), None);
        assert_eq!(classify("Styx.g01.hdf", "Styx"), None);
        assert_eq!(classify("Styx.uab", "Styx"), None);
        assert_eq!(classify("noext", "Styx"), None);
    }

    #[test]
    fn test_scan_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "Styx.prj",
            "Styx.u01",
            "Styx.f02",
            "Styx.g01",
            "Styx.g02",
            "Styx.p01",
            "Acheron.p02",
            "Styx.q01",
            "Styx.p01.hdf",
        ] {
            write(dir.path(), name, "");
        }
        std::fs::create_dir(dir.path().join("backup.g03")).unwrap();

        let files = scan_dir(dir.path(), "Styx").unwrap();
        assert_eq!(names(&files.flows), vec!["Styx.f02", "Styx.u01"]);
        assert_eq!(names(&files.geometries), vec!["Styx.g01", "Styx.g02"]);
        assert_eq!(names(&files.plans), vec!["Styx.p01"]);
        assert_eq!(files.total(), 5);
    }
}
