//! Project location and the project descriptor index

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::records::{suffix_key, RecordKind};
use crate::{Error, Result};

/// Extension of the project descriptor
pub const PROJECT_EXTENSION: &str = "prj";

const GEOM_TAG: &str = "Geom File";
const PLAN_TAG: &str = "Plan File";
const FLOW_TAG: &str = "Unsteady File";

/// Where a project lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Directory holding the descriptor and its plan/flow/geometry files
    pub dir: PathBuf,
    /// Descriptor file name without extension; plan files share it
    pub base_name: String,
    /// Path of the `.prj` descriptor
    pub index_path: PathBuf,
}

impl ProjectLocation {
    /// Resolve a project from a `.prj` path or a project directory
    ///
    /// A directory is taken to hold a descriptor named after itself, so
    /// `models/Styx` resolves to `models/Styx/Styx.prj`. The descriptor's
    /// existence is checked when the index is read.
    pub fn resolve(path: &Path) -> Result<Self> {
        if path.extension().is_some_and(|ext| ext == PROJECT_EXTENSION) {
            let base_name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| Error::ProjectNotFound(path.to_path_buf()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            return Ok(Self {
                dir,
                base_name,
                index_path: path.to_path_buf(),
            });
        }

        if path.is_dir() {
            let dir = path.canonicalize()?;
            let base_name = dir
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| Error::ProjectNotFound(path.to_path_buf()))?;
            let index_path = dir.join(format!("{}.{}", base_name, PROJECT_EXTENSION));
            return Ok(Self {
                dir,
                base_name,
                index_path,
            });
        }

        Err(Error::ProjectNotFound(path.to_path_buf()))
    }

    /// File name of the descriptor (e.g. `Styx.prj`)
    pub fn index_file_name(&self) -> String {
        format!("{}.{}", self.base_name, PROJECT_EXTENSION)
    }
}

/// Files declared active in the project descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectIndex {
    pub active_plans: HashSet<String>,
    pub active_geoms: HashSet<String>,
    pub active_flows: HashSet<String>,
}

impl ProjectIndex {
    /// Read the project descriptor
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::MissingIndexFile {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::parse(&String::from_utf8_lossy(&bytes));

        debug!(
            path = %path.display(),
            plans = index.active_plans.len(),
            geometries = index.active_geoms.len(),
            flows = index.active_flows.len(),
            "Read project index"
        );
        Ok(index)
    }

    /// Parse descriptor text
    ///
    /// Lines tagged `Geom File`, `Plan File` or `Unsteady File` contribute
    /// the key at their end; every other line is ignored.
    pub fn parse(content: &str) -> Self {
        let mut index = Self::default();

        for line in content.lines() {
            let line = line.trim();
            let set = if line.starts_with(GEOM_TAG) {
                &mut index.active_geoms
            } else if line.starts_with(PLAN_TAG) {
                &mut index.active_plans
            } else if line.starts_with(FLOW_TAG) {
                &mut index.active_flows
            } else {
                continue;
            };
            set.insert(suffix_key(line));
        }

        index
    }

    /// Whether a file of the given kind is listed in the descriptor
    pub fn is_active(&self, kind: RecordKind, key: &str) -> bool {
        match kind {
            RecordKind::Flow => self.active_flows.contains(key),
            RecordKind::Geometry => self.active_geoms.contains(key),
            RecordKind::Plan => self.active_plans.contains(key),
        }
    }
}
