//! Fixture builders for project files used across the crate's tests

use std::path::Path;

/// Time window written into every fixture plan
pub const TIME_WINDOW: &str = "01JAN2020,0000,05JAN2020,0000";

/// Lines a plan header is padded to, comfortably above the 31 required
const PLAN_LINES: usize = 36;

/// A flow file header, with or without a description block
pub fn flow_text(title: &str, description: Option<&str>) -> String {
    let mut lines = vec![
        format!("Flow Title={title}"),
        "Program Version=6.30".to_string(),
    ];
    match description {
        Some(d) => {
            lines.push("BEGIN FILE DESCRIPTION:".to_string());
            lines.push(d.to_string());
            lines.push("END FILE DESCRIPTION:".to_string());
        }
        None => {
            lines.push("Use Restart= 0".to_string());
            lines.push("Boundary Location=Styx,Upper,1000,,,,,,".to_string());
        }
    }
    lines.push("Interval=1HOUR".to_string());
    join(lines)
}

/// A geometry file header, with or without a description block
pub fn geom_text(title: &str, description: Option<&str>) -> String {
    let mut lines = vec![
        format!("Geom Title={title}"),
        "Program Version=6.30".to_string(),
        "Viewing Rectangle= 0 , 1000 , 1000 , 0".to_string(),
        String::new(),
    ];
    match description {
        Some(d) => {
            lines.push("BEGIN GEOM DESCRIPTION:".to_string());
            lines.push(d.to_string());
            lines.push("END GEOM DESCRIPTION:".to_string());
        }
        None => {
            lines.push("River Reach=Styx,Upper".to_string());
            lines.push("Reach XY= 2".to_string());
        }
    }
    join(lines)
}

/// A plan file header referencing `geom` and `flow`
///
/// An empty `description` omits the description block entirely.
pub fn plan_text(
    title: &str,
    short_id: &str,
    geom: &str,
    flow: &str,
    description: &[&str],
) -> String {
    let mut lines = vec![
        format!("Plan Title={title}"),
        "Program Version=6.30".to_string(),
        format!("Short Identifier={short_id}"),
        format!("Simulation Date={TIME_WINDOW}"),
        format!("Geom File={geom}"),
        format!("Flow File={flow}"),
    ];
    if !description.is_empty() {
        lines.push("BEGIN DESCRIPTION:".to_string());
        lines.extend(description.iter().map(|d| d.to_string()));
        lines.push("END DESCRIPTION:".to_string());
    }
    let mut filler = 0;
    while lines.len() < PLAN_LINES {
        filler += 1;
        lines.push(format!("Run Option {filler}= 0"));
    }
    join(lines)
}

/// A project descriptor listing the given active files
pub fn prj_text(title: &str, geoms: &[&str], flows: &[&str], plans: &[&str]) -> String {
    let mut lines = vec![format!("Proj Title={title}"), "English Units".to_string()];
    lines.extend(geoms.iter().map(|g| format!("Geom File={g}")));
    lines.extend(flows.iter().map(|u| format!("Unsteady File={u}")));
    lines.extend(plans.iter().map(|p| format!("Plan File={p}")));
    lines.push("Y Axis Title=Elevation".to_string());
    join(lines)
}

/// Write a file into a fixture directory
pub fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn join(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
