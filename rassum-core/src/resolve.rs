//! Cross-reference resolution
//!
//! Links every plan to the flow and geometry records it names, tracks
//! which flow/geometry keys some plan uses, and collects the rest as
//! orphans. Each record is also checked against the project index by its
//! own key.

use std::collections::HashSet;

use tracing::info;

use crate::project::ProjectIndex;
use crate::records::{DatasetRecord, FlowRecord, GeomRecord, PlanRecord, RecordKind, RecordSet};
use crate::{Error, Result};

/// A plan joined to its flow and geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlan<'a> {
    pub plan: &'a PlanRecord,
    pub flow: &'a FlowRecord,
    pub geometry: &'a GeomRecord,
    pub plan_active: bool,
    pub geom_active: bool,
    pub flow_active: bool,
}

/// A flow or geometry file that no plan references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan<'a> {
    pub record: &'a DatasetRecord,
    /// Listed in the project index despite being unused
    pub active: bool,
}

/// Keys referenced by at least one plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedSets {
    pub flow_keys: HashSet<String>,
    pub geom_keys: HashSet<String>,
}

/// Outcome of resolving a project's plans
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// Plans in discovery order
    pub plans: Vec<ResolvedPlan<'a>>,
    /// Unused flows in discovery order
    pub orphan_flows: Vec<Orphan<'a>>,
    /// Unused geometries in discovery order
    pub orphan_geometries: Vec<Orphan<'a>>,
    pub used: UsedSets,
    pub flow_count: usize,
    pub geometry_count: usize,
}

/// Resolve plan references and compute orphans
///
/// Fails with [`Error::UnresolvedReference`] on the first plan whose flow
/// or geometry key has no parsed record.
pub fn resolve<'a>(
    index: &ProjectIndex,
    flows: &'a RecordSet<FlowRecord>,
    geometries: &'a RecordSet<GeomRecord>,
    plans: &'a RecordSet<PlanRecord>,
) -> Result<Resolution<'a>> {
    let mut used = UsedSets::default();
    let mut resolved = Vec::with_capacity(plans.len());

    for plan in plans {
        let geometry = lookup(geometries, plan, RecordKind::Geometry, &plan.geom_key)?;
        let flow = lookup(flows, plan, RecordKind::Flow, &plan.flow_key)?;

        used.geom_keys.insert(geometry.key.clone());
        used.flow_keys.insert(flow.key.clone());

        resolved.push(ResolvedPlan {
            plan,
            flow,
            geometry,
            plan_active: index.is_active(RecordKind::Plan, &plan.key),
            geom_active: index.is_active(RecordKind::Geometry, &geometry.key),
            flow_active: index.is_active(RecordKind::Flow, &flow.key),
        });
    }

    let orphan_flows = orphans(index, flows, &used.flow_keys, RecordKind::Flow);
    let orphan_geometries = orphans(index, geometries, &used.geom_keys, RecordKind::Geometry);

    info!(
        plans = resolved.len(),
        flows = flows.len(),
        unused_flows = orphan_flows.len(),
        geometries = geometries.len(),
        unused_geometries = orphan_geometries.len(),
        "Resolved project references"
    );

    Ok(Resolution {
        plans: resolved,
        orphan_flows,
        orphan_geometries,
        used,
        flow_count: flows.len(),
        geometry_count: geometries.len(),
    })
}

fn lookup<'a>(
    records: &'a RecordSet<DatasetRecord>,
    plan: &PlanRecord,
    kind: RecordKind,
    key: &str,
) -> Result<&'a DatasetRecord> {
    records.get(key).ok_or_else(|| Error::UnresolvedReference {
        plan: plan.key.clone(),
        kind,
        key: key.to_string(),
    })
}

fn orphans<'a>(
    index: &ProjectIndex,
    records: &'a RecordSet<DatasetRecord>,
    used: &HashSet<String>,
    kind: RecordKind,
) -> Vec<Orphan<'a>> {
    records
        .iter()
        .filter(|r| !used.contains(&r.key))
        .map(|record| Orphan {
            record,
            active: index.is_active(kind, &record.key),
        })
        .collect()
}
