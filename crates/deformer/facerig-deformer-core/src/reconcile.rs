//! Deformer stack reconciliation.
//!
//! For every concrete mesh of a target the reconciler snapshots the live deformer
//! chain, binds the stack's name templates to the mesh, and applies only the entries
//! that are missing. Existing deformers are never deleted, renamed or reordered, so a
//! second pass over the same graph applies nothing.

use log::{debug, info, warn};
use thiserror::Error;

use facerig_scene_core::{
    plug, AttrValue, ChainInsertion, CreateDeformer, DeformerKind, GraphError, SceneGraph,
};

use crate::binding::{
    concrete_targets, target_meshes, BoundDeformer, ExternalDeformerState, TargetBinding,
};
use crate::config::RigConfig;
use crate::error::ReconcileError;
use crate::naming::resolve_source;
use crate::report::{
    Action, AppliedDeformer, BuildReport, MeshReport, SkippedDeformer, TargetReport,
};
use crate::spec::{DeformerSpec, SourceParameters};
use crate::tables::{ENVELOPE, SHRINK_WRAP_ATTRIBUTES, SHRINK_WRAP_CONNECTIONS, WRAP_ATTRIBUTES};

/// Why a single entry could not be applied. Surfaced as the reason of a
/// [`ReconcileError::CreationFailure`].
#[derive(Debug, Error)]
enum ApplyError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("{kind} requires {expected}")]
    MissingParameters {
        kind: DeformerKind,
        expected: &'static str,
    },
    #[error("'{name}' exists as a {found}, expected a {expected}")]
    KindMismatch {
        name: String,
        expected: DeformerKind,
        found: DeformerKind,
    },
    #[error("'{0}' exists and is not a deformer")]
    NameTaken(String),
    #[error("source '{0}' has no shape")]
    NoSourceShape(String),
}

pub struct Reconciler {
    config: RigConfig,
}

impl Reconciler {
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Reconcile every configured stack, in configuration order.
    pub fn build<G: SceneGraph + ?Sized>(&self, graph: &mut G) -> BuildReport {
        let targets: Vec<TargetReport> = self
            .config
            .stacks()
            .map(|(target, specs)| self.reconcile(graph, target, specs))
            .collect();
        let report = BuildReport { targets };
        info!(
            "build finished: {} applied, {} skipped, {} failures",
            report.applied_count(),
            report.skipped_count(),
            report.failures().count()
        );
        report
    }

    /// Bring every concrete mesh of `target` into agreement with `specs`.
    pub fn reconcile<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        target: &str,
        specs: &[DeformerSpec],
    ) -> TargetReport {
        let mut report = TargetReport::new(target);
        for concrete in concrete_targets(target) {
            if !graph.exists(&concrete) {
                warn!("skipping '{concrete}': target does not exist");
                report
                    .failures
                    .push(ReconcileError::MissingTarget { target: concrete });
                continue;
            }
            for mesh in target_meshes(graph, &concrete) {
                report.meshes.push(self.reconcile_mesh(graph, &mesh, specs));
            }
        }
        report
    }

    fn reconcile_mesh<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        mesh: &str,
        specs: &[DeformerSpec],
    ) -> MeshReport {
        let mut report = MeshReport::new(mesh);
        let mut state = match ExternalDeformerState::query(graph, mesh) {
            Ok(state) => state,
            Err(err) => {
                warn!("skipping '{mesh}': {err}");
                report.failures.push(ReconcileError::MissingTarget {
                    target: mesh.to_string(),
                });
                return report;
            }
        };
        let binding = TargetBinding::bind(mesh, specs);

        if let Some(ambiguity) = self.skin_ambiguity(&binding, &state) {
            warn!("halting '{mesh}': {ambiguity}");
            report.halted = ambiguity.halts_mesh();
            report.failures.push(ambiguity);
            return report;
        }

        let walk: Vec<&BoundDeformer<'_>> = match graph.chain_insertion() {
            ChainInsertion::NearestShape => binding.entries.iter().rev().collect(),
            ChainInsertion::FarthestShape => binding.entries.iter().collect(),
        };

        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        let mut failures = Vec::new();
        for entry in walk {
            if state.contains(&entry.name) {
                debug!("'{}' already deforms '{mesh}'", entry.name);
                skipped.push((
                    entry.ordinal,
                    SkippedDeformer {
                        key: entry.spec.key.clone(),
                        name: entry.name.clone(),
                    },
                ));
                continue;
            }
            let Some(kind) = self.config.resolve_kind(entry.spec) else {
                let error = ReconcileError::UnresolvableKind {
                    key: entry.spec.key.clone(),
                    name: entry.name.clone(),
                    suffix: entry.spec.suffix.clone(),
                };
                warn!("{error}");
                failures.push((entry.ordinal, error));
                continue;
            };
            match self.apply(graph, mesh, entry, &kind) {
                Ok(action) => {
                    info!("{action:?} {kind} '{}' on '{mesh}'", entry.name);
                    state.note_applied(&entry.name, kind.clone());
                    applied.push((
                        entry.ordinal,
                        AppliedDeformer {
                            key: entry.spec.key.clone(),
                            name: entry.name.clone(),
                            kind,
                            action,
                        },
                    ));
                }
                Err(err) => {
                    let error = ReconcileError::CreationFailure {
                        key: entry.spec.key.clone(),
                        name: entry.name.clone(),
                        reason: err.to_string(),
                    };
                    warn!("{error}");
                    failures.push((entry.ordinal, error));
                }
            }
        }

        report.applied = in_declaration_order(applied);
        report.skipped = in_declaration_order(skipped);
        report.failures = in_declaration_order(failures);
        debug!(
            "'{mesh}': {} applied, {} skipped, {} failures",
            report.applied.len(),
            report.skipped.len(),
            report.failures.len()
        );
        report
    }

    /// A stack that declares a skinCluster cannot be reconciled against a mesh that
    /// already carries several.
    fn skin_ambiguity(
        &self,
        binding: &TargetBinding<'_>,
        state: &ExternalDeformerState,
    ) -> Option<ReconcileError> {
        let declares_skin = binding
            .entries
            .iter()
            .any(|e| self.config.resolve_kind(e.spec) == Some(DeformerKind::SkinCluster));
        if !declares_skin {
            return None;
        }
        let found = state.of_kind(&DeformerKind::SkinCluster);
        (found.len() > 1).then(|| ReconcileError::AmbiguousSkinCluster {
            mesh: state.mesh.clone(),
            found: found.into_iter().map(str::to_string).collect(),
        })
    }

    fn apply<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        mesh: &str,
        entry: &BoundDeformer<'_>,
        kind: &DeformerKind,
    ) -> Result<Action, ApplyError> {
        let name = entry.name.as_str();
        match graph.deformer_kind(name) {
            Some(found) if found != *kind => Err(ApplyError::KindMismatch {
                name: name.to_string(),
                expected: kind.clone(),
                found,
            }),
            Some(DeformerKind::SkinCluster) => {
                graph.attach_geometry(name, mesh)?;
                let Some(skin) = entry.spec.parameters.skin() else {
                    return Ok(Action::Attached);
                };
                graph.add_influence(name, &skin.joints)?;
                graph.set_attribute(name, ENVELOPE, AttrValue::Float(skin.envelope))?;
                Ok(Action::InfluencesAdded)
            }
            Some(_) => {
                graph.attach_geometry(name, mesh)?;
                Ok(Action::Attached)
            }
            None if graph.exists(name) => Err(ApplyError::NameTaken(name.to_string())),
            None => {
                self.create(graph, mesh, entry, kind)?;
                Ok(Action::Created)
            }
        }
    }

    fn create<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        mesh: &str,
        entry: &BoundDeformer<'_>,
        kind: &DeformerKind,
    ) -> Result<(), ApplyError> {
        let request = CreateDeformer::new(kind.clone(), entry.name.as_str(), mesh);
        let parameters = &entry.spec.parameters;
        match kind {
            DeformerKind::SkinCluster => {
                let skin = parameters
                    .skin()
                    .ok_or_else(|| ApplyError::MissingParameters {
                        kind: kind.clone(),
                        expected: "joints",
                    })?;
                let bind = self
                    .config
                    .skin_bind()
                    .bind(skin.joints.clone(), skin.use_hierarchy);
                let created = graph.create_deformer(&request.with_skin(bind))?;
                graph.set_attribute(&created, ENVELOPE, AttrValue::Float(skin.envelope))?;
            }
            DeformerKind::Wrap | DeformerKind::ProximityWrap | DeformerKind::ShrinkWrap => {
                let source = parameters
                    .source()
                    .ok_or_else(|| ApplyError::MissingParameters {
                        kind: kind.clone(),
                        expected: "a source",
                    })?;
                let driver = resolve_source(&source.source, mesh);
                let created = graph.create_deformer(&request.with_driver(driver.as_str()))?;
                match kind {
                    DeformerKind::Wrap => write_table(graph, &created, WRAP_ATTRIBUTES, source)?,
                    DeformerKind::ShrinkWrap => {
                        write_table(graph, &created, SHRINK_WRAP_ATTRIBUTES, source)?;
                        connect_topology(graph, &created, &driver)?;
                    }
                    _ => write_table(graph, &created, &[], source)?,
                }
            }
            _ => {
                let request = match parameters.source() {
                    Some(source) => request.with_driver(resolve_source(&source.source, mesh)),
                    None => request,
                };
                let created = graph.create_deformer(&request)?;
                if let Some(source) = parameters.source() {
                    write_table(graph, &created, &[], source)?;
                }
            }
        }
        Ok(())
    }
}

/// Write a fixed attribute table, letting the entry's overrides win, then any
/// override the table does not name.
fn write_table<G: SceneGraph + ?Sized>(
    graph: &mut G,
    node: &str,
    table: &[(&str, i64)],
    source: &SourceParameters,
) -> Result<(), GraphError> {
    for (attr, default) in table {
        let value = source
            .attributes
            .get(*attr)
            .cloned()
            .unwrap_or(AttrValue::Int(*default));
        graph.set_attribute(node, attr, value)?;
    }
    for (attr, value) in &source.attributes {
        if !table.iter().any(|(name, _)| *name == attr.as_str()) {
            graph.set_attribute(node, attr, value.clone())?;
        }
    }
    Ok(())
}

fn connect_topology<G: SceneGraph + ?Sized>(
    graph: &mut G,
    shrink_wrap: &str,
    source: &str,
) -> Result<(), ApplyError> {
    let shape = graph
        .list_shapes(source)
        .into_iter()
        .next()
        .ok_or_else(|| ApplyError::NoSourceShape(source.to_string()))?;
    for (src_attr, dst_attr) in SHRINK_WRAP_CONNECTIONS {
        graph.connect(&plug(&shape, src_attr), &plug(shrink_wrap, dst_attr))?;
    }
    Ok(())
}

fn in_declaration_order<T>(mut entries: Vec<(usize, T)>) -> Vec<T> {
    entries.sort_by_key(|(ordinal, _)| *ordinal);
    entries.into_iter().map(|(_, entry)| entry).collect()
}
