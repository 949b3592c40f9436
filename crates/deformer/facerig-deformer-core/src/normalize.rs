//! Deformer name normalization.
//!
//! Meshes imported from older builds carry skinClusters and clusters named by hand.
//! Normalization renames them to the names the configured stacks would give them, so
//! weight files and later reconciliation passes find them by name.

use log::{debug, info, warn};

use facerig_scene_core::{name_suffix, side_prefix, DeformerKind, SceneGraph};

use crate::binding::{concrete_targets, target_meshes};
use crate::error::ReconcileError;
use crate::naming::resolve_names;
use crate::reconcile::Reconciler;
use crate::report::RenameReport;
use crate::spec::DeformerSpec;

/// Kinds whose names are brought to the canonical suffix.
const NORMALIZED_KINDS: [DeformerKind; 3] = [
    DeformerKind::Cluster,
    DeformerKind::Lattice,
    DeformerKind::SkinCluster,
];

impl Reconciler {
    /// Rename deformers on every configured mesh to their expected names.
    ///
    /// SkinClusters are renamed first, to the name the stack's skinCluster template
    /// resolves to. A side-paired template names the skinCluster of the matching side,
    /// and meshes of neither side are left alone. A mesh carrying more than one
    /// skinCluster is reported and left alone. Every cluster, lattice and skinCluster
    /// whose trailing token is not a suffix of its kind then gets the kind's canonical
    /// suffix.
    pub fn normalize_names<G: SceneGraph + ?Sized>(&self, graph: &mut G) -> RenameReport {
        let mut report = RenameReport::default();
        for (target, specs) in self.config().stacks() {
            for concrete in concrete_targets(target) {
                if !graph.exists(&concrete) {
                    debug!("normalize: '{concrete}' does not exist");
                    continue;
                }
                for mesh in target_meshes(graph, &concrete) {
                    self.normalize_skin_cluster(graph, &mesh, specs, &mut report);
                    self.normalize_suffixes(graph, &mesh, &mut report);
                }
            }
        }
        info!("normalized {} deformer names", report.renamed.len());
        report
    }

    fn skin_template<'s>(&self, specs: &'s [DeformerSpec]) -> Option<&'s DeformerSpec> {
        specs
            .iter()
            .find(|spec| self.config().resolve_kind(spec) == Some(DeformerKind::SkinCluster))
    }

    fn normalize_skin_cluster<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        mesh: &str,
        specs: &[DeformerSpec],
        report: &mut RenameReport,
    ) {
        let Some(spec) = self.skin_template(specs) else {
            return;
        };
        let Some(expected) = skin_name(&spec.name_template, mesh) else {
            debug!("normalize: no skinCluster name for '{mesh}'");
            return;
        };
        let found: Vec<String> = match graph.deformer_history(mesh, &[DeformerKind::SkinCluster])
        {
            Ok(history) => history.into_iter().map(|entry| entry.name).collect(),
            Err(err) => {
                warn!("normalize: cannot list '{mesh}': {err}");
                return;
            }
        };
        match found.as_slice() {
            [] => {}
            [only] if *only == expected => {}
            [only] => rename(graph, only, &expected, report),
            _ => {
                let error = ReconcileError::AmbiguousSkinCluster {
                    mesh: mesh.to_string(),
                    found: found.clone(),
                };
                warn!("{error}");
                report.failures.push(error);
            }
        }
    }

    fn normalize_suffixes<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        mesh: &str,
        report: &mut RenameReport,
    ) {
        let history = match graph.deformer_history(mesh, &NORMALIZED_KINDS) {
            Ok(history) => history,
            Err(err) => {
                warn!("normalize: cannot list '{mesh}': {err}");
                return;
            }
        };
        let suffixes = self.config().suffixes();
        for entry in history {
            let current = name_suffix(&entry.name);
            if suffixes.kind_for(current) == Some(&entry.kind) {
                continue;
            }
            let Some(canonical) = suffixes.suffix_for(&entry.kind) else {
                continue;
            };
            let stem = match entry.name.rsplit_once('_') {
                Some((stem, _)) => stem,
                None => entry.name.as_str(),
            };
            let renamed = format!("{stem}_{canonical}");
            rename(graph, &entry.name, &renamed, report);
        }
    }
}

/// The single skinCluster name `template` gives `mesh`. Of a side pair, only the name
/// on the mesh's own side qualifies.
fn skin_name(template: &str, mesh: &str) -> Option<String> {
    let mut names = resolve_names(template, mesh);
    if names.len() == 1 {
        return names.pop();
    }
    let prefix = format!("{}_", side_prefix(mesh));
    names.into_iter().find(|name| name.starts_with(&prefix))
}

fn rename<G: SceneGraph + ?Sized>(
    graph: &mut G,
    from: &str,
    to: &str,
    report: &mut RenameReport,
) {
    match graph.rename(from, to) {
        Ok(given) => {
            info!("renamed '{from}' to '{given}'");
            report.renamed.push((from.to_string(), given));
        }
        Err(err) => {
            let error = ReconcileError::RenameFailure {
                from: from.to_string(),
                to: to.to_string(),
                reason: err.to_string(),
            };
            warn!("{error}");
            report.failures.push(error);
        }
    }
}
