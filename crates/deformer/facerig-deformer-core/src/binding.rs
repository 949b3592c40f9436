//! Per-call bindings between concrete meshes, their specs and the live graph.

use facerig_scene_core::{expand_sides, DeformerKind, GraphError, HistoryEntry, SceneQuery};

use crate::naming::resolve_names;
use crate::spec::DeformerSpec;

/// Resolve a target id to concrete target names (side expansion only).
pub fn concrete_targets(target: &str) -> Vec<String> {
    expand_sides(target)
}

/// Meshes to reconcile for one existing concrete target: its transform children when
/// it is a group, otherwise the target itself.
pub fn target_meshes<Q: SceneQuery + ?Sized>(graph: &Q, concrete: &str) -> Vec<String> {
    let children = graph.list_children(concrete);
    if children.is_empty() {
        vec![concrete.to_string()]
    } else {
        children
    }
}

/// One resolved deformer name bound to the stack entry it came from.
#[derive(Debug, Clone)]
pub struct BoundDeformer<'s> {
    pub spec: &'s DeformerSpec,
    pub name: String,
    /// Position in declaration order across the whole stack.
    pub ordinal: usize,
}

/// A concrete mesh with its stack resolved against it.
#[derive(Debug, Clone)]
pub struct TargetBinding<'s> {
    pub mesh: String,
    pub entries: Vec<BoundDeformer<'s>>,
}

impl<'s> TargetBinding<'s> {
    pub fn bind(mesh: &str, specs: &'s [DeformerSpec]) -> Self {
        let entries = specs
            .iter()
            .flat_map(|spec| {
                resolve_names(&spec.name_template, mesh)
                    .into_iter()
                    .map(move |name| (spec, name))
            })
            .enumerate()
            .map(|(ordinal, (spec, name))| BoundDeformer {
                spec,
                name,
                ordinal,
            })
            .collect();
        Self {
            mesh: mesh.to_string(),
            entries,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Live snapshot of a mesh's deformer chain, nearest-to-shape first.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDeformerState {
    pub mesh: String,
    pub chain: Vec<HistoryEntry>,
}

impl ExternalDeformerState {
    pub fn query<Q: SceneQuery + ?Sized>(graph: &Q, mesh: &str) -> Result<Self, GraphError> {
        let chain = graph.deformer_history(mesh, &[])?;
        Ok(Self {
            mesh: mesh.to_string(),
            chain,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chain.iter().any(|entry| entry.name == name)
    }

    pub fn of_kind(&self, kind: &DeformerKind) -> Vec<&str> {
        self.chain
            .iter()
            .filter(|entry| &entry.kind == kind)
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Record a deformer the current pass put on the mesh.
    pub fn note_applied(&mut self, name: &str, kind: DeformerKind) {
        if !self.contains(name) {
            self.chain.push(HistoryEntry {
                name: name.to_string(),
                kind,
            });
        }
    }
}
