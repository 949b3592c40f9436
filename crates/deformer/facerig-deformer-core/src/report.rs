//! Structured results of reconciliation passes.
//!
//! Reports list entries in stack declaration order, whatever order the host needed
//! them applied in.

use serde::Serialize;

use facerig_scene_core::DeformerKind;

use crate::error::ReconcileError;

/// How a missing deformer was brought onto a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A new deformer node was created on the mesh.
    Created,
    /// An existing deformer was extended to deform the mesh.
    Attached,
    /// An existing skinCluster received the entry's joints as influences.
    InfluencesAdded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedDeformer {
    pub key: String,
    pub name: String,
    pub kind: DeformerKind,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDeformer {
    pub key: String,
    pub name: String,
}

/// Outcome of reconciling one concrete mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshReport {
    pub mesh: String,
    pub applied: Vec<AppliedDeformer>,
    pub skipped: Vec<SkippedDeformer>,
    pub failures: Vec<ReconcileError>,
    /// Set when an ambiguity stopped the mesh before any mutation.
    pub halted: bool,
}

impl MeshReport {
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            ..Default::default()
        }
    }

    pub fn applied_names(&self) -> Vec<&str> {
        self.applied.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.halted
    }
}

/// Outcome of reconciling one target id (one or two sides, each possibly a group).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub meshes: Vec<MeshReport>,
    /// Target-level conditions (missing concrete targets).
    pub failures: Vec<ReconcileError>,
}

impl TargetReport {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn mesh(&self, mesh: &str) -> Option<&MeshReport> {
        self.meshes.iter().find(|m| m.mesh == mesh)
    }

    /// Every reported condition, target-level first.
    pub fn all_failures(&self) -> impl Iterator<Item = &ReconcileError> {
        self.failures
            .iter()
            .chain(self.meshes.iter().flat_map(|m| m.failures.iter()))
    }

    pub fn applied_count(&self) -> usize {
        self.meshes.iter().map(|m| m.applied.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.meshes.iter().map(|m| m.skipped.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.meshes.iter().all(MeshReport::is_clean)
    }
}

/// Outcome of a full build over every configured stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    pub targets: Vec<TargetReport>,
}

impl BuildReport {
    pub fn target(&self, target: &str) -> Option<&TargetReport> {
        self.targets.iter().find(|t| t.target == target)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReconcileError> {
        self.targets.iter().flat_map(TargetReport::all_failures)
    }

    pub fn applied_count(&self) -> usize {
        self.targets.iter().map(TargetReport::applied_count).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.targets.iter().map(TargetReport::skipped_count).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.targets.iter().all(TargetReport::is_clean)
    }
}

/// Outcome of a name normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenameReport {
    /// `(old, new)` pairs, in the order they were applied.
    pub renamed: Vec<(String, String)>,
    pub failures: Vec<ReconcileError>,
}
