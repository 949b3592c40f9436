use serde::Serialize;
use thiserror::Error;

/// Conditions reported by a reconciliation or normalization pass.
///
/// None of these abort a batch. `AmbiguousSkinCluster` stops work on the mesh it was
/// found on; every other condition is isolated to one target or one spec.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum ReconcileError {
    #[error("target '{target}' does not exist")]
    MissingTarget { target: String },
    #[error("no deformer kind for '{name}': suffix '{suffix}' has no association")]
    UnresolvableKind {
        key: String,
        name: String,
        suffix: String,
    },
    #[error("failed to apply '{name}': {reason}")]
    CreationFailure {
        key: String,
        name: String,
        reason: String,
    },
    #[error("failed to rename '{from}' to '{to}': {reason}")]
    RenameFailure {
        from: String,
        to: String,
        reason: String,
    },
    #[error("expected one skinCluster on '{mesh}', found {}", .found.join(", "))]
    AmbiguousSkinCluster { mesh: String, found: Vec<String> },
}

impl ReconcileError {
    /// Whether the condition stops all further work on its mesh.
    pub fn halts_mesh(&self) -> bool {
        matches!(self, ReconcileError::AmbiguousSkinCluster { .. })
    }
}
