//! Host scene-graph capability.
//!
//! The host application owns the node graph; facerig only ever talks to it through
//! [`SceneQuery`] (reads) and [`SceneGraph`] (mutations). Host adapters implement both.
//! [`MemoryScene`](crate::memory::MemoryScene) is the in-memory implementation used by
//! tests and tooling.
//!
//! Every call is a blocking round-trip. Implementations are not expected to be
//! thread-safe; exclusive access for the duration of a pass is expressed by `&mut`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attr::AttrValue;
use crate::kind::DeformerKind;

/// Errors reported by a host graph.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GraphError {
    #[error("node '{0}' does not exist")]
    MissingNode(String),
    #[error("node '{0}' already exists")]
    NameClash(String),
    #[error("plug '{0}' is not valid")]
    InvalidPlug(String),
    #[error("{operation} rejected on '{node}': {reason}")]
    Rejected {
        operation: String,
        node: String,
        reason: String,
    },
}

impl GraphError {
    pub fn rejected(
        operation: impl Into<String>,
        node: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GraphError::Rejected {
            operation: operation.into(),
            node: node.into(),
            reason: reason.into(),
        }
    }
}

/// One deformer in a mesh's history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub kind: DeformerKind,
}

/// Where the host places a newly created deformer in an existing chain.
///
/// History listings are always nearest-to-shape first. A host inserting new deformers
/// next to the shape (the default) needs stacks applied last-to-first to end up in
/// declaration order; a host appending at the far end needs them applied first-to-last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainInsertion {
    #[default]
    NearestShape,
    FarthestShape,
}

/// Fixed skin binding options passed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinBind {
    pub joints: Vec<String>,
    /// Bind to the joints' whole hierarchy rather than to the listed joints only.
    pub use_hierarchy: bool,
    pub bind_method: u8,
    pub max_influences: u32,
    pub normalize_weights: u8,
    pub obey_max_influences: bool,
}

/// Request to create one deformer node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDeformer {
    pub kind: DeformerKind,
    pub name: String,
    /// Geometry the deformer is attached to.
    pub targets: Vec<String>,
    /// Driving geometry or curve (wrap sources, wire curves).
    pub driver: Option<String>,
    pub skin: Option<SkinBind>,
}

impl CreateDeformer {
    pub fn new(kind: DeformerKind, name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            targets: vec![target.into()],
            driver: None,
            skin: None,
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    pub fn with_skin(mut self, skin: SkinBind) -> Self {
        self.skin = Some(skin);
        self
    }
}

/// Read access to the host graph.
pub trait SceneQuery {
    fn exists(&self, name: &str) -> bool;

    /// Deformers affecting `mesh`, nearest-to-shape first.
    /// An empty `kinds` filter lists every deformer.
    fn deformer_history(
        &self,
        mesh: &str,
        kinds: &[DeformerKind],
    ) -> Result<Vec<HistoryEntry>, GraphError>;

    /// Kind of a deformer node, or `None` when `name` is not a deformer.
    fn deformer_kind(&self, name: &str) -> Option<DeformerKind>;

    /// Transform children of `node`; shape nodes are not listed.
    fn list_children(&self, node: &str) -> Vec<String>;

    fn list_shapes(&self, node: &str) -> Vec<String>;

    /// Incoming connections of `node` as `(source_plug, destination_plug)` pairs.
    fn incoming_connections(&self, node: &str) -> Vec<(String, String)>;

    fn chain_insertion(&self) -> ChainInsertion {
        ChainInsertion::NearestShape
    }
}

/// Mutating access to the host graph.
pub trait SceneGraph: SceneQuery {
    /// Create a deformer and return the name the host gave it.
    fn create_deformer(&mut self, request: &CreateDeformer) -> Result<String, GraphError>;

    fn add_influence(&mut self, skin_cluster: &str, joints: &[String]) -> Result<(), GraphError>;

    /// Add `mesh` to the geometry deformed by an existing deformer.
    fn attach_geometry(&mut self, deformer: &str, mesh: &str) -> Result<(), GraphError>;

    fn set_attribute(&mut self, node: &str, attr: &str, value: AttrValue)
        -> Result<(), GraphError>;

    /// Connect two plugs, replacing any existing input on `dst_plug`.
    fn connect(&mut self, src_plug: &str, dst_plug: &str) -> Result<(), GraphError>;

    fn rename(&mut self, old: &str, new: &str) -> Result<String, GraphError>;
}
