//! facerig-scene-core: host scene-graph capability shared by the facerig crates.
//!
//! The host application's node graph is reached only through the [`SceneQuery`] and
//! [`SceneGraph`] traits. [`MemoryScene`] is an in-memory implementation for tests,
//! fixtures and offline tooling.

pub mod attr;
pub mod graph;
pub mod kind;
pub mod memory;
pub mod side;

pub use attr::{plug, split_plug, AttrValue};
pub use graph::{
    ChainInsertion, CreateDeformer, GraphError, HistoryEntry, SceneGraph, SceneQuery, SkinBind,
};
pub use kind::{DeformerKind, KindParseError};
pub use memory::{MemoryScene, NodeRole, SceneDescription, SceneEdit};
pub use side::{
    expand_sides, is_side_templated, name_suffix, side_prefix, templatize, with_side, Side,
    SIDE_PLACEHOLDER,
};
