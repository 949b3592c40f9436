//! facerig-deformer-core: declarative deformer stacks for facial rigs.
//!
//! A [`RigConfig`] maps target ids to ordered [`DeformerSpec`] stacks. The
//! [`Reconciler`] walks each target's meshes in a host graph and applies only what is
//! missing, so a build can be re-run over a partially built rig:
//!
//! ```
//! use facerig_deformer::{DeformerSpec, Reconciler, RigConfig, SuffixTable};
//! use facerig_scene_core::MemoryScene;
//!
//! let config = RigConfig::new(SuffixTable::standard()).with_stack(
//!     "M_body_mesh",
//!     vec![DeformerSpec::new("{name}_cluster"), DeformerSpec::new("M_jaw_ffd")],
//! );
//! let reconciler = Reconciler::new(config);
//! let mut scene = MemoryScene::new();
//! scene.add_mesh("M_body_mesh", None);
//!
//! let first = reconciler.build(&mut scene);
//! assert_eq!(first.applied_count(), 2);
//! let second = reconciler.build(&mut scene);
//! assert_eq!(second.applied_count(), 0);
//! assert_eq!(second.skipped_count(), 2);
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod naming;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod spec;
pub mod suffix;
pub mod tables;

pub use binding::{BoundDeformer, ExternalDeformerState, TargetBinding};
pub use config::{ConfigError, RigConfig, RigConfigFile, SkinBindDefaults};
pub use error::ReconcileError;
pub use naming::{resolve_names, resolve_source};
pub use reconcile::Reconciler;
pub use report::{
    Action, AppliedDeformer, BuildReport, MeshReport, RenameReport, SkippedDeformer, TargetReport,
};
pub use spec::{DeformerParameters, DeformerSpec, SkinParameters, SourceParameters, StackEntry};
pub use suffix::{SuffixAssociation, SuffixTable};

pub use facerig_scene_core::{ChainInsertion, DeformerKind, SceneGraph, SceneQuery};
