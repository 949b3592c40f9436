//! facerig-wiring-core: template connection maps for facial rig scenes.
//!
//! Template scenes (joints, controllers, lattices, ...) are built separately and wired
//! together afterwards. A [`ConnectionMap`] describes that wiring per template section
//! with side placeholders; [`connect_templates`] expands and connects it on a host
//! graph and [`capture_template`] records it back from a wired scene.

pub mod capture;
pub mod links;
pub mod map;
pub mod wire;

pub use capture::capture_template;
pub use links::{expand_links, PlugLink};
pub use map::{ConnectionMap, PlugTable, TemplateConnections};
pub use wire::{connect_templates, FailedLink, WiringError, WiringReport};
