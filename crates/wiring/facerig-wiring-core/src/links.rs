//! Side-aware expansion of template entries into concrete plug links.

use std::fmt;

use serde::Serialize;

use facerig_scene_core::{
    expand_sides, is_side_templated, plug, side_prefix, Side, SIDE_PLACEHOLDER,
};

use crate::map::PlugTable;

/// One concrete `source -> destination` plug connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlugLink {
    pub source: String,
    pub destination: String,
}

impl PlugLink {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for PlugLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Source plugs a templated source expands to for a given destination.
///
/// A sided destination (`L_`/`R_`) pulls from the same side; a middle destination
/// (`M_`) pulls from both sides. Any other destination leaves the source as written.
fn source_plugs(source: &str, destination: &str) -> Vec<String> {
    if !is_side_templated(source) {
        return vec![source.to_string()];
    }
    match Side::of(destination) {
        Some(side) => vec![source.replacen(SIDE_PLACEHOLDER, side.prefix(), 1)],
        None if side_prefix(destination) == "M" => expand_sides(source),
        None => vec![source.to_string()],
    }
}

/// Expand one destination entry of a template into concrete links, in table order.
///
/// A destination attribute ending in `{}` takes the side of the source it is wired
/// from, so `"{}_brow_ctrl.ty": "browRaise{}"` on `M_jaw_jnt` gives `browRaiseL` and
/// `browRaiseR`.
pub fn expand_links(destination: &str, plugs: &PlugTable) -> Vec<PlugLink> {
    let mut links = Vec::new();
    for concrete in expand_sides(destination) {
        for (source, attr) in plugs {
            for source in source_plugs(source, &concrete) {
                let attr = match attr.strip_suffix(SIDE_PLACEHOLDER) {
                    Some(stem) => format!("{stem}{}", side_prefix(&source)),
                    None => attr.clone(),
                };
                links.push(PlugLink {
                    destination: plug(&concrete, &attr),
                    source,
                });
            }
        }
    }
    links
}
