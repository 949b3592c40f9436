//! Name-template resolution.
//!
//! Templates may carry three placeholders:
//! - `{name}`: the concrete mesh name,
//! - `{side}`: the mesh's side prefix (`"L_eye_mesh"` -> `"L"`),
//! - a leading `{}`: one deformer per side, expanded to `L` then `R`.
//!
//! Resolution is pure: the same template and mesh always give the same names, which
//! is what makes existence checks usable for idempotence.

use facerig_scene_core::{expand_sides, side_prefix, SIDE_PLACEHOLDER};

pub const NAME_PLACEHOLDER: &str = "{name}";
pub const SIDE_PREFIX_PLACEHOLDER: &str = "{side}";

/// Resolve `template` against `mesh`. Side-paired templates yield two names.
pub fn resolve_names(template: &str, mesh: &str) -> Vec<String> {
    let named = template
        .replace(NAME_PLACEHOLDER, mesh)
        .replace(SIDE_PREFIX_PLACEHOLDER, side_prefix(mesh));
    expand_sides(&named)
}

/// Resolve a driver reference (wrap source, wire curve) for `mesh`.
///
/// Always a single name: a `{}` takes the mesh's own side prefix, so `L_eye_mesh`
/// is driven by `L_eyeProxy_mesh` when the source reads `{}_eyeProxy_mesh`.
pub fn resolve_source(template: &str, mesh: &str) -> String {
    let side = side_prefix(mesh);
    template
        .replace(NAME_PLACEHOLDER, mesh)
        .replace(SIDE_PREFIX_PLACEHOLDER, side)
        .replace(SIDE_PLACEHOLDER, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_templates_are_unchanged() {
        assert_eq!(resolve_names("M_jaw_ffd", "M_body_mesh"), vec!["M_jaw_ffd"]);
    }

    #[test]
    fn name_placeholder_takes_mesh() {
        assert_eq!(
            resolve_names("{name}_skinCluster", "M_body_compil_mesh"),
            vec!["M_body_compil_mesh_skinCluster"]
        );
    }

    #[test]
    fn side_placeholder_takes_mesh_prefix() {
        assert_eq!(
            resolve_names("{side}_eyelid_cluster", "R_eye_mesh"),
            vec!["R_eyelid_cluster"]
        );
    }

    #[test]
    fn side_pair_expands_left_then_right() {
        assert_eq!(
            resolve_names("{}_cheek_cluster", "M_body_mesh"),
            vec!["L_cheek_cluster", "R_cheek_cluster"]
        );
    }

    #[test]
    fn sources_follow_the_mesh_side() {
        assert_eq!(resolve_source("{}_eyeProxy_mesh", "R_eye_mesh"), "R_eyeProxy_mesh");
        assert_eq!(resolve_source("M_skull_mesh", "L_eye_mesh"), "M_skull_mesh");
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve_names("{}_{name}_wrap", "M_tongue_mesh");
        let b = resolve_names("{}_{name}_wrap", "M_tongue_mesh");
        assert_eq!(a, b);
        assert_eq!(a, vec!["L_M_tongue_mesh_wrap", "R_M_tongue_mesh_wrap"]);
    }
}
