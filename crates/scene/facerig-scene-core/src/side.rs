//! Side templating helpers.
//!
//! Rig identifiers follow `<side>_<body part>_<suffix>` where side is `L`, `R` or `M`.
//! A leading `{}` marks an identifier that exists once per side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder token standing for a side prefix.
pub const SIDE_PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    L,
    R,
}

impl Side {
    /// Both mirrored sides, in expansion order.
    pub const BOTH: [Side; 2] = [Side::L, Side::R];

    pub fn prefix(self) -> &'static str {
        match self {
            Side::L => "L",
            Side::R => "R",
        }
    }

    /// The side a name belongs to, from its `L_` / `R_` prefix.
    pub fn of(name: &str) -> Option<Side> {
        match side_prefix(name) {
            "L" => Some(Side::L),
            "R" => Some(Side::R),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

pub fn is_side_templated(id: &str) -> bool {
    id.starts_with(SIDE_PLACEHOLDER)
}

/// Substitute the side placeholder in `id`.
pub fn with_side(id: &str, side: Side) -> String {
    id.replace(SIDE_PLACEHOLDER, side.prefix())
}

/// Expand a side-templated identifier into its `L` and `R` forms.
/// Identifiers without the leading placeholder are returned unchanged.
pub fn expand_sides(id: &str) -> Vec<String> {
    if is_side_templated(id) {
        Side::BOTH.iter().map(|side| with_side(id, *side)).collect()
    } else {
        vec![id.to_string()]
    }
}

/// First `_`-separated token of a name (`"L_eye_mesh"` -> `"L"`).
pub fn side_prefix(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// Last `_`-separated token of a name (`"M_jaw_ffd"` -> `"ffd"`).
pub fn name_suffix(name: &str) -> &str {
    name.rsplit('_').next().unwrap_or(name)
}

/// Replace the side prefix of a concrete name with the placeholder.
/// Returns `None` when the name has no `L_` / `R_` prefix.
pub fn templatize(name: &str) -> Option<String> {
    Side::of(name)?;
    Some(format!("{SIDE_PLACEHOLDER}{}", &name[1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_to_left_then_right() {
        assert_eq!(expand_sides("{}_eye_mesh"), vec!["L_eye_mesh", "R_eye_mesh"]);
        assert_eq!(expand_sides("M_body_mesh"), vec!["M_body_mesh"]);
    }

    #[test]
    fn placeholder_must_lead() {
        assert!(!is_side_templated("M_{}_mesh"));
        assert_eq!(expand_sides("M_{}_mesh"), vec!["M_{}_mesh"]);
    }

    #[test]
    fn prefix_and_suffix_tokens() {
        assert_eq!(side_prefix("L_eye_mesh"), "L");
        assert_eq!(name_suffix("M_jaw_ffd"), "ffd");
        assert_eq!(name_suffix("single"), "single");
    }

    #[test]
    fn templatize_only_sided_names() {
        assert_eq!(templatize("L_brow_ctrl").as_deref(), Some("{}_brow_ctrl"));
        assert_eq!(templatize("M_jaw_ctrl"), None);
        assert_eq!(templatize("Lip_ctrl"), None);
    }
}
