use serde::{Deserialize, Serialize};

use facerig_scene_core::DeformerKind;

use crate::config::ConfigError;

/// Association of a naming suffix with a deformer kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixAssociation {
    pub suffix: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: DeformerKind,
}

impl SuffixAssociation {
    pub fn new(suffix: impl Into<String>, kind: DeformerKind) -> Self {
        Self {
            suffix: suffix.into(),
            kind,
        }
    }
}

/// Read-only suffix → kind lookup.
///
/// A suffix maps to exactly one kind; a kind may have several suffixes, the first one
/// listed being its canonical suffix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuffixTable {
    associations: Vec<SuffixAssociation>,
}

impl SuffixTable {
    pub fn new(associations: Vec<SuffixAssociation>) -> Result<Self, ConfigError> {
        for (i, assoc) in associations.iter().enumerate() {
            if assoc.suffix.is_empty() {
                return Err(ConfigError::EmptySuffix);
            }
            let conflict = associations[..i]
                .iter()
                .find(|prev| prev.suffix == assoc.suffix && prev.kind != assoc.kind);
            if let Some(prev) = conflict {
                return Err(ConfigError::ConflictingSuffix {
                    suffix: assoc.suffix.clone(),
                    first: prev.kind.clone(),
                    second: assoc.kind.clone(),
                });
            }
        }
        Ok(Self { associations })
    }

    /// The facial rig's standard associations.
    pub fn standard() -> Self {
        let associations = [
            ("cluster", DeformerKind::Cluster),
            ("ffd", DeformerKind::Lattice),
            ("blendShape", DeformerKind::BlendShape),
            ("wire", DeformerKind::Wire),
            ("wrap", DeformerKind::Wrap),
            ("proximityWrap", DeformerKind::ProximityWrap),
            ("shrinkWrap", DeformerKind::ShrinkWrap),
            ("bend", DeformerKind::Bend),
            ("skinCluster", DeformerKind::SkinCluster),
        ]
        .into_iter()
        .map(|(suffix, kind)| SuffixAssociation::new(suffix, kind))
        .collect();
        Self { associations }
    }

    pub fn kind_for(&self, suffix: &str) -> Option<&DeformerKind> {
        self.associations
            .iter()
            .find(|a| a.suffix == suffix)
            .map(|a| &a.kind)
    }

    /// Canonical suffix of `kind`.
    pub fn suffix_for(&self, kind: &DeformerKind) -> Option<&str> {
        self.associations
            .iter()
            .find(|a| &a.kind == kind)
            .map(|a| a.suffix.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuffixAssociation> {
        self.associations.iter()
    }

    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_round_trips_kinds() {
        let table = SuffixTable::standard();
        assert_eq!(table.kind_for("ffd"), Some(&DeformerKind::Lattice));
        assert_eq!(table.suffix_for(&DeformerKind::SkinCluster), Some("skinCluster"));
        assert_eq!(table.kind_for("mesh"), None);
    }

    #[test]
    fn first_suffix_is_canonical() {
        let table = SuffixTable::new(vec![
            SuffixAssociation::new("cluster", DeformerKind::Cluster),
            SuffixAssociation::new("cls", DeformerKind::Cluster),
        ])
        .unwrap();
        assert_eq!(table.kind_for("cls"), Some(&DeformerKind::Cluster));
        assert_eq!(table.suffix_for(&DeformerKind::Cluster), Some("cluster"));
    }

    #[test]
    fn conflicting_suffix_is_rejected() {
        let err = SuffixTable::new(vec![
            SuffixAssociation::new("def", DeformerKind::Cluster),
            SuffixAssociation::new("def", DeformerKind::Bend),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingSuffix { .. }));
    }

    #[test]
    fn associations_deserialize_from_type_field() {
        let assoc: SuffixAssociation =
            serde_json::from_str(r#"{ "suffix": "ffd", "type": "ffd" }"#).unwrap();
        assert_eq!(assoc.kind, DeformerKind::Lattice);
    }
}
