//! Rig configuration: suffix associations, deformer stacks and bind defaults.
//!
//! Configuration is loaded once per build session and handed to the
//! [`Reconciler`](crate::Reconciler) explicitly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use facerig_scene_core::{DeformerKind, SkinBind};

use crate::spec::{DeformerSpec, StackEntry};
use crate::suffix::{SuffixAssociation, SuffixTable};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("suffix association with an empty suffix")]
    EmptySuffix,
    #[error("suffix '{suffix}' is associated with both {first} and {second}")]
    ConflictingSuffix {
        suffix: String,
        first: DeformerKind,
        second: DeformerKind,
    },
    #[error("stack target id is empty")]
    EmptyTarget,
    #[error("stack '{target}' has an empty name template")]
    EmptyTemplate { target: String },
}

/// Options passed to the host when binding a new skinCluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinBindDefaults {
    /// 1: closest joint, considering the skeleton hierarchy.
    pub bind_method: u8,
    pub max_influences: u32,
    pub normalize_weights: u8,
    pub obey_max_influences: bool,
}

impl Default for SkinBindDefaults {
    fn default() -> Self {
        Self {
            bind_method: 1,
            max_influences: 10,
            normalize_weights: 1,
            obey_max_influences: true,
        }
    }
}

impl SkinBindDefaults {
    pub fn bind(&self, joints: Vec<String>, use_hierarchy: bool) -> SkinBind {
        SkinBind {
            joints,
            use_hierarchy,
            bind_method: self.bind_method,
            max_influences: self.max_influences,
            normalize_weights: self.normalize_weights,
            obey_max_influences: self.obey_max_influences,
        }
    }
}

/// On-disk shape of a rig configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigConfigFile {
    #[serde(default)]
    pub suffix_associations: Option<Vec<SuffixAssociation>>,
    pub stacks: IndexMap<String, IndexMap<String, Option<StackEntry>>>,
    #[serde(default)]
    pub skin_bind: SkinBindDefaults,
}

/// Validated configuration object.
#[derive(Debug, Clone, Default)]
pub struct RigConfig {
    suffixes: SuffixTable,
    stacks: IndexMap<String, Vec<DeformerSpec>>,
    skin_bind: SkinBindDefaults,
}

impl RigConfig {
    pub fn new(suffixes: SuffixTable) -> Self {
        Self {
            suffixes,
            stacks: IndexMap::new(),
            skin_bind: SkinBindDefaults::default(),
        }
    }

    /// Append a stack for `target`; an existing stack for the same target is replaced
    /// in place, keeping its position.
    pub fn with_stack(mut self, target: impl Into<String>, specs: Vec<DeformerSpec>) -> Self {
        self.stacks.insert(target.into(), specs);
        self
    }

    pub fn with_skin_bind(mut self, skin_bind: SkinBindDefaults) -> Self {
        self.skin_bind = skin_bind;
        self
    }

    pub fn from_file_config(file: RigConfigFile) -> Result<Self, ConfigError> {
        let suffixes = match file.suffix_associations {
            Some(associations) => SuffixTable::new(associations)?,
            None => SuffixTable::standard(),
        };
        let mut stacks = IndexMap::with_capacity(file.stacks.len());
        for (target, entries) in file.stacks {
            if target.is_empty() {
                return Err(ConfigError::EmptyTarget);
            }
            let specs: Vec<DeformerSpec> = entries
                .into_iter()
                .map(|(key, entry)| DeformerSpec::from_entry(&key, entry))
                .collect();
            if specs.iter().any(|s| s.name_template.is_empty()) {
                return Err(ConfigError::EmptyTemplate { target });
            }
            stacks.insert(target, specs);
        }
        Ok(Self {
            suffixes,
            stacks,
            skin_bind: file.skin_bind,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: RigConfigFile =
            serde_json::from_str(text).context("failed to parse rig configuration")?;
        let config = Self::from_file_config(file).context("invalid rig configuration")?;
        log::debug!(
            "loaded rig configuration: {} stacks, {} suffix associations",
            config.stacks.len(),
            config.suffixes.len()
        );
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read rig configuration {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn suffixes(&self) -> &SuffixTable {
        &self.suffixes
    }

    pub fn skin_bind(&self) -> &SkinBindDefaults {
        &self.skin_bind
    }

    pub fn stack(&self, target: &str) -> Option<&[DeformerSpec]> {
        self.stacks.get(target).map(Vec::as_slice)
    }

    /// Stacks in configuration order.
    pub fn stacks(&self) -> impl Iterator<Item = (&str, &[DeformerSpec])> {
        self.stacks
            .iter()
            .map(|(target, specs)| (target.as_str(), specs.as_slice()))
    }

    /// Resolve an entry's kind: explicit kind first, then the suffix table.
    pub fn resolve_kind(&self, spec: &DeformerSpec) -> Option<DeformerKind> {
        spec.kind
            .clone()
            .or_else(|| self.suffixes.kind_for(&spec.suffix).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "stacks": {
            "M_body_compil_mesh": {
                "{name}_cluster": null,
                "M_jaw_ffd": null,
                "{name}_skinCluster": { "joints": ["M_head_jnt"], "envelope": 0.5 }
            },
            "{}_eye_mesh": {
                "{name}_wrap": { "source": "{}_eyeProxy_mesh" }
            }
        }
    }"#;

    #[test]
    fn stacks_keep_configuration_order() {
        let config = RigConfig::from_json_str(CONFIG).unwrap();
        let targets: Vec<&str> = config.stacks().map(|(t, _)| t).collect();
        assert_eq!(targets, vec!["M_body_compil_mesh", "{}_eye_mesh"]);
        let keys: Vec<&str> = config
            .stack("M_body_compil_mesh")
            .unwrap()
            .iter()
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(keys, vec!["{name}_cluster", "M_jaw_ffd", "{name}_skinCluster"]);
    }

    #[test]
    fn missing_associations_fall_back_to_standard_table() {
        let config = RigConfig::from_json_str(CONFIG).unwrap();
        assert_eq!(config.suffixes(), &SuffixTable::standard());
        assert_eq!(config.skin_bind(), &SkinBindDefaults::default());
    }

    #[test]
    fn kind_resolution_prefers_explicit_kind() {
        let config = RigConfig::new(SuffixTable::standard());
        let by_suffix = DeformerSpec::new("M_jaw_ffd");
        assert_eq!(config.resolve_kind(&by_suffix), Some(DeformerKind::Lattice));
        let explicit = DeformerSpec::new("M_jaw_ffd").with_kind(DeformerKind::Cluster);
        assert_eq!(config.resolve_kind(&explicit), Some(DeformerKind::Cluster));
        assert_eq!(config.resolve_kind(&DeformerSpec::new("M_jaw_thing")), None);
    }

    #[test]
    fn conflicting_associations_fail_to_load() {
        let err = RigConfig::from_json_str(
            r#"{
                "suffix_associations": [
                    { "suffix": "def", "type": "cluster" },
                    { "suffix": "def", "type": "bend" }
                ],
                "stacks": {}
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("associated with both"));
    }

    #[test]
    fn empty_target_is_rejected() {
        let err = RigConfig::from_json_str(r#"{ "stacks": { "": {} } }"#).unwrap_err();
        assert!(format!("{err:#}").contains("target id is empty"));
    }
}
