//! Declarative deformer specifications.
//!
//! A stack is an ordered list of [`DeformerSpec`]s for one target. In configuration
//! files each spec is written as `"<name template>": <entry>` where the entry is
//! `null` or a [`StackEntry`] object:
//!
//! ```json
//! {
//!   "{name}_cluster": null,
//!   "{name}_skinCluster": { "joints": ["M_head_jnt"], "use_hierarchy": true, "envelope": 1.0 },
//!   "{name}_shrinkWrap": { "source": "M_skull_mesh", "attributes": { "projection": 3 } }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use facerig_scene_core::{name_suffix, AttrValue, DeformerKind};

fn default_true() -> bool {
    true
}

fn default_envelope() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinParameters {
    pub joints: Vec<String>,
    #[serde(default = "default_true")]
    pub use_hierarchy: bool,
    #[serde(default = "default_envelope")]
    pub envelope: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceParameters {
    /// Driving mesh (wraps) or curve (wires).
    pub source: String,
    /// Overrides applied on top of the kind's fixed attribute table.
    #[serde(default)]
    pub attributes: IndexMap<String, AttrValue>,
}

/// Kind-specific configuration of a spec.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "parameters", rename_all = "snake_case")]
pub enum DeformerParameters {
    #[default]
    None,
    Skin(SkinParameters),
    Source(SourceParameters),
}

impl DeformerParameters {
    pub fn skin(&self) -> Option<&SkinParameters> {
        match self {
            DeformerParameters::Skin(skin) => Some(skin),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<&SourceParameters> {
        match self {
            DeformerParameters::Source(source) => Some(source),
            _ => None,
        }
    }
}

/// Raw stack entry as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackEntry {
    /// Name template; defaults to the entry's key.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<DeformerKind>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub joints: Option<Vec<String>>,
    #[serde(default)]
    pub use_hierarchy: Option<bool>,
    #[serde(default)]
    pub envelope: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttrValue>,
}

/// One deformer a target should carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeformerSpec {
    pub key: String,
    pub name_template: String,
    pub suffix: String,
    /// Explicit kind; when absent the suffix table decides.
    pub kind: Option<DeformerKind>,
    #[serde(flatten)]
    pub parameters: DeformerParameters,
}

impl DeformerSpec {
    /// A spec whose key and name template are `template`, with the suffix taken from
    /// the template's last `_` token.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            key: template.clone(),
            suffix: name_suffix(&template).to_string(),
            name_template: template,
            kind: None,
            parameters: DeformerParameters::None,
        }
    }

    pub fn with_kind(mut self, kind: DeformerKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_parameters(mut self, parameters: DeformerParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Convenience for a skinCluster spec bound to `joints` with default options.
    pub fn skin_cluster<I, S>(template: impl Into<String>, joints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(template)
            .with_kind(DeformerKind::SkinCluster)
            .with_parameters(DeformerParameters::Skin(SkinParameters {
                joints: joints.into_iter().map(Into::into).collect(),
                use_hierarchy: true,
                envelope: 1.0,
            }))
    }

    /// Convenience for a spec driven by `source` (wraps, wires).
    pub fn sourced(template: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(template).with_parameters(DeformerParameters::Source(SourceParameters {
            source: source.into(),
            attributes: IndexMap::new(),
        }))
    }

    /// Build a spec from a configuration key and its (possibly null) entry.
    ///
    /// Joints select skin parameters, a source selects source parameters; a bare
    /// `attributes` table without a source is ignored.
    pub fn from_entry(key: &str, entry: Option<StackEntry>) -> Self {
        let entry = entry.unwrap_or_default();
        let template = entry.name.unwrap_or_else(|| key.to_string());
        let suffix = entry
            .suffix
            .unwrap_or_else(|| name_suffix(&template).to_string());
        let parameters = if let Some(joints) = entry.joints {
            DeformerParameters::Skin(SkinParameters {
                joints,
                use_hierarchy: entry.use_hierarchy.unwrap_or(true),
                envelope: entry.envelope.unwrap_or(1.0),
            })
        } else if let Some(source) = entry.source {
            DeformerParameters::Source(SourceParameters {
                source,
                attributes: entry.attributes,
            })
        } else {
            DeformerParameters::None
        };
        Self {
            key: key.to_string(),
            name_template: template,
            suffix,
            kind: entry.kind,
            parameters,
        }
    }
}
