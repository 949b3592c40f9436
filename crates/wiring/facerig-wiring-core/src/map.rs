//! Template connection maps.
//!
//! A map groups connections by template section (`"joint"`, `"controller"`, ...):
//!
//! ```json
//! { "joint": { "{}_brow_jnt": { "{}_brow_ctrl.translate": "translate" } } }
//! ```
//!
//! Each destination node lists `source plug -> destination attribute` pairs. Node
//! names may carry the `{}` side placeholder.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `source plug -> destination attribute` for one destination node.
pub type PlugTable = IndexMap<String, String>;

/// Destination node -> its plug table, for one template section.
pub type TemplateConnections = IndexMap<String, PlugTable>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionMap {
    templates: IndexMap<String, TemplateConnections>,
}

impl ConnectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let map: Self = serde_json::from_str(text).context("failed to parse connection map")?;
        log::debug!("loaded connection map with {} templates", map.templates.len());
        Ok(map)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read connection map {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize connection map")
    }

    pub fn template(&self, name: &str) -> Option<&TemplateConnections> {
        self.templates.get(name)
    }

    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Ensure `destination` has a (possibly empty) table in `template`.
    /// Returns `false` when it was already there.
    pub fn add_destination(&mut self, template: &str, destination: &str) -> bool {
        let section = self.templates.entry(template.to_string()).or_default();
        if section.contains_key(destination) {
            return false;
        }
        section.insert(destination.to_string(), PlugTable::new());
        true
    }

    /// Record one connection. The first attribute recorded for a source plug wins;
    /// returns `false` when the source plug was already present.
    pub fn insert(
        &mut self,
        template: &str,
        destination: &str,
        source_plug: &str,
        destination_attr: &str,
    ) -> bool {
        let table = self
            .templates
            .entry(template.to_string())
            .or_default()
            .entry(destination.to_string())
            .or_default();
        if table.contains_key(source_plug) {
            return false;
        }
        table.insert(source_plug.to_string(), destination_attr.to_string());
        true
    }

    /// Merge `other` into this map; existing entries are kept.
    pub fn merge(&mut self, other: ConnectionMap) {
        for (template, section) in other.templates {
            for (destination, table) in section {
                self.add_destination(&template, &destination);
                for (source, attr) in table {
                    self.insert(&template, &destination, &source, &attr);
                }
            }
        }
    }
}
