use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute value written to a host node.
///
/// Serialized untagged so config files can write plain JSON scalars:
/// `1` is an integer, `1.0` a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Split a `node.attribute` plug into its node and attribute parts.
///
/// Only the first `.` separates the node; compound attributes such as
/// `presetFalloff[9].pFalloff` stay intact on the attribute side.
pub fn split_plug(plug: &str) -> Option<(&str, &str)> {
    let (node, attr) = plug.split_once('.')?;
    if node.is_empty() || attr.is_empty() {
        return None;
    }
    Some((node, attr))
}

/// Join a node and attribute into a plug string.
pub fn plug(node: &str, attr: &str) -> String {
    format!("{node}.{attr}")
}
