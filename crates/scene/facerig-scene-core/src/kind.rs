//! Deformer categories understood by the reconciler.
//!
//! Kinds serialize as the host's type token (`"cluster"`, `"ffd"`, `"skinCluster"`, ...).
//! Any token that is not one of the built-in categories is kept verbatim as
//! [`DeformerKind::Generic`] so hosts can declare their own node types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeformerKind {
    Cluster,
    /// Free-form deformation lattice (`ffd` on the host).
    Lattice,
    BlendShape,
    Wire,
    Wrap,
    ProximityWrap,
    ShrinkWrap,
    /// Non-linear bend.
    Bend,
    SkinCluster,
    /// Any other host deformer type, by its type token.
    Generic(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindParseError {
    #[error("deformer kind token is empty")]
    Empty,
    #[error("deformer kind token '{0}' contains whitespace")]
    Whitespace(String),
}

impl DeformerKind {
    /// The host type token for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            DeformerKind::Cluster => "cluster",
            DeformerKind::Lattice => "ffd",
            DeformerKind::BlendShape => "blendShape",
            DeformerKind::Wire => "wire",
            DeformerKind::Wrap => "wrap",
            DeformerKind::ProximityWrap => "proximityWrap",
            DeformerKind::ShrinkWrap => "shrinkWrap",
            DeformerKind::Bend => "bend",
            DeformerKind::SkinCluster => "skinCluster",
            DeformerKind::Generic(token) => token,
        }
    }

    /// Kinds that are bound to a second, driving mesh.
    pub fn is_source_driven(&self) -> bool {
        matches!(
            self,
            DeformerKind::Wrap | DeformerKind::ProximityWrap | DeformerKind::ShrinkWrap
        )
    }
}

impl FromStr for DeformerKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KindParseError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(KindParseError::Whitespace(s.to_string()));
        }
        let kind = match s {
            "cluster" => DeformerKind::Cluster,
            "ffd" | "lattice" => DeformerKind::Lattice,
            "blendShape" => DeformerKind::BlendShape,
            "wire" => DeformerKind::Wire,
            "wrap" => DeformerKind::Wrap,
            "proximityWrap" => DeformerKind::ProximityWrap,
            "shrinkWrap" => DeformerKind::ShrinkWrap,
            "bend" => DeformerKind::Bend,
            "skinCluster" => DeformerKind::SkinCluster,
            other => DeformerKind::Generic(other.to_string()),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for DeformerKind {
    type Error = KindParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeformerKind> for String {
    fn from(kind: DeformerKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DeformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_accepts_both_tokens() {
        assert_eq!("ffd".parse::<DeformerKind>().unwrap(), DeformerKind::Lattice);
        assert_eq!(
            "lattice".parse::<DeformerKind>().unwrap(),
            DeformerKind::Lattice
        );
        assert_eq!(DeformerKind::Lattice.as_str(), "ffd");
    }

    #[test]
    fn unknown_tokens_become_generic() {
        let kind: DeformerKind = "deltaMush".parse().unwrap();
        assert_eq!(kind, DeformerKind::Generic("deltaMush".into()));
        assert_eq!(kind.to_string(), "deltaMush");
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!("".parse::<DeformerKind>(), Err(KindParseError::Empty));
        let err = serde_json::from_str::<DeformerKind>("\"\"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn serde_uses_host_tokens() {
        let json = serde_json::to_string(&DeformerKind::SkinCluster).unwrap();
        assert_eq!(json, "\"skinCluster\"");
        let back: DeformerKind = serde_json::from_str("\"shrinkWrap\"").unwrap();
        assert_eq!(back, DeformerKind::ShrinkWrap);
    }
}
