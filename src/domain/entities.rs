//! Domain entities: node identifiers and the flat item records

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of an item, either numeric or textual.
///
/// Equality is type-preserving: `Num(1)` and `Text("1")` are different ids.
/// Use [`NodeId::as_number`] for the numeric interpretation used when ordering
/// items and resolving parent references.
///
/// Decoding accepts integers, integral floats (`2.0` is `Num(2)`) and strings.
/// Integers beyond `i64` keep their digits as `Text`; fractional numbers are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    Num(i64),
    Text(String),
}

impl NodeId {
    /// Numeric interpretation of the id.
    ///
    /// Textual ids count as numeric when their trimmed content parses as an integer.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            NodeId::Num(n) => Some(*n),
            NodeId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Num(n) => write!(f, "{}", n),
            NodeId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parses command line input: integers become `Num`, everything else `Text`.
impl FromStr for NodeId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(NodeId::Num)
            .unwrap_or_else(|_| NodeId::Text(s.to_string())))
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeIdVisitor)
    }
}

struct NodeIdVisitor;

impl<'de> Visitor<'de> for NodeIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
        Ok(NodeId::Num(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
        Ok(i64::try_from(v)
            .map(NodeId::Num)
            .unwrap_or_else(|_| NodeId::Text(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<NodeId, E> {
        // `i64::MAX as f64` rounds up to 2^63, itself out of range
        let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
        if v.fract() == 0.0 && in_range {
            Ok(NodeId::Num(v as i64))
        } else {
            Err(E::custom(format!("id must be an integer or string, found {}", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
        Ok(NodeId::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<NodeId, E> {
        Ok(NodeId::Text(v))
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Num(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        NodeId::Num(n.into())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Text(s)
    }
}

/// A flat record referencing its parent by id.
///
/// `parent` is `None` for an explicit "no parent". A parent id that does not
/// resolve to any item (e.g. `"root"`) also marks a root, as does a parent
/// equal to the item's own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: NodeId,
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Opaque classification tag
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<NodeId>, parent: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            parent: Some(parent.into()),
            kind: None,
        }
    }

    /// Item without any parent reference.
    pub fn root(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn is_self_parented(&self) -> bool {
        self.parent.as_ref() == Some(&self.id)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{} [{}]", self.id, kind),
            None => write!(f, "{}", self.id),
        }
    }
}
