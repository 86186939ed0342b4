//! Object types and element-type resolution
//!
//! Catalog conditions restrict questions with element-type tokens
//! (`Node`, `OpenWay`, `ClosedWay`, `Relation`). Taginfo only knows four
//! object types, so every token is mapped onto one of them.

use crate::domain::catalog::ElementSpec;
use crate::error::{Result, TagInfoError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Taginfo object types. The declaration order is the order used in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Node,
    Way,
    Relation,
    Area,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Node,
        ObjectType::Way,
        ObjectType::Relation,
        ObjectType::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Node => "node",
            ObjectType::Way => "way",
            ObjectType::Relation => "relation",
            ObjectType::Area => "area",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element-type tokens used by catalog conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Node,
    OpenWay,
    ClosedWay,
    Relation,
}

impl ElementType {
    /// The taginfo object type this element type is published as
    pub fn object_type(&self) -> ObjectType {
        match self {
            ElementType::Node => ObjectType::Node,
            ElementType::OpenWay => ObjectType::Way,
            ElementType::ClosedWay => ObjectType::Area,
            ElementType::Relation => ObjectType::Relation,
        }
    }
}

impl FromStr for ElementType {
    type Err = TagInfoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Node" => Ok(ElementType::Node),
            "OpenWay" => Ok(ElementType::OpenWay),
            "ClosedWay" => Ok(ElementType::ClosedWay),
            "Relation" => Ok(ElementType::Relation),
            _ => Err(TagInfoError::UnknownElementType(s.to_string())),
        }
    }
}

/// Set of object types a question applies to
pub type ObjectTypes = BTreeSet<ObjectType>;

/// The set used when a question carries no element restriction
pub fn all_object_types() -> ObjectTypes {
    ObjectType::ALL.into_iter().collect()
}

/// Resolve an element specifier into a set of object types.
///
/// An absent or empty specifier yields every object type. Any unknown token
/// fails the whole resolution.
///
/// # Examples
///
/// ```
/// use taginfo_gen::domain::catalog::ElementSpec;
/// use taginfo_gen::domain::object_type::{resolve, ObjectType};
///
/// let spec = ElementSpec::Single("ClosedWay".to_string());
/// let types = resolve(Some(&spec)).unwrap();
/// assert_eq!(types.into_iter().collect::<Vec<_>>(), vec![ObjectType::Area]);
/// ```
pub fn resolve(spec: Option<&ElementSpec>) -> Result<ObjectTypes> {
    let tokens = match spec {
        None => return Ok(all_object_types()),
        Some(spec) => spec.tokens(),
    };

    if tokens.is_empty() {
        return Ok(all_object_types());
    }

    tokens
        .into_iter()
        .map(|token| token.parse::<ElementType>().map(|e| e.object_type()))
        .collect()
}
