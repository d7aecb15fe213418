//! Typed structs representing the API manifest JSON schema.
//!
//! A manifest is the persisted description of one published API surface:
//! its exported types (classes, interfaces, enums) and their members, each
//! carrying an explicit or implied stability level. In memory the types and
//! members are keyed by name in `BTreeMap`s so every walk over a manifest
//! is deterministic.

use crate::stability::StabilityLevel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A published API surface, keyed by fully-qualified type name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiManifest {
    /// Package name (e.g. "acme-sdk").
    pub name: String,
    /// Package version string; informational, never compared.
    pub version: String,
    /// All exported types, keyed by fqn.
    pub types: BTreeMap<String, ApiType>,
}

impl ApiManifest {
    /// Look up a type by fully-qualified name.
    pub fn get_type(&self, fqn: &str) -> Option<&ApiType> {
        self.types.get(fqn)
    }
}

/// The shape of an exported type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exported type with its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiType {
    /// Fully-qualified name (e.g. "acme.Bucket").
    pub fqn: String,
    pub kind: TypeKind,
    /// Declared stability, if the type carries an annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,
    /// Members keyed by name.
    pub members: BTreeMap<String, Member>,
}

impl ApiType {
    /// Declared stability, or `Experimental` when undecorated.
    pub fn effective_stability(&self) -> StabilityLevel {
        StabilityLevel::or_default(self.stability)
    }
}

/// The shape of a type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Method,
    Property,
    EnumMember,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Property => "property",
            MemberKind::EnumMember => "enum member",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member of an exported type.
///
/// The struct covers the superset of fields across member kinds: methods
/// carry `parameters`/`returns`, properties carry `type_name`/`immutable`,
/// enum members carry neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Declared stability, if the member carries its own annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,
    /// Method parameters, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Method return type; absent means void.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// Property value type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Whether a property is read-only.
    pub immutable: bool,
    /// Whether the member is static.
    #[serde(rename = "static")]
    pub static_: bool,
}

impl Member {
    /// Declared stability, falling back to the containing type's declared
    /// stability, then to `Experimental`.
    pub fn effective_stability(&self, parent: &ApiType) -> StabilityLevel {
        StabilityLevel::or_default(self.stability.or(parent.stability))
    }

    /// Element path used in messages and violation keys: `fqn#name`.
    pub fn path(&self, parent: &ApiType) -> String {
        format!("{}#{}", parent.fqn, self.name)
    }
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub optional: bool,
}
