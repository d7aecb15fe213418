//! Deserialization from manifest JSON into typed structs.
//!
//! The main entry point is [`from_manifest`], which takes a
//! `&serde_json::Value` and produces an [`ApiManifest`]. Malformed input is
//! rejected loudly at this boundary: unknown kinds, unknown stability
//! strings, and duplicate names are errors, never silently skipped, so the
//! comparator and classifier downstream can assume well-formed data.

use crate::stability::StabilityLevel;
use crate::types::*;
use std::collections::BTreeMap;

/// Errors during manifest JSON deserialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    /// The manifest is missing a required top-level field.
    #[error("manifest missing required field: '{field}'")]
    MissingField { field: String },

    /// A type entry is malformed.
    #[error("type '{fqn}': {message}")]
    TypeError { fqn: String, message: String },

    /// The manifest structure is invalid.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

/// Deserialize a manifest JSON document into typed structs.
///
/// The wire format carries `types` as an array; in memory they are keyed by
/// fqn. Duplicate fqns or member names are rejected.
pub fn from_manifest(manifest: &serde_json::Value) -> Result<ApiManifest, ManifestError> {
    let name = required_str(manifest, "name")?;
    let version = required_str(manifest, "version")?;

    let types_arr = manifest
        .get("types")
        .and_then(|t| t.as_array())
        .ok_or_else(|| ManifestError::MissingField {
            field: "types".to_string(),
        })?;

    let mut types = BTreeMap::new();
    for obj in types_arr {
        let api_type = parse_type(obj)?;
        let fqn = api_type.fqn.clone();
        if types.insert(fqn.clone(), api_type).is_some() {
            return Err(ManifestError::InvalidManifest(format!(
                "duplicate type fqn '{}'",
                fqn
            )));
        }
    }

    Ok(ApiManifest {
        name,
        version,
        types,
    })
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn required_str(obj: &serde_json::Value, field: &str) -> Result<String, ManifestError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ManifestError::MissingField {
            field: field.to_string(),
        })
}

fn type_err(fqn: &str, message: impl Into<String>) -> ManifestError {
    ManifestError::TypeError {
        fqn: fqn.to_string(),
        message: message.into(),
    }
}

fn parse_stability(
    obj: &serde_json::Value,
    fqn: &str,
) -> Result<Option<StabilityLevel>, ManifestError> {
    match obj.get("stability") {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => {
            let s = v
                .as_str()
                .ok_or_else(|| type_err(fqn, "'stability' must be a string"))?;
            let level = s
                .parse::<StabilityLevel>()
                .map_err(|e| type_err(fqn, e.to_string()))?;
            Ok(Some(level))
        }
    }
}

fn parse_type(obj: &serde_json::Value) -> Result<ApiType, ManifestError> {
    let fqn = obj
        .get("fqn")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ManifestError::InvalidManifest("type missing 'fqn' field".to_string()))?
        .to_string();

    let kind_str = obj
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| type_err(&fqn, "missing 'kind' field"))?;
    let kind = match kind_str {
        "class" => TypeKind::Class,
        "interface" => TypeKind::Interface,
        "enum" => TypeKind::Enum,
        other => return Err(type_err(&fqn, format!("unknown type kind '{}'", other))),
    };

    let stability = parse_stability(obj, &fqn)?;

    let mut members = BTreeMap::new();
    if let Some(members_arr) = obj.get("members") {
        let members_arr = members_arr
            .as_array()
            .ok_or_else(|| type_err(&fqn, "'members' must be an array"))?;
        for member_obj in members_arr {
            let member = parse_member(member_obj, &fqn)?;
            let name = member.name.clone();
            if members.insert(name.clone(), member).is_some() {
                return Err(type_err(&fqn, format!("duplicate member '{}'", name)));
            }
        }
    }

    Ok(ApiType {
        fqn,
        kind,
        stability,
        members,
    })
}

fn parse_member(obj: &serde_json::Value, fqn: &str) -> Result<Member, ManifestError> {
    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| type_err(fqn, "member missing 'name' field"))?
        .to_string();

    let kind_str = obj
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| type_err(fqn, format!("member '{}' missing 'kind' field", name)))?;
    let kind = match kind_str {
        "method" => MemberKind::Method,
        "property" => MemberKind::Property,
        "enum-member" => MemberKind::EnumMember,
        other => {
            return Err(type_err(
                fqn,
                format!("member '{}' has unknown kind '{}'", name, other),
            ))
        }
    };

    let stability = parse_stability(obj, fqn)?;

    let mut parameters = Vec::new();
    if let Some(params_arr) = obj.get("parameters") {
        let params_arr = params_arr
            .as_array()
            .ok_or_else(|| type_err(fqn, format!("member '{}': 'parameters' must be an array", name)))?;
        for param_obj in params_arr {
            parameters.push(parse_parameter(param_obj, fqn, &name)?);
        }
    }

    let returns = obj
        .get("returns")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let type_name = obj
        .get("type")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let immutable = obj
        .get("immutable")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let static_ = obj
        .get("static")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    Ok(Member {
        name,
        kind,
        stability,
        parameters,
        returns,
        type_name,
        immutable,
        static_,
    })
}

fn parse_parameter(
    obj: &serde_json::Value,
    fqn: &str,
    member: &str,
) -> Result<Parameter, ManifestError> {
    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| type_err(fqn, format!("member '{}': parameter missing 'name'", member)))?
        .to_string();
    let type_name = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            type_err(
                fqn,
                format!("member '{}': parameter '{}' missing 'type'", member, name),
            )
        })?
        .to_string();
    let optional = obj
        .get("optional")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    Ok(Parameter {
        name,
        type_name,
        optional,
    })
}
