//! Structural comparator: walks two manifests and emits mismatches.
//!
//! The walk is purely mechanical; it discovers differences and tags each
//! with the stability level whose guarantee is at stake. Scoring the
//! differences is the classifier's job. Discovery order is deterministic:
//! sorted type fqn, then sorted member name within a type.

use surface_manifest::{ApiManifest, ApiType, Member, MemberKind, StabilityLevel, TypeKind};

use crate::mismatch::{ChangeKind, Mismatch};

/// Compare two manifests and return every structural difference, in
/// discovery order.
pub fn compare_manifests(old: &ApiManifest, new: &ApiManifest) -> Vec<Mismatch> {
    let mut out = Vec::new();

    for (fqn, old_type) in &old.types {
        match new.get_type(fqn) {
            None => {
                out.push(Mismatch::new(
                    ChangeKind::Removed,
                    fqn,
                    old_type.effective_stability(),
                    format!(
                        "{} '{}' ({}) was removed",
                        old_type.kind,
                        fqn,
                        old_type.effective_stability()
                    ),
                ));
            }
            Some(new_type) => {
                compare_type(old_type, new_type, &mut out);
            }
        }
    }

    // Pure type additions are not mismatches; nothing to do for types only
    // present in the new manifest.

    out
}

fn compare_type(old_type: &ApiType, new_type: &ApiType, out: &mut Vec<Mismatch>) {
    let fqn = &old_type.fqn;

    if old_type.kind != new_type.kind {
        out.push(Mismatch::new(
            ChangeKind::KindChanged,
            fqn,
            old_type.effective_stability(),
            format!(
                "'{}' changed from {} to {}",
                fqn, old_type.kind, new_type.kind
            ),
        ));
    }

    // Only departures from Stable are flagged as a stability regression.
    // Transitions among experimental/external/deprecated are not
    // cross-checked; the governing stability is the old guarantee.
    if old_type.effective_stability() == StabilityLevel::Stable
        && new_type.effective_stability() != StabilityLevel::Stable
    {
        out.push(Mismatch::new(
            ChangeKind::StabilityDowngraded,
            fqn,
            StabilityLevel::Stable,
            format!(
                "stability of '{}' was relaxed from stable to {}",
                fqn,
                new_type.effective_stability()
            ),
        ));
    }

    for (name, old_member) in &old_type.members {
        let path = old_member.path(old_type);
        match new_type.members.get(name) {
            None => {
                out.push(Mismatch::new(
                    ChangeKind::MemberRemoved,
                    &path,
                    old_member.effective_stability(old_type),
                    format!(
                        "{} '{}' ({}) was removed",
                        old_member.kind,
                        path,
                        old_member.effective_stability(old_type)
                    ),
                ));
            }
            Some(new_member) => {
                compare_member(old_type, old_member, new_type, new_member, &path, out);
            }
        }
    }

    // Adding a member to an interface breaks implementors; governing
    // stability is the new member's own, since nothing existed before.
    if new_type.kind == TypeKind::Interface {
        for (name, new_member) in &new_type.members {
            if !old_type.members.contains_key(name) {
                let path = new_member.path(new_type);
                out.push(Mismatch::new(
                    ChangeKind::MemberAdded,
                    &path,
                    new_member.effective_stability(new_type),
                    format!(
                        "{} '{}' was added to interface '{}'; implementations must provide it",
                        new_member.kind, path, new_type.fqn
                    ),
                ));
            }
        }
    }
}

fn compare_member(
    old_type: &ApiType,
    old_member: &Member,
    new_type: &ApiType,
    new_member: &Member,
    path: &str,
    out: &mut Vec<Mismatch>,
) {
    let old_stability = old_member.effective_stability(old_type);

    if old_stability == StabilityLevel::Stable
        && new_member.effective_stability(new_type) != StabilityLevel::Stable
    {
        out.push(Mismatch::new(
            ChangeKind::StabilityDowngraded,
            path,
            StabilityLevel::Stable,
            format!(
                "stability of '{}' was relaxed from stable to {}",
                path,
                new_member.effective_stability(new_type)
            ),
        ));
    }

    match old_member.kind {
        MemberKind::Method => {
            // At most one mismatch per (path, kind): all signature problems
            // collapse into a single message.
            let reasons = signature_changes(old_member, new_member);
            if !reasons.is_empty() {
                out.push(Mismatch::new(
                    ChangeKind::SignatureChanged,
                    path,
                    old_stability,
                    format!("signature of '{}' changed: {}", path, reasons.join("; ")),
                ));
            }
        }
        MemberKind::Property => {
            let reasons = property_changes(old_member, new_member);
            if !reasons.is_empty() {
                out.push(Mismatch::new(
                    ChangeKind::PropertyChanged,
                    path,
                    old_stability,
                    format!("property '{}' changed: {}", path, reasons.join("; ")),
                ));
            }
        }
        MemberKind::EnumMember => {}
    }
}

/// Incompatible differences between two method signatures.
fn signature_changes(old: &Member, new: &Member) -> Vec<String> {
    let mut reasons = Vec::new();

    if old.returns != new.returns {
        reasons.push(format!(
            "return type changed from '{}' to '{}'",
            old.returns.as_deref().unwrap_or("void"),
            new.returns.as_deref().unwrap_or("void")
        ));
    }

    if old.static_ != new.static_ {
        reasons.push(if new.static_ {
            "method became static".to_string()
        } else {
            "method is no longer static".to_string()
        });
    }

    for (i, old_param) in old.parameters.iter().enumerate() {
        match new.parameters.get(i) {
            None => {
                reasons.push(format!("parameter '{}' was removed", old_param.name));
            }
            Some(new_param) => {
                if old_param.type_name != new_param.type_name {
                    reasons.push(format!(
                        "parameter '{}' changed type from '{}' to '{}'",
                        old_param.name, old_param.type_name, new_param.type_name
                    ));
                }
            }
        }
    }

    // New trailing parameters are fine only while optional.
    for new_param in new.parameters.iter().skip(old.parameters.len()) {
        if !new_param.optional {
            reasons.push(format!(
                "required parameter '{}' was added",
                new_param.name
            ));
        }
    }

    // A previously optional parameter becoming required breaks callers that
    // omitted it.
    for (old_param, new_param) in old.parameters.iter().zip(new.parameters.iter()) {
        if old_param.optional && !new_param.optional {
            reasons.push(format!(
                "parameter '{}' is no longer optional",
                old_param.name
            ));
        }
    }

    reasons
}

/// Incompatible differences between two property declarations.
fn property_changes(old: &Member, new: &Member) -> Vec<String> {
    let mut reasons = Vec::new();

    if old.type_name != new.type_name {
        reasons.push(format!(
            "type changed from '{}' to '{}'",
            old.type_name.as_deref().unwrap_or("unknown"),
            new.type_name.as_deref().unwrap_or("unknown")
        ));
    }

    if !old.immutable && new.immutable {
        reasons.push("property became read-only".to_string());
    }

    if old.static_ != new.static_ {
        reasons.push(if new.static_ {
            "property became static".to_string()
        } else {
            "property is no longer static".to_string()
        });
    }

    reasons
}
