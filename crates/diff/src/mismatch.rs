//! Mismatch model: one structural difference between two manifest versions.

use serde::Serialize;
use surface_manifest::StabilityLevel;

/// The kind of structural change a mismatch reports.
///
/// The kind's slug participates in the violation key, so renaming a slug
/// invalidates existing baseline entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// A type present in the old manifest is absent from the new one.
    Removed,
    /// A type changed shape (class/interface/enum).
    KindChanged,
    /// An element's declared stability left `Stable`.
    StabilityDowngraded,
    /// A member present on the old type is absent from the new one.
    MemberRemoved,
    /// A method's return type or parameter list changed incompatibly.
    SignatureChanged,
    /// A property's value type changed, or it became read-only.
    PropertyChanged,
    /// A member was added to an interface; implementors must supply it.
    MemberAdded,
}

impl ChangeKind {
    /// Slug used as the first component of a violation key.
    pub fn key_slug(&self) -> &'static str {
        match self {
            ChangeKind::Removed => "removed",
            ChangeKind::KindChanged => "kind-changed",
            ChangeKind::StabilityDowngraded => "stability-downgraded",
            ChangeKind::MemberRemoved => "member-removed",
            ChangeKind::SignatureChanged => "signature-changed",
            ChangeKind::PropertyChanged => "property-changed",
            ChangeKind::MemberAdded => "member-added",
        }
    }
}

/// One discovered structural difference between the old and new manifest.
///
/// Immutable: created once by the comparator, consumed by the classifier,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// The stability level whose guarantee is at stake for this difference.
    ///
    /// This is the stability declared on the old (baseline) version of the
    /// affected element, because that is the guarantee previous consumers
    /// relied upon. For a pure addition it is the new element's own
    /// declared/default stability.
    pub governing_stability: StabilityLevel,
    /// Stable identity for this exact difference: `<kind-slug>:<path>`.
    ///
    /// Depends only on the element path and change kind, never on the
    /// message text, so baseline files stay valid across message rewording.
    pub violation_key: String,
    /// Human-readable description of the difference.
    pub message: String,
}

impl Mismatch {
    pub fn new(
        kind: ChangeKind,
        path: &str,
        governing_stability: StabilityLevel,
        message: impl Into<String>,
    ) -> Self {
        Mismatch {
            governing_stability,
            violation_key: format!("{}:{}", kind.key_slug(), path),
            message: message.into(),
        }
    }
}
