//! Violation classifier and diagnostics aggregates.
//!
//! The classifier is the policy core: it turns the comparator's mismatch
//! sequence into diagnostics with a resolved severity, honoring the
//! caller's error-stability set and suppression baseline. It is pure and
//! total: every mismatch yields exactly one diagnostic, in input order, and
//! nothing is ever dropped or merged.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::mismatch::Mismatch;
use surface_manifest::StabilityLevel;

/// Resolved severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
}

/// A mismatch annotated with its resolved severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub mismatch: Mismatch,
    pub severity: Severity,
}

/// Classify every mismatch against the error-stability set and baseline.
///
/// A mismatch whose violation key is in `skip` is forced to `Warning`
/// regardless of its governing stability: suppression silences failure, not
/// visibility. Otherwise the severity is `Error` iff the governing
/// stability is in `error_stabilities`.
///
/// Output order equals input order and output length equals input length.
pub fn classify(
    mismatches: Vec<Mismatch>,
    error_stabilities: &BTreeSet<StabilityLevel>,
    skip: &BTreeSet<String>,
) -> Vec<Diagnostic> {
    mismatches
        .into_iter()
        .map(|mismatch| {
            let severity = if skip.contains(&mismatch.violation_key) {
                Severity::Warning
            } else if error_stabilities.contains(&mismatch.governing_stability) {
                Severity::Error
            } else {
                Severity::Warning
            };
            Diagnostic { mismatch, severity }
        })
        .collect()
}

/// True iff any diagnostic has severity `Error`.
///
/// Callers gate process exit status on this; warnings never affect it.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

/// Filter to `Error` severity, preserving order.
pub fn only_errors(diagnostics: &[Diagnostic]) -> Vec<&Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

/// Filter to `Warning` severity, preserving order.
pub fn only_warnings(diagnostics: &[Diagnostic]) -> Vec<&Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect()
}

/// Count of `Error` severity diagnostics.
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    only_errors(diagnostics).len()
}

/// Count of `Warning` severity diagnostics.
pub fn warning_count(diagnostics: &[Diagnostic]) -> usize {
    only_warnings(diagnostics).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_class::{resolve_error_classes, ErrorClass};
    use crate::mismatch::ChangeKind;

    fn mismatch(path: &str, stability: StabilityLevel) -> Mismatch {
        Mismatch::new(
            ChangeKind::Removed,
            path,
            stability,
            format!("'{}' was removed", path),
        )
    }

    fn errors_on(classes: &[ErrorClass]) -> BTreeSet<StabilityLevel> {
        resolve_error_classes(&classes.iter().copied().collect())
    }

    fn no_skip() -> BTreeSet<String> {
        BTreeSet::new()
    }

    #[test]
    fn experimental_violation_under_stable_policy_is_warning() {
        let diags = classify(
            vec![mismatch("acme.Widget", StabilityLevel::Experimental)],
            &errors_on(&[ErrorClass::Stable]),
            &no_skip(),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert!(!has_errors(&diags));
    }

    #[test]
    fn severity_follows_governing_stability_per_mismatch() {
        let diags = classify(
            vec![
                mismatch("acme.A", StabilityLevel::Experimental),
                mismatch("acme.B", StabilityLevel::External),
            ],
            &errors_on(&[ErrorClass::Stable, ErrorClass::Experimental]),
            &no_skip(),
        );
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[1].severity, Severity::Warning);
        assert_eq!(only_errors(&diags).len(), 1);
        assert_eq!(only_warnings(&diags).len(), 1);
    }

    #[test]
    fn stable_violation_under_stable_policy_is_error() {
        let diags = classify(
            vec![mismatch("acme.Widget", StabilityLevel::Stable)],
            &errors_on(&[ErrorClass::Stable]),
            &no_skip(),
        );
        assert_eq!(diags[0].severity, Severity::Error);
        assert!(has_errors(&diags));
    }

    #[test]
    fn suppression_forces_warning_but_keeps_diagnostic() {
        let m = mismatch("acme.Widget", StabilityLevel::Stable);
        let skip: BTreeSet<String> = [m.violation_key.clone()].into_iter().collect();
        let diags = classify(vec![m], &errors_on(&[ErrorClass::Stable]), &skip);
        assert_eq!(diags.len(), 1, "suppressed mismatch is still emitted");
        assert_eq!(diags[0].severity, Severity::Warning);
        assert!(!has_errors(&diags));
    }

    #[test]
    fn suppression_of_one_key_leaves_others_escalated() {
        let a = mismatch("acme.A", StabilityLevel::Stable);
        let b = mismatch("acme.B", StabilityLevel::Stable);
        let skip: BTreeSet<String> = [a.violation_key.clone()].into_iter().collect();
        let diags = classify(vec![a, b], &errors_on(&[ErrorClass::Stable]), &skip);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[1].severity, Severity::Error);
    }

    #[test]
    fn classification_never_filters_and_preserves_order() {
        let inputs: Vec<Mismatch> = (0..10)
            .map(|i| mismatch(&format!("acme.T{}", i), StabilityLevel::Experimental))
            .collect();
        let keys: Vec<String> = inputs.iter().map(|m| m.violation_key.clone()).collect();
        let diags = classify(inputs, &errors_on(&[ErrorClass::All]), &no_skip());
        assert_eq!(diags.len(), 10);
        for (i, d) in diags.iter().enumerate() {
            assert_eq!(d.mismatch.violation_key, keys[i]);
        }
    }

    #[test]
    fn message_and_key_pass_through_unchanged() {
        let m = Mismatch::new(
            ChangeKind::SignatureChanged,
            "acme.Widget#frob",
            StabilityLevel::Stable,
            "return type changed from 'void' to 'string'",
        );
        let diags = classify(vec![m.clone()], &errors_on(&[ErrorClass::Prod]), &no_skip());
        assert_eq!(diags[0].mismatch, m);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let diags = classify(vec![], &errors_on(&[ErrorClass::All]), &no_skip());
        assert!(diags.is_empty());
        assert!(!has_errors(&diags));
        assert!(only_errors(&diags).is_empty());
        assert!(only_warnings(&diags).is_empty());
    }

    #[test]
    fn aggregates_partition_the_diagnostics() {
        let diags = classify(
            vec![
                mismatch("acme.A", StabilityLevel::Stable),
                mismatch("acme.B", StabilityLevel::Experimental),
                mismatch("acme.C", StabilityLevel::Deprecated),
            ],
            &errors_on(&[ErrorClass::Prod]),
            &no_skip(),
        );

        let errors = only_errors(&diags);
        let warnings = only_warnings(&diags);
        assert_eq!(errors.len() + warnings.len(), diags.len());
        assert_eq!(error_count(&diags), errors.len());
        assert_eq!(warning_count(&diags), warnings.len());
        assert_eq!(has_errors(&diags), !errors.is_empty());
        for e in &errors {
            assert!(!warnings.contains(e));
        }
    }
}
