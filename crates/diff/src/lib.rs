//! surface-diff: Stability-aware API compatibility comparator and classifier.
//!
//! The pipeline runs in one direction: two [`ApiManifest`]s go through the
//! structural comparator, which emits an ordered sequence of [`Mismatch`]es;
//! the classifier scores each mismatch against a resolved error-stability
//! set and an optional suppression baseline, producing [`Diagnostic`]s; the
//! [`DiffReport`] wraps the diagnostics for rendering and exit-code gating.
//!
//! Every function here is pure and synchronous. Independent comparison runs
//! share nothing but immutable configuration, so classifying many
//! package-version pairs in parallel needs no coordination.

pub mod classify;
pub mod compare;
pub mod error_class;
pub mod mismatch;
pub mod report;

pub use classify::{
    classify, error_count, has_errors, only_errors, only_warnings, warning_count, Diagnostic,
    Severity,
};
pub use compare::compare_manifests;
pub use error_class::{resolve_error_classes, ErrorClass, UnknownErrorClass};
pub use mismatch::{ChangeKind, Mismatch};
pub use report::{DiffReport, ReportSummary};

use std::collections::BTreeSet;
use surface_manifest::{ApiManifest, StabilityLevel};

/// Compare two manifests and classify every structural difference.
///
/// Convenience entry point running the full pipeline: compare, classify
/// against `error_stabilities` with `skip` suppressed, wrap in a report.
pub fn diff_manifests(
    old: &ApiManifest,
    new: &ApiManifest,
    error_stabilities: &BTreeSet<StabilityLevel>,
    skip: &BTreeSet<String>,
) -> DiffReport {
    let mismatches = compare_manifests(old, new);
    let diagnostics = classify(mismatches, error_stabilities, skip);
    DiffReport::new(diagnostics)
}
