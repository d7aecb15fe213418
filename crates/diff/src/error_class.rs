//! Error-class resolver: symbolic policy tokens to concrete stability sets.
//!
//! Callers configure the gate with a small vocabulary of symbolic tokens
//! (e.g. `prod`, `non-experimental`); the resolver expands them into the
//! set of stability levels whose violations must fail the build.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use surface_manifest::StabilityLevel;

/// A symbolic, user-facing policy token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorClass {
    Stable,
    Experimental,
    External,
    Deprecated,
    NonExperimental,
    Prod,
    All,
}

impl ErrorClass {
    /// Every token, in declaration order.
    pub const ALL: [ErrorClass; 7] = [
        ErrorClass::Stable,
        ErrorClass::Experimental,
        ErrorClass::External,
        ErrorClass::Deprecated,
        ErrorClass::NonExperimental,
        ErrorClass::Prod,
        ErrorClass::All,
    ];

    /// The stability levels this token expands to.
    pub fn expand(&self) -> BTreeSet<StabilityLevel> {
        let levels: &[StabilityLevel] = match self {
            ErrorClass::Stable => &[StabilityLevel::Stable],
            ErrorClass::Experimental => &[StabilityLevel::Experimental],
            ErrorClass::External => &[StabilityLevel::External],
            ErrorClass::Deprecated => &[StabilityLevel::Deprecated],
            ErrorClass::NonExperimental => &[
                StabilityLevel::Stable,
                StabilityLevel::External,
                StabilityLevel::Deprecated,
            ],
            ErrorClass::Prod => &[StabilityLevel::Stable, StabilityLevel::Deprecated],
            ErrorClass::All => &StabilityLevel::ALL,
        };
        levels.iter().copied().collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Stable => "stable",
            ErrorClass::Experimental => "experimental",
            ErrorClass::External => "external",
            ErrorClass::Deprecated => "deprecated",
            ErrorClass::NonExperimental => "non-experimental",
            ErrorClass::Prod => "prod",
            ErrorClass::All => "all",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized error-class token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error class: '{0}' (valid: stable, experimental, external, deprecated, non-experimental, prod, all)")]
pub struct UnknownErrorClass(pub String);

impl FromStr for ErrorClass {
    type Err = UnknownErrorClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(ErrorClass::Stable),
            "experimental" => Ok(ErrorClass::Experimental),
            "external" => Ok(ErrorClass::External),
            "deprecated" => Ok(ErrorClass::Deprecated),
            "non-experimental" => Ok(ErrorClass::NonExperimental),
            "prod" => Ok(ErrorClass::Prod),
            "all" => Ok(ErrorClass::All),
            other => Err(UnknownErrorClass(other.to_string())),
        }
    }
}

/// Expand a set of tokens into the union of their stability levels.
///
/// Pure and referentially transparent; duplicates collapse in the set.
pub fn resolve_error_classes(classes: &BTreeSet<ErrorClass>) -> BTreeSet<StabilityLevel> {
    classes.iter().flat_map(|c| c.expand()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(classes: &[ErrorClass]) -> BTreeSet<ErrorClass> {
        classes.iter().copied().collect()
    }

    #[test]
    fn single_level_tokens_expand_to_themselves() {
        let singletons = [
            (ErrorClass::Stable, StabilityLevel::Stable),
            (ErrorClass::Experimental, StabilityLevel::Experimental),
            (ErrorClass::External, StabilityLevel::External),
            (ErrorClass::Deprecated, StabilityLevel::Deprecated),
        ];
        for (class, level) in singletons {
            let expected: BTreeSet<StabilityLevel> = [level].into_iter().collect();
            assert_eq!(class.expand(), expected, "expand({:?})", class);
        }
    }

    #[test]
    fn non_experimental_excludes_only_experimental() {
        let expanded = ErrorClass::NonExperimental.expand();
        assert_eq!(expanded.len(), 3);
        assert!(!expanded.contains(&StabilityLevel::Experimental));
        assert!(expanded.contains(&StabilityLevel::Stable));
        assert!(expanded.contains(&StabilityLevel::External));
        assert!(expanded.contains(&StabilityLevel::Deprecated));
    }

    #[test]
    fn prod_is_exactly_stable_and_deprecated() {
        let expanded = ErrorClass::Prod.expand();
        assert_eq!(expanded.len(), 2);
        assert!(expanded.contains(&StabilityLevel::Stable));
        assert!(expanded.contains(&StabilityLevel::Deprecated));
    }

    #[test]
    fn all_covers_every_level() {
        let expanded = ErrorClass::All.expand();
        assert_eq!(expanded.len(), 4);
        for level in StabilityLevel::ALL {
            assert!(expanded.contains(&level));
        }
    }

    #[test]
    fn resolve_unions_token_expansions() {
        let combined = resolve_error_classes(&set(&[ErrorClass::Stable, ErrorClass::Experimental]));
        let mut expected = ErrorClass::Stable.expand();
        expected.extend(ErrorClass::Experimental.expand());
        assert_eq!(combined, expected);
    }

    #[test]
    fn resolve_is_union_for_every_token_pair() {
        for a in ErrorClass::ALL {
            for b in ErrorClass::ALL {
                let combined = resolve_error_classes(&set(&[a, b]));
                let mut expected = a.expand();
                expected.extend(b.expand());
                assert_eq!(combined, expected, "resolve({:?}, {:?})", a, b);
            }
        }
    }

    #[test]
    fn from_str_round_trips() {
        for class in ErrorClass::ALL {
            let parsed: ErrorClass = class.as_str().parse().unwrap();
            assert_eq!(parsed, class);
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "production".parse::<ErrorClass>().unwrap_err();
        assert!(err.to_string().contains("production"));
        assert!(err.to_string().contains("non-experimental"));
    }
}
