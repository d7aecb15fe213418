//! surface-manifest: Typed API manifest model and deserialization.
//!
//! Provides the `StabilityLevel` enumeration, the typed structs for a
//! published API surface (types and members), and a single
//! `from_manifest()` entry point that deserializes a `serde_json::Value`
//! manifest into an [`ApiManifest`].
//!
//! Every downstream consumer (the comparator, the classifier, the CLI)
//! depends on this crate so that stability inference happens exactly once,
//! at the boundary where external data enters the toolchain.

pub mod deserialize;
pub mod stability;
pub mod types;

pub use deserialize::{from_manifest, ManifestError};
pub use stability::{StabilityLevel, UnknownStability};
pub use types::{ApiManifest, ApiType, Member, MemberKind, Parameter, TypeKind};
