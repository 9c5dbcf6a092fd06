//! Template-driven reaction generation.
//!
//! Declarative reaction rules ([`rules::RuleDefinition`]) are compiled
//! into executable rule instances and applied to reactant structures by
//! a [`reactor::PreparedReactor`], either as single-stage rewrites or
//! as a bounded multi-step search over reaction sequences. The
//! structure-matching backend is pluggable via the [`engine::Engine`]
//! trait. A separate [`fingerprint`] module encodes structures as
//! fixed-length binary feature vectors for similarity search.

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod library;
pub mod reactor;
pub mod registry;
pub mod rules;

mod compile;

pub use engine::{Engine, Pattern, Reaction, Rewriter};
pub use error::{
    BuildError, DefinitionError, MappingError, PatternError, ReactorError, RegistryError,
};
pub use fingerprint::{FragmentGraph, LinearFingerprint};
pub use library::built_in_definitions;
pub use reactor::{PreparedReactor, ReactOptions, Reactions};
pub use registry::Registry;
pub use rules::{Role, RuleDefinition, TemplateSpec};

#[cfg(test)]
mod testkit;
