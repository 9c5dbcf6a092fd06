//! Trait seam for the structure-matching backend.
//!
//! The reactor core is generic over the machinery that actually matches
//! and rewrites molecular graphs: a pattern compiler, a substructure
//! test, a graph-rewrite executable, an atom-mapping resolver and a
//! canonical serialization. Any backend providing these five operations
//! can drive the template machinery in [`crate::reactor`].

use crate::error::{MappingError, PatternError};

/// A compiled substructure query.
pub trait Pattern<S> {
    /// True if this pattern occurs as a substructure of `structure`.
    fn is_substructure_of(&self, structure: &S) -> bool;
}

/// One reactant set together with the products formed from it.
///
/// Produced by [`Rewriter::apply`] and yielded by the reactor drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction<S> {
    pub reactants: Vec<S>,
    pub products: Vec<S>,
}

/// A rule bound to concrete role patterns, ready to run against a
/// reactant pool.
pub trait Rewriter<S> {
    /// Apply the rule to `reactants` and return every candidate result.
    ///
    /// The pool may hold more structures than the rule has roles; the
    /// backend picks the matching subsets. A pool with no valid match
    /// returns an empty vec.
    fn apply(&self, reactants: &[S]) -> Vec<Reaction<S>>;
}

/// Backend contract: compile patterns, build rewriters, renumber atom
/// mappings and serialize results to a canonical key.
pub trait Engine {
    type Structure: Clone;
    type Pattern: Pattern<Self::Structure> + Clone;
    type Rewriter: Rewriter<Self::Structure>;

    /// Compile a pattern source string into a matchable query.
    fn compile(&self, source: &str) -> Result<Self::Pattern, PatternError>;

    /// Build an executable for one role-pattern combination and one
    /// product pattern.
    ///
    /// `one_shot` restricts rewriting to first-generation products;
    /// `automorphism_filter` suppresses duplicate-by-symmetry matches
    /// (the reactor core always disables it and relies on canonical-key
    /// deduplication instead).
    fn rewriter(
        &self,
        roles: Vec<Self::Pattern>,
        product: Self::Pattern,
        one_shot: bool,
        automorphism_filter: bool,
    ) -> Self::Rewriter;

    /// Renumber atom identifiers so no two structures in the pool
    /// overlap. Fatal if the conflict cannot be repaired.
    fn renumber(
        &self,
        pool: Vec<Self::Structure>,
    ) -> Result<Vec<Self::Structure>, MappingError>;

    /// Stable, content-canonical key for a reaction. Two chemically
    /// equivalent results must map to the same key.
    fn canonical_key(&self, reaction: &Reaction<Self::Structure>) -> String;
}
