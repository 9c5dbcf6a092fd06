//! Deterministic toy backend for driver tests.
//!
//! Structures are plain strings, a pattern matches by substring
//! containment and a rewrite concatenates the matched reactants. Simple
//! enough to hand-verify, rich enough to exercise cartesian expansion,
//! alert filtering, deduplication and the multi-step search.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::engine::{Engine, Pattern, Reaction, Rewriter};
use crate::error::{MappingError, PatternError};

#[derive(Debug, Clone, Default)]
pub(crate) struct TextEngine {
    rejected: Vec<String>,
    fail_renumber_over: Option<usize>,
    rewrite_calls: Arc<AtomicUsize>,
}

impl TextEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Treat `source` as a malformed pattern.
    pub(crate) fn reject_pattern(mut self, source: &str) -> Self {
        self.rejected.push(source.to_string());
        self
    }

    /// Fail mapping resolution for pools larger than `limit`.
    pub(crate) fn fail_renumber_over(mut self, limit: usize) -> Self {
        self.fail_renumber_over = Some(limit);
        self
    }

    /// Total rewriter invocations across all instances built from this
    /// engine (clones share the counter).
    pub(crate) fn rewrite_calls(&self) -> usize {
        self.rewrite_calls.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TextPattern {
    needle: String,
}

impl Pattern<String> for TextPattern {
    fn is_substructure_of(&self, structure: &String) -> bool {
        structure.contains(&self.needle)
    }
}

pub(crate) struct TextRewriter {
    roles: Vec<TextPattern>,
    calls: Arc<AtomicUsize>,
}

impl Rewriter<String> for TextRewriter {
    fn apply(&self, reactants: &[String]) -> Vec<Reaction<String>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut results = Vec::new();
        for assignment in assignments(reactants.len(), self.roles.len()) {
            let matched: Vec<&String> =
                assignment.iter().map(|&i| &reactants[i]).collect();
            if self
                .roles
                .iter()
                .zip(&matched)
                .all(|(role, m)| role.is_substructure_of(*m))
            {
                let product: String = matched.iter().map(|m| m.as_str()).collect();
                results.push(Reaction {
                    reactants: matched.into_iter().cloned().collect(),
                    products: vec![product],
                });
            }
        }
        results
    }
}

/// Ordered assignments of `arity` distinct pool indices, lexicographic.
fn assignments(pool: usize, arity: usize) -> Vec<Vec<usize>> {
    fn extend(pool: usize, arity: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == arity {
            out.push(current.clone());
            return;
        }
        for i in 0..pool {
            if !current.contains(&i) {
                current.push(i);
                extend(pool, arity, current, out);
                current.pop();
            }
        }
    }
    let mut out = Vec::new();
    extend(pool, arity, &mut Vec::with_capacity(arity), &mut out);
    out
}

impl Engine for TextEngine {
    type Structure = String;
    type Pattern = TextPattern;
    type Rewriter = TextRewriter;

    fn compile(&self, source: &str) -> Result<Self::Pattern, PatternError> {
        if self.rejected.iter().any(|r| r == source) {
            return Err(PatternError {
                source: source.to_string(),
                detail: "rejected by test engine".to_string(),
            });
        }
        Ok(TextPattern {
            needle: source.to_string(),
        })
    }

    fn rewriter(
        &self,
        roles: Vec<Self::Pattern>,
        _product: Self::Pattern,
        _one_shot: bool,
        _automorphism_filter: bool,
    ) -> Self::Rewriter {
        // The toy rewrite is inherently first-generation, so both modes
        // behave identically here.
        TextRewriter {
            roles,
            calls: Arc::clone(&self.rewrite_calls),
        }
    }

    fn renumber(&self, pool: Vec<String>) -> Result<Vec<String>, MappingError> {
        if let Some(limit) = self.fail_renumber_over {
            if pool.len() > limit {
                return Err(MappingError {
                    detail: format!("pool of {} exceeds test limit {limit}", pool.len()),
                });
            }
        }
        Ok(pool)
    }

    fn canonical_key(&self, reaction: &Reaction<String>) -> String {
        let mut reactants = reaction.reactants.clone();
        reactants.sort();
        let mut products = reaction.products.clone();
        products.sort();
        format!("{}>{}", reactants.join("."), products.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_are_distinct_and_ordered() {
        let all = assignments(3, 2);
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], vec![0, 1]);
        assert!(all.iter().all(|a| a[0] != a[1]));
    }

    #[test]
    fn rewriter_matches_roles_positionally() {
        let engine = TextEngine::new();
        let roles = vec![
            engine.compile("O").unwrap(),
            engine.compile("N").unwrap(),
        ];
        let product = engine.compile("p").unwrap();
        let rewriter = engine.rewriter(roles, product, true, false);
        let results = rewriter.apply(&["CO".to_string(), "CN".to_string()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].products, vec!["COCN".to_string()]);
    }

    #[test]
    fn canonical_key_is_order_independent() {
        let engine = TextEngine::new();
        let a = Reaction {
            reactants: vec!["X".to_string(), "Y".to_string()],
            products: vec!["XY".to_string()],
        };
        let b = Reaction {
            reactants: vec!["Y".to_string(), "X".to_string()],
            products: vec!["XY".to_string()],
        };
        assert_eq!(engine.canonical_key(&a), engine.canonical_key(&b));
    }
}
