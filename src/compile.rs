//! Expansion of rule definitions into compiled rule instances.
//!
//! Each template's per-role alternative patterns are expanded by
//! cartesian product: one [`CompiledRule`] per concrete choice of one
//! pattern per role, bound to both an exhaustive and a single-shot
//! rewriter. Compilation is all-or-nothing; one bad pattern source
//! fails the whole definition.

use tracing::debug;

use crate::engine::Engine;
use crate::error::{BuildError, PatternError};
use crate::rules::RuleDefinition;

/// One concrete role-pattern combination, bound to both rewrite modes
/// and its template-local alerts.
pub(crate) struct CompiledRule<E: Engine> {
    pub(crate) arity: usize,
    pub(crate) exhaustive: E::Rewriter,
    pub(crate) single_shot: E::Rewriter,
    pub(crate) alerts: Vec<E::Pattern>,
}

pub(crate) struct CompiledRuleSet<E: Engine> {
    pub(crate) global_alerts: Vec<E::Pattern>,
    pub(crate) rules: Vec<CompiledRule<E>>,
}

pub(crate) fn compile_definition<E: Engine>(
    engine: &E,
    definition: &RuleDefinition,
) -> Result<CompiledRuleSet<E>, BuildError> {
    definition.validate()?;

    let global_alerts = compile_all(engine, &definition.alerts)?;

    let mut rules = Vec::with_capacity(definition.instance_count());
    for template in &definition.templates {
        let alternatives: Vec<Vec<E::Pattern>> = template
            .roles
            .values()
            .map(|patterns| compile_all(engine, patterns))
            .collect::<Result<_, _>>()?;
        let product = engine.compile(&template.product)?;
        let alerts = compile_all(engine, &template.alerts)?;

        // Symmetry-duplicate matches are left in on purpose; the
        // drivers deduplicate by canonical key instead.
        for combo in combinations(&alternatives) {
            rules.push(CompiledRule {
                arity: combo.len(),
                exhaustive: engine.rewriter(combo.clone(), product.clone(), false, false),
                single_shot: engine.rewriter(combo, product.clone(), true, false),
                alerts: alerts.clone(),
            });
        }
    }

    debug!(
        rule = %definition.name,
        instances = rules.len(),
        "compiled rule definition"
    );
    Ok(CompiledRuleSet { global_alerts, rules })
}

fn compile_all<E: Engine>(
    engine: &E,
    sources: &[String],
) -> Result<Vec<E::Pattern>, PatternError> {
    sources.iter().map(|s| engine.compile(s)).collect()
}

/// Cartesian product of pattern alternatives, one element per role, in
/// role order.
fn combinations<P: Clone>(sets: &[Vec<P>]) -> Vec<Vec<P>> {
    let mut result: Vec<Vec<P>> = vec![Vec::new()];
    for set in sets {
        let mut next = Vec::with_capacity(result.len() * set.len());
        for combo in &result {
            for item in set {
                let mut extended = combo.clone();
                extended.push(item.clone());
                next.push(extended);
            }
        }
        result = next;
    }
    result
}
