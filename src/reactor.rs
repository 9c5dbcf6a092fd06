//! Prepared reactors and the reaction-generation drivers.
//!
//! A [`PreparedReactor`] compiles a [`RuleDefinition`] once at
//! construction and is read-only afterwards; concurrent calls against
//! one reactor are safe. Invocation returns a lazy [`Reactions`]
//! iterator: no rewriting happens until the consumer pulls, and
//! abandoning the iterator mid-way is always safe.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::compile::{compile_definition, CompiledRule};
use crate::engine::{Engine, Pattern, Reaction, Rewriter};
use crate::error::{BuildError, MappingError, ReactorError};
use crate::rules::RuleDefinition;

/// Invocation options for [`PreparedReactor::react`].
#[derive(Debug, Clone)]
pub struct ReactOptions {
    one_shot: bool,
    check_alerts: bool,
    excess: Option<Vec<usize>>,
}

impl Default for ReactOptions {
    fn default() -> Self {
        Self {
            one_shot: true,
            check_alerts: true,
            excess: None,
        }
    }
}

impl ReactOptions {
    /// Single-stage products only (the default).
    pub fn one_shot() -> Self {
        Self::default()
    }

    /// Multi-step search over reaction sequences, intermediate stages
    /// included.
    pub fn cascade() -> Self {
        Self {
            one_shot: false,
            ..Self::default()
        }
    }

    /// Enable or disable structural alert checking.
    pub fn check_alerts(mut self, check: bool) -> Self {
        self.check_alerts = check;
        self
    }

    /// Indices of reactants that stay available, unconsumed, at every
    /// later stage of a cascade. Defaults to all reactants.
    pub fn excess(mut self, indices: Vec<usize>) -> Self {
        self.excess = Some(indices);
        self
    }
}

/// A rule definition compiled into executable rule instances.
pub struct PreparedReactor<E: Engine> {
    engine: E,
    name: String,
    description: String,
    global_alerts: Vec<E::Pattern>,
    rules: Vec<CompiledRule<E>>,
}

impl<E: Engine> PreparedReactor<E> {
    /// Compile `definition` against `engine`. Fails if the definition
    /// is malformed or any pattern source does not compile; a reactor
    /// is never partially usable.
    pub fn new(engine: E, definition: &RuleDefinition) -> Result<Self, BuildError> {
        let compiled = compile_definition(&engine, definition)?;
        Ok(Self {
            engine,
            name: definition.name.clone(),
            description: definition.description.clone(),
            global_alerts: compiled.global_alerts,
            rules: compiled.rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of compiled rule instances (cartesian product of role
    /// alternatives, summed over templates).
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Generate candidate reactions for `reactants`.
    ///
    /// Returns a lazy sequence of results, deduplicated by canonical
    /// key within this invocation. An input blocked by a global alert
    /// yields an empty sequence, not an error. Mid-search mapping
    /// failures surface as an `Err` item and end the sequence; results
    /// already yielded stay valid.
    pub fn react(
        &self,
        reactants: &[E::Structure],
        options: ReactOptions,
    ) -> Result<Reactions<'_, E>, ReactorError> {
        if reactants.is_empty() {
            return Err(ReactorError::EmptyReactants);
        }
        if let Some(indices) = &options.excess {
            if let Some(&index) = indices.iter().find(|&&i| i >= reactants.len()) {
                return Err(ReactorError::ExcessOutOfRange {
                    index,
                    count: reactants.len(),
                });
            }
        }

        // Global alerts run against the raw inputs, before renumbering.
        if options.check_alerts && blocked(&self.global_alerts, reactants) {
            trace!(reactor = %self.name, "input blocked by global alerts");
            return Ok(Reactions {
                inner: Inner::Blocked,
            });
        }

        let molecules = self.engine.renumber(reactants.to_vec())?;

        let inner = if options.one_shot {
            Inner::SingleShot(SingleShot {
                reactor: self,
                molecules,
                check_alerts: options.check_alerts,
                rule_idx: 0,
                pending: VecDeque::new(),
                seen: HashSet::new(),
            })
        } else {
            let excess: Vec<E::Structure> = match &options.excess {
                Some(indices) => indices.iter().map(|&i| molecules[i].clone()).collect(),
                None => molecules.clone(),
            };
            // Seeded in reverse registration order so the LIFO pop
            // explores rule 0 first.
            let mut stack = Vec::new();
            for i in (0..self.rules.len()).rev() {
                if options.check_alerts && blocked(&self.rules[i].alerts, &molecules) {
                    trace!(reactor = %self.name, rule = i, "seed blocked by local alerts");
                    continue;
                }
                let remaining = (0..self.rules.len()).filter(|&j| j != i).collect();
                stack.push(Frame {
                    rule: i,
                    reactants: molecules.clone(),
                    remaining,
                });
            }
            Inner::Cascade(Cascade {
                reactor: self,
                originals: molecules,
                excess,
                excess_is_all: options.excess.is_none(),
                stack,
                remaining: Vec::new(),
                pending: VecDeque::new(),
                to_branch: None,
                seen: HashSet::new(),
                done: false,
            })
        };
        Ok(Reactions { inner })
    }
}

fn blocked<P, S>(alerts: &[P], structures: &[S]) -> bool
where
    P: Pattern<S>,
{
    alerts
        .iter()
        .any(|alert| structures.iter().any(|m| alert.is_substructure_of(m)))
}

/// Lazy sequence of reaction results.
pub struct Reactions<'r, E: Engine> {
    inner: Inner<'r, E>,
}

enum Inner<'r, E: Engine> {
    /// Global alert hit: empty sequence.
    Blocked,
    SingleShot(SingleShot<'r, E>),
    Cascade(Cascade<'r, E>),
}

impl<E: Engine> Iterator for Reactions<'_, E> {
    type Item = Result<Reaction<E::Structure>, ReactorError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Blocked => None,
            Inner::SingleShot(driver) => driver.next_result(),
            Inner::Cascade(driver) => driver.next_result(),
        }
    }
}

/// First-generation products of each rule instance, in registration
/// order.
struct SingleShot<'r, E: Engine> {
    reactor: &'r PreparedReactor<E>,
    molecules: Vec<E::Structure>,
    check_alerts: bool,
    rule_idx: usize,
    pending: VecDeque<Reaction<E::Structure>>,
    seen: HashSet<String>,
}

impl<E: Engine> SingleShot<'_, E> {
    fn next_result(&mut self) -> Option<Result<Reaction<E::Structure>, ReactorError>> {
        loop {
            while let Some(candidate) = self.pending.pop_front() {
                let key = self.reactor.engine.canonical_key(&candidate);
                if self.seen.insert(key) {
                    return Some(Ok(candidate));
                }
                // Cross-instance duplicates are expected for symmetric
                // templates; drop silently.
            }
            loop {
                let rule = self.reactor.rules.get(self.rule_idx)?;
                self.rule_idx += 1;
                if self.check_alerts && blocked(&rule.alerts, &self.molecules) {
                    continue;
                }
                self.pending = rule.single_shot.apply(&self.molecules).into();
                break;
            }
        }
    }
}

/// One branch of the multi-step search.
///
/// `remaining` holds indices of rule instances not yet used along this
/// lineage; it shrinks by one per stage, which bounds the search depth.
struct Frame<E: Engine> {
    rule: usize,
    reactants: Vec<E::Structure>,
    remaining: Vec<usize>,
}

/// Depth-first search over reaction sequences, each rule instance used
/// at most once per lineage.
struct Cascade<'r, E: Engine> {
    reactor: &'r PreparedReactor<E>,
    /// Renumbered top-level inputs; every yielded result reports these
    /// as its reactants.
    originals: Vec<E::Structure>,
    excess: Vec<E::Structure>,
    excess_is_all: bool,
    stack: Vec<Frame<E>>,
    /// Remaining rules of the frame currently being drained.
    remaining: Vec<usize>,
    pending: VecDeque<Reaction<E::Structure>>,
    /// Last yielded raw result, awaiting expansion into next-stage
    /// frames. Branching is deferred to the next pull so a mapping
    /// failure in pool assembly surfaces after the result it follows,
    /// never instead of it.
    to_branch: Option<Reaction<E::Structure>>,
    seen: HashSet<String>,
    done: bool,
}

impl<E: Engine> Cascade<'_, E> {
    fn next_result(&mut self) -> Option<Result<Reaction<E::Structure>, ReactorError>> {
        if self.done {
            return None;
        }
        if let Some(result) = self.to_branch.take() {
            if let Err(e) = self.branch(&result) {
                self.done = true;
                return Some(Err(e.into()));
            }
        }
        loop {
            while let Some(candidate) = self.pending.pop_front() {
                // Dedup on the stage-local result, before rebuilding
                // with the top-level reactants.
                let key = self.reactor.engine.canonical_key(&candidate);
                if !self.seen.insert(key) {
                    continue;
                }
                let result = Reaction {
                    reactants: self.originals.clone(),
                    products: candidate.products.clone(),
                };
                self.to_branch = Some(candidate);
                return Some(Ok(result));
            }
            let frame = match self.stack.pop() {
                Some(frame) => frame,
                None => {
                    self.done = true;
                    return None;
                }
            };
            trace!(
                rule = frame.rule,
                arity = self.reactor.rules[frame.rule].arity,
                pool = frame.reactants.len(),
                remaining = frame.remaining.len(),
                "explore cascade frame"
            );
            self.pending = self.reactor.rules[frame.rule]
                .exhaustive
                .apply(&frame.reactants)
                .into();
            self.remaining = frame.remaining;
        }
    }

    /// Assemble the next-stage pool (products first, then excess) and
    /// push one frame per branch choice.
    fn branch(&mut self, result: &Reaction<E::Structure>) -> Result<(), MappingError> {
        let mut pool = Vec::with_capacity(result.products.len() + self.excess.len());
        pool.extend(result.products.iter().cloned());
        pool.extend(self.excess.iter().cloned());
        let pool = self.reactor.engine.renumber(pool)?;

        if !self.excess_is_all {
            // Declared excess is treated as inexhaustible: products may
            // react with the whole pool at once (multicomponent
            // reactions, e.g. Ugi).
            for (pos, &rule) in self.remaining.iter().enumerate() {
                let mut remaining = self.remaining.clone();
                remaining.remove(pos);
                self.stack.push(Frame {
                    rule,
                    reactants: pool.clone(),
                    remaining,
                });
            }
        } else {
            // Default: one non-product reactant is consumed per stage.
            for dropped in result.products.len()..pool.len() {
                let mut narrowed = pool.clone();
                narrowed.remove(dropped);
                for (pos, &rule) in self.remaining.iter().enumerate() {
                    let mut remaining = self.remaining.clone();
                    remaining.remove(pos);
                    self.stack.push(Frame {
                        rule,
                        reactants: narrowed.clone(),
                        remaining,
                    });
                }
            }
        }
        Ok(())
    }
}
