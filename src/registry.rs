//! Named registry of rule definitions with build-once reactor caching.
//!
//! Definitions are cheap data; compiled reactors are not. The registry
//! builds a [`PreparedReactor`] the first time a name is requested and
//! serves the cached instance afterwards. Entries are immutable once
//! built, so the registry is read-many safe.

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::engine::Engine;
use crate::error::RegistryError;
use crate::reactor::PreparedReactor;
use crate::rules::RuleDefinition;

struct Entry<E: Engine> {
    definition: RuleDefinition,
    reactor: OnceCell<PreparedReactor<E>>,
}

pub struct Registry<E: Engine> {
    engine: E,
    entries: BTreeMap<String, Entry<E>>,
}

impl<E: Engine + Clone> Registry<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            entries: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the built-in reaction library.
    pub fn with_built_ins(engine: E) -> Self {
        let mut registry = Self::new(engine);
        for definition in crate::library::built_in_definitions() {
            registry.insert(definition);
        }
        registry
    }

    /// Register a definition under its own name, replacing any previous
    /// entry (and discarding that entry's cached reactor).
    pub fn insert(&mut self, definition: RuleDefinition) {
        self.entries.insert(
            definition.name.clone(),
            Entry {
                definition,
                reactor: OnceCell::new(),
            },
        );
    }

    /// Fetch the reactor for `name`, compiling it on first use.
    ///
    /// A failed build is not cached; a later call retries.
    pub fn get(&self, name: &str) -> Result<&PreparedReactor<E>, RegistryError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::Unknown {
                name: name.to_string(),
            })?;
        entry
            .reactor
            .get_or_try_init(|| {
                debug!(reactor = name, "building reactor");
                PreparedReactor::new(self.engine.clone(), &entry.definition)
            })
            .map_err(RegistryError::from)
    }

    pub fn definition(&self, name: &str) -> Option<&RuleDefinition> {
        self.entries.get(name).map(|e| &e.definition)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
