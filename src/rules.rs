//! Typed reaction rule definitions.
//!
//! A [`RuleDefinition`] is the declarative form of a reactor: one or
//! more [`TemplateSpec`]s, each mapping reactant roles to alternative
//! substructure patterns, plus structural alerts at two levels
//! (template-local and definition-global). Definitions are plain data
//! and serialize to/from JSON via serde.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// A labeled reactant slot in a template.
///
/// Roles are ordered; cartesian expansion in the rule compiler walks
/// them in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    A,
    B,
    C,
    D,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::A, Role::B, Role::C, Role::D];

    pub fn letter(self) -> char {
        match self {
            Role::A => 'A',
            Role::B => 'B',
            Role::C => 'C',
            Role::D => 'D',
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One reaction template: per-role pattern alternatives, a product
/// pattern and template-local alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Alternative patterns per role. A `BTreeMap` keeps roles in
    /// canonical A..D order.
    pub roles: BTreeMap<Role, Vec<String>>,
    /// Product pattern with numbered attachment points.
    pub product: String,
    /// Functional groups incompatible with this template.
    #[serde(default)]
    pub alerts: Vec<String>,
}

impl TemplateSpec {
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            roles: BTreeMap::new(),
            product: product.into(),
            alerts: Vec::new(),
        }
    }

    /// Add alternative patterns for a role.
    pub fn role<I, P>(mut self, role: Role, alternatives: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.roles
            .entry(role)
            .or_default()
            .extend(alternatives.into_iter().map(Into::into));
        self
    }

    pub fn alert(mut self, pattern: impl Into<String>) -> Self {
        self.alerts.push(pattern.into());
        self
    }

    /// Number of compiled instances this template expands to.
    pub fn combination_count(&self) -> usize {
        self.roles.values().map(Vec::len).product()
    }
}

/// A named set of templates plus definition-global alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub templates: Vec<TemplateSpec>,
    /// Functional groups incompatible with every template in this
    /// definition.
    #[serde(default)]
    pub alerts: Vec<String>,
}

impl RuleDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            templates: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn template(mut self, template: TemplateSpec) -> Self {
        self.templates.push(template);
        self
    }

    pub fn alert(mut self, pattern: impl Into<String>) -> Self {
        self.alerts.push(pattern.into());
        self
    }

    /// Number of compiled instances across all templates.
    pub fn instance_count(&self) -> usize {
        self.templates.iter().map(TemplateSpec::combination_count).sum()
    }

    /// Validate the definition shape before compilation.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.templates.is_empty() {
            return Err(DefinitionError::NoTemplates);
        }
        if self.alerts.iter().any(String::is_empty) {
            return Err(DefinitionError::EmptyGlobalAlert);
        }
        for (i, template) in self.templates.iter().enumerate() {
            if template.roles.is_empty() {
                return Err(DefinitionError::NoRoles { template: i });
            }
            for (&role, alternatives) in &template.roles {
                if alternatives.is_empty() {
                    return Err(DefinitionError::NoAlternatives { template: i, role });
                }
                if alternatives.iter().any(String::is_empty) {
                    return Err(DefinitionError::EmptyPattern { template: i });
                }
            }
            if template.product.is_empty() || template.alerts.iter().any(String::is_empty) {
                return Err(DefinitionError::EmptyPattern { template: i });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> RuleDefinition {
        RuleDefinition::new("test", "test rule")
            .template(TemplateSpec::new("[A:1]-[A:2]").role(Role::A, ["[O:1]"]))
    }

    #[test]
    fn roles_iterate_in_canonical_order() {
        let template = TemplateSpec::new("p")
            .role(Role::D, ["d"])
            .role(Role::A, ["a"])
            .role(Role::C, ["c"]);
        let order: Vec<Role> = template.roles.keys().copied().collect();
        assert_eq!(order, vec![Role::A, Role::C, Role::D]);
    }

    #[test]
    fn combination_count_is_product_of_alternatives() {
        let template = TemplateSpec::new("p")
            .role(Role::A, ["a1", "a2"])
            .role(Role::B, ["b1", "b2", "b3"]);
        assert_eq!(template.combination_count(), 6);
    }

    #[test]
    fn instance_count_sums_templates() {
        let def = RuleDefinition::new("r", "")
            .template(TemplateSpec::new("p").role(Role::A, ["a1", "a2"]))
            .template(TemplateSpec::new("q").role(Role::A, ["a"]).role(Role::B, ["b1", "b2"]));
        assert_eq!(def.instance_count(), 4);
    }

    #[test]
    fn validate_accepts_minimal_definition() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_definition() {
        let def = RuleDefinition::new("empty", "");
        assert_eq!(def.validate(), Err(DefinitionError::NoTemplates));
    }

    #[test]
    fn validate_rejects_roleless_template() {
        let def = RuleDefinition::new("r", "").template(TemplateSpec::new("p"));
        assert_eq!(def.validate(), Err(DefinitionError::NoRoles { template: 0 }));
    }

    #[test]
    fn validate_rejects_empty_alternative_list() {
        let mut template = TemplateSpec::new("p");
        template.roles.insert(Role::B, Vec::new());
        let def = RuleDefinition::new("r", "").template(template);
        assert_eq!(
            def.validate(),
            Err(DefinitionError::NoAlternatives { template: 0, role: Role::B })
        );
    }

    #[test]
    fn validate_rejects_empty_pattern_source() {
        let def = RuleDefinition::new("r", "")
            .template(TemplateSpec::new("").role(Role::A, ["a"]));
        assert_eq!(def.validate(), Err(DefinitionError::EmptyPattern { template: 0 }));
    }
}
