use std::fmt;

use crate::rules::Role;

/// Error returned when a rule definition fails shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// The definition has no templates.
    NoTemplates,
    /// A template declares no reactant roles.
    NoRoles { template: usize },
    /// A role has no alternative patterns.
    NoAlternatives { template: usize, role: Role },
    /// A pattern source string inside a template is empty.
    EmptyPattern { template: usize },
    /// A definition-global alert pattern source is empty.
    EmptyGlobalAlert,
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTemplates => write!(f, "rule definition has no templates"),
            Self::NoRoles { template } => {
                write!(f, "template {template} declares no reactant roles")
            }
            Self::NoAlternatives { template, role } => {
                write!(f, "template {template} role {role} has no alternative patterns")
            }
            Self::EmptyPattern { template } => {
                write!(f, "template {template} contains an empty pattern source")
            }
            Self::EmptyGlobalAlert => {
                write!(f, "definition has an empty global alert pattern")
            }
        }
    }
}

impl std::error::Error for DefinitionError {}

/// Error returned by the engine when a pattern source fails to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// The offending pattern source string.
    pub source: String,
    /// Engine-specific diagnostic.
    pub detail: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern {:?}: {}", self.source, self.detail)
    }
}

impl std::error::Error for PatternError {}

/// Error returned by the engine when atom identifiers of a reactant
/// pool cannot be made non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingError {
    pub detail: String,
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom mapping conflict: {}", self.detail)
    }
}

impl std::error::Error for MappingError {}

/// Error returned when constructing a [`PreparedReactor`](crate::reactor::PreparedReactor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The rule definition is malformed.
    Definition(DefinitionError),
    /// A pattern source failed to compile.
    Pattern(PatternError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Definition(e) => write!(f, "malformed rule definition: {e}"),
            Self::Pattern(e) => write!(f, "pattern compilation failed: {e}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Definition(e) => Some(e),
            Self::Pattern(e) => Some(e),
        }
    }
}

impl From<DefinitionError> for BuildError {
    fn from(e: DefinitionError) -> Self {
        Self::Definition(e)
    }
}

impl From<PatternError> for BuildError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

/// Error raised when invoking a reactor or pulling from its result
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactorError {
    /// The reactant list is empty.
    EmptyReactants,
    /// An excess index does not point into the reactant list.
    ExcessOutOfRange { index: usize, count: usize },
    /// The mapping resolver could not renumber a reactant pool.
    Mapping(MappingError),
}

impl fmt::Display for ReactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyReactants => write!(f, "empty reactant list"),
            Self::ExcessOutOfRange { index, count } => {
                write!(f, "excess index {index} out of range for {count} reactants")
            }
            Self::Mapping(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReactorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mapping(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MappingError> for ReactorError {
    fn from(e: MappingError) -> Self {
        Self::Mapping(e)
    }
}

/// Error returned by [`Registry::get`](crate::registry::Registry::get).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No definition registered under the requested name.
    Unknown { name: String },
    /// The definition exists but its reactor failed to build.
    Build(BuildError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { name } => write!(f, "no reactor registered under {name:?}"),
            Self::Build(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(e) => Some(e),
            Self::Unknown { .. } => None,
        }
    }
}

impl From<BuildError> for RegistryError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}
