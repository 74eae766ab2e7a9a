//! Named variables of the calculus.

use crate::error::{DerivationError, Scope};
use std::fmt;

/// A variable: a name annotated with a dimension.
///
/// Two variables are the same iff both the name and the dimension match, so
/// `a` at dimension 0 and `a` at dimension 1 are unrelated. Variables are
/// only ever introduced by the inference rules and are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: String,
    dimension: isize,
}

impl Variable {
    /// Declare a variable. Fails for negative dimensions.
    pub fn new(name: impl Into<String>, dimension: isize) -> Result<Self, DerivationError> {
        let name = name.into();
        if dimension < 0 {
            return Err(DerivationError::new(
                Scope::Variable,
                format!("dimension of new variable {name} must be >= 0 (is {dimension})"),
            ));
        }
        Ok(Self { name, dimension })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> isize {
        self.dimension
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
