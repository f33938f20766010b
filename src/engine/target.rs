//! Transition targets addressed by name or ordinal.

use std::fmt;

/// The state a transition should move to.
///
/// Ordinals are the 1-based insertion positions of the machine's states.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Name(String),
    Ordinal(usize),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<&String> for Target {
    fn from(name: &String) -> Self {
        Target::Name(name.clone())
    }
}

impl From<usize> for Target {
    fn from(ordinal: usize) -> Self {
        Target::Ordinal(ordinal)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Name(name) => f.write_str(name),
            Target::Ordinal(ordinal) => write!(f, "#{ordinal}"),
        }
    }
}
