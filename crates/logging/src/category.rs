//! Logger categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// What a logger instruments. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A support library, named by the library.
    Library,
    /// A topology platform engine, named by the platform.
    Platform,
    /// The test case itself.
    User,
    /// A node, named by its identifier.
    Node,
    /// A shell on a node.
    Shell,
    /// A connection of a shell on a node.
    Connection,
    /// Raw interaction with a spawned process on a node connection.
    Pexpect,
    /// A service exposed by a node.
    Service,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Library,
        Self::Platform,
        Self::User,
        Self::Node,
        Self::Shell,
        Self::Connection,
        Self::Pexpect,
        Self::Service,
    ];

    /// Lower-case name, as used in qualified logger names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Platform => "platform",
            Self::User => "user",
            Self::Node => "node",
            Self::Shell => "shell",
            Self::Connection => "connection",
            Self::Pexpect => "pexpect",
            Self::Service => "service",
        }
    }

    /// Finds the category with exactly this name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;

    #[test]
    fn test_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_matches!(
            "switch".parse::<Category>(),
            Err(Error::UnknownCategory(name)) if name == "switch"
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(Category::lookup("Pexpect").is_none());
        assert_eq!(Category::lookup("pexpect"), Some(Category::Pexpect));
    }
}
