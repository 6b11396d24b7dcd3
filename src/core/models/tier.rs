//! Academic tier model

use crate::core::error::CgpaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Academic level, ordered from entry (`Foundational`) to final (`Degree`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tier {
    /// Entry level
    Foundational,
    /// Intermediate level
    Diploma,
    /// Final level
    Degree,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 3] = [Self::Foundational, Self::Diploma, Self::Degree];

    /// Tiers strictly below this one, lowest first.
    #[must_use]
    pub fn below(self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|t| *t < self).collect()
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Foundational => "Foundational",
            Self::Diploma => "Diploma",
            Self::Degree => "Degree",
        }
    }
}

impl FromStr for Tier {
    type Err = CgpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foundational" | "foundation" => Ok(Self::Foundational),
            "diploma" => Ok(Self::Diploma),
            "degree" => Ok(Self::Degree),
            _ => Err(CgpaError::UnknownTier(s.to_string())),
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = CgpaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.name().to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a catalog item is a taught course or a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Taught course
    Course,
    /// Project
    Project,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course => f.write_str("course"),
            Self::Project => f.write_str("project"),
        }
    }
}
