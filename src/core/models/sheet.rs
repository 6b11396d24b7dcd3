//! Grade sheet model: a student's course -> grade selections

use super::tier::Tier;
use crate::core::error::CgpaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Grades keyed by catalog name, plus an optional academic level.
///
/// ```toml
/// level = "Diploma"
///
/// [grades]
/// "English I" = "S"
/// "System Commands" = "b"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSheet {
    /// Academic level the sheet was filled in for
    #[serde(default)]
    pub level: Option<Tier>,
    /// Grade symbol per course or project name
    #[serde(default)]
    pub grades: BTreeMap<String, String>,
}

impl GradeSheet {
    /// Parse a grade sheet from TOML.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, CgpaError> {
        toml::from_str(toml_str).map_err(|e| CgpaError::toml("grade sheet", e))
    }

    /// Load a grade sheet file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CgpaError> {
        let content = std::fs::read_to_string(path).map_err(|e| CgpaError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Record a grade, replacing any earlier grade for the same name
    /// (compared case-insensitively).
    pub fn set_grade(&mut self, name: &str, grade: &str) {
        let name = name.trim();
        self.grades
            .retain(|existing, _| !existing.trim().eq_ignore_ascii_case(name));
        self.grades.insert(name.to_string(), grade.trim().to_string());
    }

    /// Apply a `NAME=GRADE` pair as given on the command line.
    ///
    /// The split happens at the last `=`, so names may contain `=`.
    ///
    /// # Errors
    /// Returns [`CgpaError::MalformedGradePair`] if there is no `=` or the name is empty.
    pub fn apply_pair(&mut self, pair: &str) -> Result<(), CgpaError> {
        let (name, grade) = pair
            .rsplit_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| CgpaError::MalformedGradePair(pair.to_string()))?;
        self.set_grade(name, grade);
        Ok(())
    }
}
