//! Course catalog model
//!
//! The catalog is reference data: loaded once, never mutated. The default
//! one is compiled in from `assets/catalog.toml`; any file with the same
//! shape can replace it.

use super::tier::{ItemKind, Tier};
use crate::core::error::CgpaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Catalog bundled with the binary
const EMBEDDED_CATALOG: &str = include_str!("../../../assets/catalog.toml");

/// A course or project and its credit weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name, also the identifier used in grade sheets
    pub name: String,
    /// Credit weight
    pub credits: u32,
}

impl CatalogItem {
    /// Create a new catalog item
    pub fn new(name: impl Into<String>, credits: u32) -> Self {
        Self {
            name: name.into(),
            credits,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Courses and projects offered at one tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCatalog {
    /// Taught courses
    #[serde(default)]
    pub courses: Vec<CatalogItem>,
    /// Projects
    #[serde(default)]
    pub projects: Vec<CatalogItem>,
}

impl TierCatalog {
    /// Courses then projects, each tagged with its kind.
    pub fn items(&self) -> impl Iterator<Item = (ItemKind, &CatalogItem)> {
        self.courses
            .iter()
            .map(|c| (ItemKind::Course, c))
            .chain(self.projects.iter().map(|p| (ItemKind::Project, p)))
    }

    /// Total credits across courses and projects.
    #[must_use]
    pub fn total_credits(&self) -> u64 {
        self.items().map(|(_, item)| u64::from(item.credits)).sum()
    }
}

/// Where a name was found in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogHit<'a> {
    /// Tier the item belongs to
    pub tier: Tier,
    /// Course or project
    pub kind: ItemKind,
    /// The item itself
    pub item: &'a CatalogItem,
}

/// Full course catalog, partitioned by tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Foundational tier
    #[serde(default)]
    pub foundational: TierCatalog,
    /// Diploma tier
    #[serde(default)]
    pub diploma: TierCatalog,
    /// Degree tier
    #[serde(default)]
    pub degree: TierCatalog,
}

impl Catalog {
    /// Parse and validate a catalog from TOML.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a name repeats.
    pub fn from_toml(toml_str: &str) -> Result<Self, CgpaError> {
        let catalog: Self = toml::from_str(toml_str).map_err(|e| CgpaError::toml("catalog", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, CgpaError> {
        let content = std::fs::read_to_string(path).map_err(|e| CgpaError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// The catalog compiled into the binary.
    ///
    /// # Panics
    /// Panics if the bundled catalog is invalid, which the test suite rules out.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml(EMBEDDED_CATALOG).expect("Failed to parse compiled-in catalog")
    }

    /// Reject catalogs that list the same name twice (case-insensitive).
    ///
    /// # Errors
    /// Returns [`CgpaError::DuplicateCatalogItem`] naming the first repeat.
    pub fn validate(&self) -> Result<(), CgpaError> {
        let mut seen = HashSet::new();
        for (_, _, item) in self.all_items() {
            if !seen.insert(item.name.trim().to_lowercase()) {
                return Err(CgpaError::DuplicateCatalogItem(item.name.clone()));
            }
        }
        Ok(())
    }

    /// Offerings for one tier.
    #[must_use]
    pub const fn tier(&self, tier: Tier) -> &TierCatalog {
        match tier {
            Tier::Foundational => &self.foundational,
            Tier::Diploma => &self.diploma,
            Tier::Degree => &self.degree,
        }
    }

    /// Every item in tier order, courses before projects within a tier.
    pub fn all_items(&self) -> impl Iterator<Item = (Tier, ItemKind, &CatalogItem)> {
        Tier::ALL.into_iter().flat_map(move |tier| {
            self.tier(tier)
                .items()
                .map(move |(kind, item)| (tier, kind, item))
        })
    }

    /// Find an item by name (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<CatalogHit<'_>> {
        self.all_items()
            .find(|(_, _, item)| item.matches(name))
            .map(|(tier, kind, item)| CatalogHit { tier, kind, item })
    }

    /// Number of items across all tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all_items().count()
    }

    /// True when no tier lists anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_items().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
[foundational]
courses = [
    { name = "English I", credits = 4 },
    { name = "Computational Thinking", credits = 4 },
]

[diploma]
courses = [{ name = "System Commands", credits = 3 }]
projects = [{ name = "App Dev - Project", credits = 2 }]
"#;

    #[test]
    fn test_parse_small_catalog() {
        let catalog = Catalog::from_toml(SMALL).unwrap();
        assert_eq!(catalog.foundational.courses.len(), 2);
        assert_eq!(catalog.diploma.projects.len(), 1);
        assert!(catalog.degree.courses.is_empty());
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.tier(Tier::Diploma).total_credits(), 5);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::from_toml(SMALL).unwrap();
        let hit = catalog.find("  system COMMANDS ").unwrap();
        assert_eq!(hit.tier, Tier::Diploma);
        assert_eq!(hit.kind, ItemKind::Course);
        assert_eq!(hit.item.credits, 3);

        let project = catalog.find("app dev - project").unwrap();
        assert_eq!(project.kind, ItemKind::Project);

        assert!(catalog.find("Quantum Basket Weaving").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let toml_str = r#"
[foundational]
courses = [{ name = "English I", credits = 4 }]

[degree]
courses = [{ name = "english i", credits = 4 }]
"#;
        let err = Catalog::from_toml(toml_str).unwrap_err();
        assert!(matches!(err, CgpaError::DuplicateCatalogItem(_)));
    }

    #[test]
    fn test_embedded_catalog_shape() {
        let catalog = Catalog::embedded();
        assert_eq!(catalog.foundational.courses.len(), 8);
        assert_eq!(catalog.diploma.courses.len(), 12);
        assert_eq!(catalog.diploma.projects.len(), 4);
        assert_eq!(catalog.degree.courses.len(), 30);
        assert!(catalog.foundational.projects.is_empty());
        assert!(catalog.degree.projects.is_empty());
        assert_eq!(catalog.find("System Commands").unwrap().item.credits, 3);
    }

    #[test]
    fn test_all_items_order() {
        let catalog = Catalog::from_toml(SMALL).unwrap();
        let names: Vec<_> = catalog.all_items().map(|(_, _, i)| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "English I",
                "Computational Thinking",
                "System Commands",
                "App Dev - Project"
            ]
        );
    }
}
