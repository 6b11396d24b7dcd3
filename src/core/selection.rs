//! Turn a grade sheet into the graded items that feed the averages
//!
//! Two modes mirror how students report their standing:
//! - from scratch: everything below the current level must be graded, and
//!   current-level items count when graded;
//! - current term: only graded items of the current level count.
//!
//! The output keeps catalog order, and each item appears at most once.

use crate::core::cgpa::GradeEntry;
use crate::core::error::CgpaError;
use crate::core::grading::Grade;
use crate::core::models::{Catalog, CatalogItem, GradeSheet, ItemKind, Tier};
use logger::{debug, warn};
use std::collections::HashMap;

/// A graded catalog item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedItem {
    /// Catalog name
    pub name: String,
    /// Tier the item belongs to
    pub tier: Tier,
    /// Course or project
    pub kind: ItemKind,
    /// Grade and credits
    pub entry: GradeEntry,
}

/// How a sheet is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cumulative CGPA over every completed tier
    Scratch,
    /// CGPA of the current term only
    Term,
}

impl Mode {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scratch => "CGPA from scratch",
            Self::Term => "Current term CGPA",
        }
    }
}

/// True for the values that mean "not completed yet".
#[must_use]
pub fn is_not_done(grade: &str) -> bool {
    let trimmed = grade.trim();
    trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("not done")
}

/// Graded items for a cumulative CGPA at `level`.
///
/// # Errors
/// - [`CgpaError::UnknownCourse`] for a sheet name missing from the catalog
/// - [`CgpaError::MissingGrade`] for an ungraded item below `level`
pub fn scratch_items(
    catalog: &Catalog,
    level: Tier,
    sheet: &GradeSheet,
) -> Result<Vec<GradedItem>, CgpaError> {
    select(catalog, level, sheet, Mode::Scratch)
}

/// Graded items for the current term at `level`.
///
/// # Errors
/// Returns [`CgpaError::UnknownCourse`] for a sheet name missing from the catalog.
pub fn term_items(
    catalog: &Catalog,
    level: Tier,
    sheet: &GradeSheet,
) -> Result<Vec<GradedItem>, CgpaError> {
    select(catalog, level, sheet, Mode::Term)
}

/// Graded items for `mode`.
///
/// # Errors
/// See [`scratch_items`] and [`term_items`].
pub fn select(
    catalog: &Catalog,
    level: Tier,
    sheet: &GradeSheet,
    mode: Mode,
) -> Result<Vec<GradedItem>, CgpaError> {
    let grades = index_grades(catalog, sheet)?;
    let in_scope = |tier: Tier| match mode {
        Mode::Scratch => tier <= level,
        Mode::Term => tier == level,
    };

    let mut items = Vec::new();
    for (tier, kind, item) in catalog.all_items() {
        let key = item.name.trim().to_lowercase();
        let grade = grades.get(&key).copied();

        if !in_scope(tier) {
            if let Some(grade) = grade {
                warn!(
                    "Ignoring grade '{grade}' for {tier} {kind} '{}': outside {} at {level} level",
                    item.name,
                    mode.label()
                );
            }
            continue;
        }

        let required = mode == Mode::Scratch && tier < level;
        match grade.filter(|g| !is_not_done(g)) {
            Some(grade) => items.push(graded(item, tier, kind, grade)),
            None if required => {
                return Err(CgpaError::MissingGrade {
                    name: item.name.clone(),
                    tier: tier.to_string(),
                });
            }
            None => debug!("Skipping ungraded {tier} {kind} '{}'", item.name),
        }
    }

    Ok(items)
}

/// Just the `(grade, credits)` pairs of `items`.
#[must_use]
pub fn entries(items: &[GradedItem]) -> Vec<GradeEntry> {
    items.iter().map(|item| item.entry.clone()).collect()
}

/// Map normalised catalog names to grades, rejecting names the catalog lacks.
fn index_grades<'s>(
    catalog: &Catalog,
    sheet: &'s GradeSheet,
) -> Result<HashMap<String, &'s str>, CgpaError> {
    let mut grades = HashMap::new();
    for (name, grade) in &sheet.grades {
        let hit = catalog
            .find(name)
            .ok_or_else(|| CgpaError::UnknownCourse(name.clone()))?;
        grades.insert(hit.item.name.trim().to_lowercase(), grade.as_str());
    }
    Ok(grades)
}

fn graded(item: &CatalogItem, tier: Tier, kind: ItemKind, grade: &str) -> GradedItem {
    if grade.parse::<Grade>().is_err() {
        warn!(
            "Unrecognised grade '{grade}' for '{}' will count as 0 points",
            item.name
        );
    }
    GradedItem {
        name: item.name.clone(),
        tier,
        kind,
        entry: GradeEntry::new(grade.trim(), item.credits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[foundational]
courses = [
    { name = "English I", credits = 4 },
    { name = "Python", credits = 4 },
]

[diploma]
courses = [
    { name = "System Commands", credits = 3 },
    { name = "DBMS", credits = 4 },
]
projects = [{ name = "MAD I - Project", credits = 2 }]

[degree]
courses = [{ name = "Deep Learning", credits = 4 }]
"#;

    fn catalog() -> Catalog {
        Catalog::from_toml(CATALOG).unwrap()
    }

    fn sheet(pairs: &[(&str, &str)]) -> GradeSheet {
        let mut sheet = GradeSheet::default();
        for (name, grade) in pairs {
            sheet.set_grade(name, grade);
        }
        sheet
    }

    fn names(items: &[GradedItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_not_done_values() {
        assert!(is_not_done(""));
        assert!(is_not_done(" - "));
        assert!(is_not_done("Not Done"));
        assert!(!is_not_done("S"));
    }

    #[test]
    fn test_scratch_foundational_is_all_optional() {
        let items = scratch_items(&catalog(), Tier::Foundational, &sheet(&[("python", "A")])).unwrap();
        assert_eq!(names(&items), vec!["Python"]);
        assert_eq!(items[0].entry, GradeEntry::new("A", 4));
    }

    #[test]
    fn test_scratch_requires_lower_tiers() {
        let err = scratch_items(&catalog(), Tier::Diploma, &sheet(&[("English I", "S")])).unwrap_err();
        assert!(matches!(err, CgpaError::MissingGrade { ref name, .. } if name == "Python"));
    }

    #[test]
    fn test_scratch_not_done_counts_as_missing_below_level() {
        let grades = sheet(&[("English I", "S"), ("Python", "not done")]);
        assert!(scratch_items(&catalog(), Tier::Diploma, &grades).is_err());
    }

    #[test]
    fn test_scratch_degree_requires_diploma_projects() {
        let grades = sheet(&[
            ("English I", "S"),
            ("Python", "A"),
            ("System Commands", "B"),
            ("DBMS", "C"),
        ]);
        let err = scratch_items(&catalog(), Tier::Degree, &grades).unwrap_err();
        assert!(matches!(err, CgpaError::MissingGrade { ref name, .. } if name == "MAD I - Project"));
    }

    #[test]
    fn test_scratch_diploma_projects_optional_at_diploma() {
        let grades = sheet(&[
            ("English I", "S"),
            ("Python", "A"),
            ("MAD I - Project", "B"),
            ("DBMS", "-"),
        ]);
        let items = scratch_items(&catalog(), Tier::Diploma, &grades).unwrap();
        assert_eq!(names(&items), vec!["English I", "Python", "MAD I - Project"]);
        assert_eq!(items[2].kind, ItemKind::Project);
    }

    #[test]
    fn test_scratch_ignores_higher_tiers() {
        let grades = sheet(&[("English I", "S"), ("Deep Learning", "A")]);
        let items = scratch_items(&catalog(), Tier::Foundational, &grades).unwrap();
        assert_eq!(names(&items), vec!["English I"]);
    }

    #[test]
    fn test_term_only_current_level() {
        let grades = sheet(&[
            ("English I", "S"),
            ("DBMS", "B"),
            ("MAD I - Project", "a"),
        ]);
        let items = term_items(&catalog(), Tier::Diploma, &grades).unwrap();
        assert_eq!(names(&items), vec!["DBMS", "MAD I - Project"]);
    }

    #[test]
    fn test_term_with_nothing_graded_is_empty() {
        let items = term_items(&catalog(), Tier::Degree, &GradeSheet::default()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_unknown_course_rejected() {
        let err = term_items(&catalog(), Tier::Degree, &sheet(&[("Alchemy", "S")])).unwrap_err();
        assert!(matches!(err, CgpaError::UnknownCourse(ref n) if n == "Alchemy"));
    }

    #[test]
    fn test_unrecognised_grade_is_kept() {
        let items = term_items(&catalog(), Tier::Degree, &sheet(&[("Deep Learning", "Z")])).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entry.grade, "Z");
    }

    #[test]
    fn test_entries_strip_names() {
        let items = term_items(&catalog(), Tier::Diploma, &sheet(&[("DBMS", "B")])).unwrap();
        assert_eq!(entries(&items), vec![GradeEntry::new("B", 4)]);
    }
}
