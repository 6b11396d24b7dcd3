//! Result reports
//!
//! A [`CgpaReport`] holds everything one calculation produced: the graded
//! items with their points, the totals, and the resulting average(s). It
//! prints as a terminal summary and renders to Markdown or HTML files.

pub mod formats;

use crate::core::cgpa::{format_gpa, tally, CumulativeState, Tally};
use crate::core::grading::{Grade, GradeScale};
use crate::core::models::{ItemKind, Tier};
use crate::core::selection::{GradedItem, Mode};
use std::error::Error;
use std::fmt;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// One graded item with its looked-up points
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Catalog name
    pub name: String,
    /// Tier the item belongs to
    pub tier: Tier,
    /// Course or project
    pub kind: ItemKind,
    /// Grade symbol as entered
    pub grade: String,
    /// Credit weight
    pub credits: u32,
    /// Grade points for `grade`
    pub points: u32,
}

impl ReportRow {
    /// `points * credits`
    #[must_use]
    pub fn weighted(&self) -> u64 {
        u64::from(self.points) * u64::from(self.credits)
    }
}

/// Outcome of a CGPA calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CgpaReport {
    /// Which calculation produced this report
    pub mode: Mode,
    /// Academic level the calculation was run for
    pub level: Tier,
    /// Where the grade table came from (`e4`, `e5`, or a file)
    pub scale_label: String,
    /// The grade table in use
    pub scale_rows: Vec<(Grade, u32)>,
    /// Graded items in catalog order
    pub rows: Vec<ReportRow>,
    /// Points and credits over `rows`
    pub tally: Tally,
    /// Weighted average over `rows`
    pub average: f64,
    /// Previously reported standing (term mode only)
    pub prior: Option<CumulativeState>,
    /// `prior` merged with `average` (term mode only)
    pub overall: Option<f64>,
}

impl CgpaReport {
    /// Report for a cumulative CGPA computed from scratch.
    #[must_use]
    pub fn scratch(level: Tier, scale: &GradeScale, items: &[GradedItem]) -> Self {
        Self::build(Mode::Scratch, level, scale, items, None)
    }

    /// Report for a term CGPA merged into a prior standing.
    #[must_use]
    pub fn term(
        level: Tier,
        scale: &GradeScale,
        items: &[GradedItem],
        prior: CumulativeState,
    ) -> Self {
        Self::build(Mode::Term, level, scale, items, Some(prior))
    }

    fn build(
        mode: Mode,
        level: Tier,
        scale: &GradeScale,
        items: &[GradedItem],
        prior: Option<CumulativeState>,
    ) -> Self {
        let entries = crate::core::selection::entries(items);
        let tally = tally(scale, &entries);
        let average = tally.average();
        let overall = prior.map(|p| p.merge(average, tally.total_credits));

        let rows = items
            .iter()
            .map(|item| ReportRow {
                name: item.name.clone(),
                tier: item.tier,
                kind: item.kind,
                grade: item.entry.grade.clone(),
                credits: item.entry.credits,
                points: scale.lookup(&item.entry.grade),
            })
            .collect();

        Self {
            mode,
            level,
            scale_label: scale.label().to_string(),
            scale_rows: scale.rows().collect(),
            rows,
            tally,
            average,
            prior,
            overall,
        }
    }

    /// Report heading
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.mode.label()
    }

    /// Headline result lines, most important first.
    #[must_use]
    pub fn result_lines(&self) -> Vec<String> {
        match self.overall {
            Some(overall) => vec![
                format!("Current Term CGPA: {}", format_gpa(self.average)),
                format!("Updated Overall CGPA: {}", format_gpa(overall)),
            ],
            None => vec![format!("Your CGPA: {}", format_gpa(self.average))],
        }
    }
}

impl fmt::Display for CgpaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ({} level, scale {}) ===", self.title(), self.level, self.scale_label)?;

        if self.rows.is_empty() {
            writeln!(f, "\n(no graded items)")?;
        } else {
            let width = self
                .rows
                .iter()
                .map(|r| r.name.chars().count())
                .max()
                .unwrap_or(0)
                .max(4);

            writeln!(f)?;
            writeln!(f, "{:<width$}  Grade  Credits  Points", "Item")?;
            for row in &self.rows {
                writeln!(
                    f,
                    "{:<width$}  {:<5}  {:>7}  {:>6}",
                    row.name, row.grade, row.credits, row.points
                )?;
            }
            writeln!(
                f,
                "{:<width$}  {:<5}  {:>7}  {:>6.0}",
                "Total", "", self.tally.total_credits, self.tally.total_points
            )?;
        }

        if let Some(prior) = self.prior {
            writeln!(
                f,
                "\nPrior CGPA: {} over {} credits",
                format_gpa(prior.average),
                prior.credits
            )?;
        }

        writeln!(f)?;
        for line in self.result_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, report: &CgpaReport, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(report)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, report: &CgpaReport) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cgpa::GradeEntry;

    fn item(name: &str, grade: &str, credits: u32) -> GradedItem {
        GradedItem {
            name: name.to_string(),
            tier: Tier::Diploma,
            kind: ItemKind::Course,
            entry: GradeEntry::new(grade, credits),
        }
    }

    #[test]
    fn test_scratch_report() {
        let items = vec![item("ML", "A", 4), item("DBMS", "B", 4), item("Java", "S", 3)];
        let report = CgpaReport::scratch(Tier::Diploma, &GradeScale::default(), &items);

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].points, 9);
        assert_eq!(report.rows[0].weighted(), 36);
        assert_eq!(report.tally.total_credits, 11);
        assert!(report.overall.is_none());
        assert_eq!(report.result_lines(), vec!["Your CGPA: 8.91".to_string()]);
    }

    #[test]
    fn test_term_report_merges_prior() {
        let items = vec![item("ML", "S", 4), item("DBMS", "S", 4)];
        let prior = CumulativeState::new(8.0, 8).unwrap();
        let report = CgpaReport::term(Tier::Diploma, &GradeScale::default(), &items, prior);

        assert_eq!(
            report.result_lines(),
            vec![
                "Current Term CGPA: 10.00".to_string(),
                "Updated Overall CGPA: 9.00".to_string()
            ]
        );
    }

    #[test]
    fn test_display_includes_rows_and_result() {
        let items = vec![item("System Commands", "b", 3)];
        let report = CgpaReport::scratch(Tier::Diploma, &GradeScale::default(), &items);
        let text = report.to_string();

        assert!(text.contains("System Commands"));
        assert!(text.contains("Your CGPA: 8.00"));
        assert!(text.contains("scale e4"));
    }

    #[test]
    fn test_weighted_does_not_overflow() {
        let row = ReportRow {
            name: "Capstone".to_string(),
            tier: Tier::Degree,
            kind: ItemKind::Project,
            grade: "S".to_string(),
            credits: u32::MAX,
            points: 10,
        };
        assert_eq!(row.weighted(), 10 * u64::from(u32::MAX));
    }

    #[test]
    fn test_term_report_with_large_prior() {
        let items = vec![item("ML", "S", 4)];
        let prior = CumulativeState::new(8.0, u32::MAX).unwrap();
        let report = CgpaReport::term(Tier::Diploma, &GradeScale::default(), &items, prior);
        assert_eq!(
            report.result_lines(),
            vec![
                "Current Term CGPA: 10.00".to_string(),
                "Updated Overall CGPA: 8.00".to_string()
            ]
        );
    }

    #[test]
    fn test_display_empty() {
        let report = CgpaReport::scratch(Tier::Foundational, &GradeScale::default(), &[]);
        let text = report.to_string();
        assert!(text.contains("(no graded items)"));
        assert!(text.contains("Your CGPA: 0.00"));
    }
}
