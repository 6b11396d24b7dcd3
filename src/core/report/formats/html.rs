//! HTML report generator
//!
//! Renders a self-contained page (inline CSS, no scripts) through the askama
//! template at `templates/report.html`.

use crate::core::cgpa::format_gpa;
use crate::core::report::{CgpaReport, ReportGenerator};
use askama::Template;
use std::error::Error;

struct HtmlRow {
    name: String,
    tier: String,
    kind: String,
    grade: String,
    credits: u32,
    points: u32,
    weighted: u64,
}

struct ScaleRow {
    grade: String,
    points: u32,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportPage {
    title: String,
    level: String,
    scale: String,
    result_lines: Vec<String>,
    rows: Vec<HtmlRow>,
    total_credits: u64,
    total_points: String,
    scale_rows: Vec<ScaleRow>,
}

impl ReportPage {
    fn from_report(report: &CgpaReport) -> Self {
        let mut result_lines = report.result_lines();
        if let Some(prior) = report.prior {
            result_lines.push(format!(
                "Prior CGPA: {} over {} credits",
                format_gpa(prior.average),
                prior.credits
            ));
        }

        Self {
            title: report.title().to_string(),
            level: report.level.to_string(),
            scale: report.scale_label.clone(),
            result_lines,
            rows: report
                .rows
                .iter()
                .map(|row| HtmlRow {
                    name: row.name.clone(),
                    tier: row.tier.to_string(),
                    kind: row.kind.to_string(),
                    grade: row.grade.clone(),
                    credits: row.credits,
                    points: row.points,
                    weighted: row.weighted(),
                })
                .collect(),
            total_credits: report.tally.total_credits,
            total_points: format!("{:.0}", report.tally.total_points),
            scale_rows: report
                .scale_rows
                .iter()
                .map(|(grade, points)| ScaleRow {
                    grade: grade.to_string(),
                    points: *points,
                })
                .collect(),
        }
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, report: &CgpaReport) -> Result<String, Box<dyn Error>> {
        Ok(ReportPage::from_report(report).render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cgpa::{CumulativeState, GradeEntry};
    use crate::core::grading::{GradeScale, ScalePreset};
    use crate::core::models::{ItemKind, Tier};
    use crate::core::selection::GradedItem;

    fn items() -> Vec<GradedItem> {
        vec![
            GradedItem {
                name: "Privacy & Security in Online Social Media".to_string(),
                tier: Tier::Degree,
                kind: ItemKind::Course,
                entry: GradeEntry::new("E", 4),
            },
            GradedItem {
                name: "Deep Learning".to_string(),
                tier: Tier::Degree,
                kind: ItemKind::Course,
                entry: GradeEntry::new("S", 4),
            },
        ]
    }

    #[test]
    fn test_render_escapes_names() {
        let report = CgpaReport::scratch(Tier::Degree, &GradeScale::default(), &items());
        let html = HtmlReporter::new().render(&report).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Privacy &amp; Security"));
        assert!(html.contains("Your CGPA: 7.00"));
    }

    #[test]
    fn test_render_term_with_e5_scale() {
        let prior = CumulativeState::new(9.0, 16).unwrap();
        let scale = GradeScale::preset(ScalePreset::EFive);
        let report = CgpaReport::term(Tier::Degree, &scale, &items(), prior);
        let html = HtmlReporter::new().render(&report).unwrap();

        assert!(html.contains("Current Term CGPA: 7.50"));
        assert!(html.contains("Updated Overall CGPA: 8.50"));
        assert!(html.contains("grade scale e5"));
    }

    #[test]
    fn test_render_empty() {
        let report = CgpaReport::scratch(Tier::Foundational, &GradeScale::default(), &[]);
        let html = HtmlReporter::new().render(&report).unwrap();
        assert!(html.contains("No graded items."));
    }
}
