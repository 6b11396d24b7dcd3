//! Markdown report generator
//!
//! Fills an embedded template with the result, an item table, and the grade
//! table. Renders well on GitHub, GitLab, and in VS Code.

use crate::core::cgpa::format_gpa;
use crate::core::report::{CgpaReport, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    fn render_template(report: &CgpaReport) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", report.title());
        output = output.replace("{{level}}", report.level.name());
        output = output.replace("{{scale}}", &escape(&report.scale_label));
        output = output.replace("{{item_count}}", &report.rows.len().to_string());
        output = output.replace(
            "{{total_credits}}",
            &report.tally.total_credits.to_string(),
        );
        output = output.replace(
            "{{total_points}}",
            &format!("{:.0}", report.tally.total_points),
        );

        output = output.replace("{{result}}", &Self::generate_result(report));
        output = output.replace("{{items_table}}", &Self::generate_items_table(report));
        output = output.replace("{{scale_table}}", &Self::generate_scale_table(report));

        output
    }

    fn generate_result(report: &CgpaReport) -> String {
        let mut text = String::new();
        if let Some(prior) = report.prior {
            let _ = writeln!(
                text,
                "Prior CGPA **{}** over {} credits.\n",
                format_gpa(prior.average),
                prior.credits
            );
        }
        for line in report.result_lines() {
            let _ = writeln!(text, "- **{line}**");
        }
        text
    }

    /// Generate the graded item table
    fn generate_items_table(report: &CgpaReport) -> String {
        if report.rows.is_empty() {
            return "_No graded items._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Item | Tier | Kind | Grade | Credits | Points | Weighted |\n");
        table.push_str("|---|---|---|---|---|---|---|\n");

        for row in &report.rows {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} | {} |",
                escape(&row.name),
                row.tier,
                row.kind,
                escape(&row.grade),
                row.credits,
                row.points,
                row.weighted()
            );
        }

        let _ = writeln!(
            table,
            "| **Total** | | | | {} | | {:.0} |",
            report.tally.total_credits, report.tally.total_points
        );

        table
    }

    /// Generate the grade-to-points table
    fn generate_scale_table(report: &CgpaReport) -> String {
        let mut table = String::from("| Grade | Points |\n|---|---|\n");
        for (grade, points) in &report.scale_rows {
            let _ = writeln!(table, "| {grade} | {points} |");
        }
        table
    }
}

/// Keep pipes in names from breaking table columns.
fn escape(value: &str) -> String {
    value.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, report: &CgpaReport) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(report))
    }
}
