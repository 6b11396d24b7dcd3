//! Scratch and term command handlers
//!
//! Both load the grade sheet, turn it into graded items, compute the
//! averages, print a summary, and optionally write a report file.

use crate::args::GradeInput;
use cgpa_calculator::config::Config;
use cgpa_calculator::core::cgpa::CumulativeState;
use cgpa_calculator::core::error::CgpaError;
use cgpa_calculator::core::models::{GradeSheet, Tier};
use cgpa_calculator::core::report::{CgpaReport, ReportFormat};
use cgpa_calculator::core::selection::{self, Mode};
use logger::{debug, info, verbose};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the scratch command: cumulative CGPA over every completed tier.
///
/// # Errors
/// Returns a message if inputs cannot be loaded or are inconsistent with the catalog
pub fn scratch(input: &GradeInput, config: &Config) -> Result<(), String> {
    let (sheet, level) = load_input(input).map_err(|e| format!("✗ {e}"))?;
    let catalog = config.catalog().map_err(|e| format!("✗ {e}"))?;
    let scale = config.grade_scale().map_err(|e| format!("✗ {e}"))?;
    debug!("Using grade scale {} and {} catalog items", scale.label(), catalog.len());

    let items = selection::scratch_items(&catalog, level, &sheet).map_err(|e| format!("✗ {e}"))?;
    info!("{} graded items selected for {} at {level} level", items.len(), Mode::Scratch.label());

    let report = CgpaReport::scratch(level, &scale, &items);
    finish(&report, input, config)
}

/// Run the term command: current-term CGPA merged into the prior CGPA.
///
/// # Errors
/// Returns a message if inputs cannot be loaded, the prior CGPA is out of
/// range, or grades are inconsistent with the catalog
pub fn term(
    input: &GradeInput,
    prior_cgpa: f64,
    prior_credits: u32,
    config: &Config,
) -> Result<(), String> {
    let prior = CumulativeState::new(prior_cgpa, prior_credits).map_err(|e| format!("✗ {e}"))?;
    let (sheet, level) = load_input(input).map_err(|e| format!("✗ {e}"))?;
    let catalog = config.catalog().map_err(|e| format!("✗ {e}"))?;
    let scale = config.grade_scale().map_err(|e| format!("✗ {e}"))?;
    debug!("Using grade scale {} and {} catalog items", scale.label(), catalog.len());

    let items = selection::term_items(&catalog, level, &sheet).map_err(|e| format!("✗ {e}"))?;
    info!("{} graded items selected for {} at {level} level", items.len(), Mode::Term.label());

    let report = CgpaReport::term(level, &scale, &items, prior);
    finish(&report, input, config)
}

/// Build the grade sheet from `--grades` and `-g` pairs, and settle the level.
fn load_input(input: &GradeInput) -> Result<(GradeSheet, Tier), CgpaError> {
    let mut sheet = match &input.grades {
        Some(path) => {
            verbose!("Reading grade sheet {}", path.display());
            GradeSheet::load(path)?
        }
        None => GradeSheet::default(),
    };

    for pair in &input.grade {
        sheet.apply_pair(pair)?;
    }

    let level = input.level.or(sheet.level).ok_or(CgpaError::MissingLevel)?;
    Ok((sheet, level))
}

/// Print the summary and write the report file if one was requested.
fn finish(report: &CgpaReport, input: &GradeInput, config: &Config) -> Result<(), String> {
    println!("{report}");

    let Some(format) = requested_format(input)? else {
        return Ok(());
    };

    let output_path = match &input.output {
        Some(path) => path.clone(),
        None => default_report_path(Path::new(&config.paths.reports_dir), report, format),
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!("✗ Failed to create report directory {}: {e}", parent.display())
        })?;
    }

    format
        .generator()
        .generate(report, &output_path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());
    Ok(())
}

/// `--report` wins; otherwise infer from the `-o` extension, defaulting to HTML.
fn requested_format(input: &GradeInput) -> Result<Option<ReportFormat>, String> {
    if let Some(format) = &input.report {
        return ReportFormat::from_str(format)
            .map(Some)
            .map_err(|e| format!("✗ {e}. Use: markdown or html"));
    }

    Ok(input.output.as_ref().map(|path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ReportFormat::from_str(ext).ok())
            .unwrap_or(ReportFormat::Html)
    }))
}

fn default_report_path(reports_dir: &Path, report: &CgpaReport, format: ReportFormat) -> PathBuf {
    let mode = match report.mode {
        Mode::Scratch => "scratch",
        Mode::Term => "term",
    };
    let level = report.level.name().to_lowercase();
    reports_dir.join(format!("cgpa_{mode}_{level}.{}", format.extension()))
}
