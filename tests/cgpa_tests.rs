//! End-to-end tests: grade sheet -> selection -> averages -> report files

use cgpa_calculator::core::cgpa::{format_gpa, CumulativeState};
use cgpa_calculator::core::error::CgpaError;
use cgpa_calculator::core::grading::{GradeScale, ScalePreset};
use cgpa_calculator::core::models::{Catalog, GradeSheet, Tier};
use cgpa_calculator::core::report::{CgpaReport, ReportFormat};
use cgpa_calculator::core::selection::{scratch_items, term_items};
use std::fs;
use tempfile::TempDir;

const FOUNDATIONAL: [&str; 8] = [
    "Statistics for Data Science II",
    "Mathematics for Data Science I",
    "Programming in Python",
    "English I",
    "Computational Thinking",
    "Mathematics for Data Science II",
    "English II",
    "Statistics for Data Science I",
];

/// Every foundational course at S, plus two diploma courses.
fn diploma_sheet() -> GradeSheet {
    let mut sheet = GradeSheet::default();
    for name in FOUNDATIONAL {
        sheet.set_grade(name, "S");
    }
    sheet.set_grade("System Commands", "B");
    sheet.set_grade("Machine Learning Foundations", "A");
    sheet
}

#[test]
fn test_embedded_catalog_shape() {
    let catalog = Catalog::embedded();

    assert_eq!(catalog.foundational.courses.len(), 8);
    assert!(catalog.foundational.projects.is_empty());
    assert_eq!(catalog.diploma.courses.len(), 12);
    assert_eq!(catalog.diploma.projects.len(), 4);
    assert_eq!(catalog.degree.courses.len(), 30);
    assert!(catalog.validate().is_ok());

    let hit = catalog.find("  system commands ").expect("course should be found");
    assert_eq!(hit.tier, Tier::Diploma);
    assert_eq!(hit.item.credits, 3);
}

#[test]
fn test_scratch_pipeline() {
    let catalog = Catalog::embedded();
    let scale = GradeScale::default();

    let items = scratch_items(&catalog, Tier::Diploma, &diploma_sheet()).unwrap();
    assert_eq!(items.len(), 10);

    // 8 x 4 x 10 + 3 x 8 + 4 x 9 = 380 over 39 credits
    let report = CgpaReport::scratch(Tier::Diploma, &scale, &items);
    assert_eq!(report.tally.total_credits, 39);
    assert_eq!(format_gpa(report.average), "9.74");
    assert_eq!(report.result_lines(), vec!["Your CGPA: 9.74".to_string()]);
}

#[test]
fn test_scratch_requires_lower_tiers() {
    let catalog = Catalog::embedded();
    let mut sheet = diploma_sheet();
    sheet.set_grade("English II", "not done");

    let err = scratch_items(&catalog, Tier::Diploma, &sheet).unwrap_err();
    assert!(matches!(err, CgpaError::MissingGrade { ref name, .. } if name == "English II"));
}

#[test]
fn test_term_pipeline_merges_prior() {
    let catalog = Catalog::embedded();
    let scale = GradeScale::default();

    // Foundational grades are outside the diploma term and are ignored
    let items = term_items(&catalog, Tier::Diploma, &diploma_sheet()).unwrap();
    assert_eq!(items.len(), 2);

    // Term: 60 / 7; overall: (9 x 32 + 60) / 39
    let prior = CumulativeState::new(9.0, 32).unwrap();
    let report = CgpaReport::term(Tier::Diploma, &scale, &items, prior);
    assert_eq!(
        report.result_lines(),
        vec![
            "Current Term CGPA: 8.57".to_string(),
            "Updated Overall CGPA: 8.92".to_string()
        ]
    );
}

#[test]
fn test_e_grade_depends_on_preset() {
    let catalog = Catalog::embedded();
    let mut sheet = GradeSheet::default();
    sheet.set_grade("Software Testing", "E");
    sheet.set_grade("Deep Learning", "C");

    let items = term_items(&catalog, Tier::Degree, &sheet).unwrap();

    let e4 = CgpaReport::scratch(Tier::Degree, &GradeScale::preset(ScalePreset::EFour), &items);
    let e5 = CgpaReport::scratch(Tier::Degree, &GradeScale::preset(ScalePreset::EFive), &items);
    assert!(e5.average > e4.average);
    assert_eq!(format_gpa(e4.average), "5.50");
    assert_eq!(format_gpa(e5.average), "6.00");
}

#[test]
fn test_unknown_course_is_rejected() {
    let catalog = Catalog::embedded();
    let mut sheet = GradeSheet::default();
    sheet.set_grade("Underwater Basket Weaving", "S");

    let err = term_items(&catalog, Tier::Degree, &sheet).unwrap_err();
    assert!(matches!(err, CgpaError::UnknownCourse(_)));
}

#[test]
fn test_sheet_file_and_report_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sheet_path = temp_dir.path().join("grades.toml");
    fs::write(
        &sheet_path,
        "level = \"degree\"\n\n[grades]\n\"Deep Learning\" = \"A\"\n\"Software Testing\" = \"-\"\n",
    )
    .expect("Failed to write sheet");

    let sheet = GradeSheet::load(&sheet_path).unwrap();
    assert_eq!(sheet.level, Some(Tier::Degree));

    let catalog = Catalog::embedded();
    let items = term_items(&catalog, Tier::Degree, &sheet).unwrap();
    assert_eq!(items.len(), 1);

    let report = CgpaReport::scratch(Tier::Degree, &GradeScale::default(), &items);

    for format in [ReportFormat::Markdown, ReportFormat::Html] {
        let path = temp_dir.path().join(format!("report.{}", format.extension()));
        format.generator().generate(&report, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Deep Learning"));
        assert!(content.contains("Your CGPA: 9.00"));
    }
}

#[test]
fn test_version_is_set() {
    assert!(!cgpa_calculator::get_version().is_empty());
}
