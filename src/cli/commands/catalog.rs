//! Catalog and grade-scale listing commands

use cgpa_calculator::config::Config;
use cgpa_calculator::core::grading::{Grade, GradeScale, ScalePreset};
use cgpa_calculator::core::models::{ItemKind, Tier};
use logger::info;

/// Print the catalog, optionally restricted to one tier.
///
/// # Errors
/// Returns a message if the configured catalog cannot be loaded
pub fn run_catalog(tier: Option<Tier>, config: &Config) -> Result<(), String> {
    let catalog = config.catalog().map_err(|e| format!("✗ {e}"))?;
    info!("Catalog loaded with {} items", catalog.len());

    let tiers: Vec<Tier> = tier.map_or_else(|| Tier::ALL.to_vec(), |t| vec![t]);
    let width = catalog
        .all_items()
        .map(|(_, _, item)| item.name.chars().count())
        .max()
        .unwrap_or(0);

    for tier in tiers {
        let offerings = catalog.tier(tier);
        println!(
            "\n=== {tier} ({} items, {} credits) ===",
            offerings.items().count(),
            offerings.total_credits()
        );
        for (kind, item) in offerings.items() {
            let marker = match kind {
                ItemKind::Course => "",
                ItemKind::Project => "  [project]",
            };
            println!("  {:<width$}  {:>2} credits{marker}", item.name, item.credits);
        }
    }
    Ok(())
}

/// Print the active grade table and which E-grade convention it follows.
///
/// # Errors
/// Returns a message if the configured scale cannot be resolved
pub fn run_scale(config: &Config) -> Result<(), String> {
    let scale = config.grade_scale().map_err(|e| format!("✗ {e}"))?;

    println!("\n=== Grade Scale ({}) ===\n", scale.label());
    for (grade, points) in scale.rows() {
        println!("  {grade}  {points:>2}");
    }

    let e_points = scale.points(Grade::E);
    let four = GradeScale::preset(ScalePreset::EFour).points(Grade::E);
    let five = GradeScale::preset(ScalePreset::EFive).points(Grade::E);
    println!(
        "\nE scores {e_points} points. Presets differ only on E: {} = {four}, {} = {five}.",
        ScalePreset::EFour,
        ScalePreset::EFive
    );
    println!("Choose with `cgpa config set scale <e4|e5>` or `--scale` for one run.");
    Ok(())
}
