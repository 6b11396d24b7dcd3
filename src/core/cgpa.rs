//! Credit-weighted averages
//!
//! Two entry points share the same arithmetic: [`weighted_average`] builds a
//! CGPA from individual grades, and [`update_overall_cgpa`] folds a new term's
//! average into a previously reported cumulative one.

use super::error::CgpaError;
use super::grading::GradeScale;
use serde::{Deserialize, Serialize};

/// Upper bound of the grade-point scale.
pub const MAX_GPA: f64 = 10.0;

/// One completed course or project: the grade symbol as entered and its credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Grade symbol (`S`..`F`, any case). Unrecognised symbols score 0.
    pub grade: String,
    /// Credit weight
    pub credits: u32,
}

impl GradeEntry {
    /// Create a new entry
    pub fn new(grade: impl Into<String>, credits: u32) -> Self {
        Self {
            grade: grade.into(),
            credits,
        }
    }
}

/// Running sums behind a weighted average.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tally {
    /// Sum of `points * credits`
    pub total_points: f64,
    /// Sum of credits
    pub total_credits: u64,
}

impl Tally {
    /// Add one weighted value.
    pub fn add(&mut self, points: f64, credits: u64) {
        self.total_points += points * credits_f64(credits);
        self.total_credits += credits;
    }

    /// `total_points / total_credits`, or 0 when no credits were counted.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.total_credits > 0 {
            self.total_points / credits_f64(self.total_credits)
        } else {
            0.0
        }
    }
}

/// Exact for credit totals below 2^53.
#[allow(clippy::cast_precision_loss)]
fn credits_f64(credits: u64) -> f64 {
    credits as f64
}

/// Sum points and credits over `entries`.
#[must_use]
pub fn tally(scale: &GradeScale, entries: &[GradeEntry]) -> Tally {
    entries.iter().fold(Tally::default(), |mut acc, entry| {
        acc.add(f64::from(scale.lookup(&entry.grade)), u64::from(entry.credits));
        acc
    })
}

/// Credit-weighted mean grade point of `entries`.
///
/// An empty list (or one whose credits sum to zero) averages to 0.
#[must_use]
pub fn weighted_average(scale: &GradeScale, entries: &[GradeEntry]) -> f64 {
    tally(scale, entries).average()
}

/// Credit-weighted mean over parallel grade and credit sequences.
///
/// # Errors
/// Returns [`CgpaError::LengthMismatch`] when the sequences differ in length.
pub fn calculate_cgpa<S: AsRef<str>>(
    scale: &GradeScale,
    grades: &[S],
    credits: &[u32],
) -> Result<f64, CgpaError> {
    if grades.len() != credits.len() {
        return Err(CgpaError::LengthMismatch {
            grades: grades.len(),
            credits: credits.len(),
        });
    }

    let mut acc = Tally::default();
    for (grade, &credit) in grades.iter().zip(credits) {
        acc.add(f64::from(scale.lookup(grade.as_ref())), u64::from(credit));
    }
    Ok(acc.average())
}

/// Merge a prior cumulative average with a new term's average, each weighted
/// by its credits.
///
/// Returns 0 when both credit counts are zero.
#[must_use]
pub fn update_overall_cgpa(
    prior_average: f64,
    prior_credits: u64,
    current_average: f64,
    current_credits: u64,
) -> f64 {
    let mut acc = Tally::default();
    acc.add(prior_average, prior_credits);
    acc.add(current_average, current_credits);
    acc.average()
}

/// A student's previously reported standing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CumulativeState {
    /// Prior CGPA in `[0, 10]`
    pub average: f64,
    /// Credits that prior CGPA covers
    pub credits: u32,
}

impl CumulativeState {
    /// Create a prior standing.
    ///
    /// # Errors
    /// Returns [`CgpaError::PriorAverageOutOfRange`] if `average` is not a
    /// finite value in `[0, 10]`.
    pub fn new(average: f64, credits: u32) -> Result<Self, CgpaError> {
        if !average.is_finite() || !(0.0..=MAX_GPA).contains(&average) {
            return Err(CgpaError::PriorAverageOutOfRange(average));
        }
        Ok(Self { average, credits })
    }

    /// Overall CGPA after a term averaging `current_average` over `current_credits`.
    #[must_use]
    pub fn merge(&self, current_average: f64, current_credits: u64) -> f64 {
        update_overall_cgpa(
            self.average,
            u64::from(self.credits),
            current_average,
            current_credits,
        )
    }
}

/// Format a grade point average for display (two decimal places).
#[must_use]
pub fn format_gpa(value: f64) -> String {
    format!("{value:.2}")
}
