//! Error type shared by the grading, catalog, and selection modules

use std::path::PathBuf;

/// Errors raised while building or validating CGPA inputs.
///
/// The arithmetic itself is total; everything here is a caller or data problem.
#[derive(thiserror::Error, Debug)]
pub enum CgpaError {
    /// Parallel grade and credit sequences had different lengths.
    #[error("invalid input: {grades} grade(s) but {credits} credit value(s); the sequences must pair up one-to-one")]
    LengthMismatch {
        /// Number of grades supplied.
        grades: usize,
        /// Number of credit values supplied.
        credits: usize,
    },
    /// A previously reported CGPA that is not a finite value in `[0, 10]`.
    #[error("prior CGPA must be between 0 and 10, got {0}")]
    PriorAverageOutOfRange(f64),
    /// A grade letter outside `S A B C D E F` where a letter is required.
    #[error("unknown grade '{0}' (expected one of S, A, B, C, D, E, F)")]
    UnknownGrade(String),
    /// A custom grade table value above the 10-point maximum.
    #[error("grade {grade} is worth {points} points; grade points cannot exceed 10")]
    PointsOutOfRange {
        /// Grade letter.
        grade: String,
        /// Offending point value.
        points: u32,
    },
    /// A grade scale preset name that is not recognised.
    #[error("unknown grade scale '{0}' (expected e4 or e5)")]
    UnknownScale(String),
    /// A tier name that is not recognised.
    #[error("unknown tier '{0}' (expected Foundational, Diploma, or Degree)")]
    UnknownTier(String),
    /// A graded name that does not exist anywhere in the catalog.
    #[error("'{0}' is not a course or project in the catalog")]
    UnknownCourse(String),
    /// A required lower-tier course or project has no grade.
    #[error("missing grade for required {tier} item '{name}'")]
    MissingGrade {
        /// Catalog name of the ungraded item.
        name: String,
        /// Tier the item belongs to.
        tier: String,
    },
    /// The same name appears more than once in a catalog.
    #[error("catalog lists '{0}' more than once")]
    DuplicateCatalogItem(String),
    /// No academic level was given on the command line or in the grade sheet.
    #[error("no academic level given; pass --level or set `level` in the grade sheet")]
    MissingLevel,
    /// A `NAME=GRADE` pair that could not be split.
    #[error("expected NAME=GRADE, got '{0}'")]
    MalformedGradePair(String),
    /// TOML input that could not be parsed.
    #[error("failed to parse {what}: {source}")]
    Toml {
        /// What was being parsed (catalog, grade scale, grade sheet).
        what: &'static str,
        /// Underlying parser error.
        #[source]
        source: toml::de::Error,
    },
    /// A file that could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CgpaError {
    /// Wrap a TOML parse failure with a short description of the input.
    #[must_use]
    pub fn toml(what: &'static str, source: toml::de::Error) -> Self {
        Self::Toml { what, source }
    }

    /// Wrap an I/O failure with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
