//! Letter grades and the grade-point lookup table
//!
//! Two tables are in circulation for this program: one scores an `E` as 4
//! points, the other as 5. Neither is assumed; the choice is a named
//! [`ScalePreset`] (or a custom table loaded from TOML).

use super::cgpa::MAX_GPA;
use super::error::CgpaError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A letter grade, best (`S`) to worst (`F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    /// Outstanding
    S,
    /// Excellent
    A,
    /// Very good
    B,
    /// Good
    C,
    /// Average
    D,
    /// Pass
    E,
    /// Fail
    F,
}

impl Grade {
    /// All grades in table order.
    pub const ALL: [Self; 7] = [
        Self::S,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Grade {
    type Err = CgpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            _ => Err(CgpaError::UnknownGrade(s.to_string())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// Named built-in grade tables. They differ only in the points for `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalePreset {
    /// `E` scores 4 points.
    #[default]
    EFour,
    /// `E` scores 5 points.
    EFive,
}

impl ScalePreset {
    /// Config value for this preset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EFour => "e4",
            Self::EFive => "e5",
        }
    }

    const fn table(self) -> [u32; 7] {
        match self {
            Self::EFour => [10, 9, 8, 7, 6, 4, 0],
            Self::EFive => [10, 9, 8, 7, 6, 5, 0],
        }
    }
}

impl FromStr for ScalePreset {
    type Err = CgpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e4" | "variant-a" | "a" => Ok(Self::EFour),
            "e5" | "variant-b" | "b" => Ok(Self::EFive),
            _ => Err(CgpaError::UnknownScale(s.to_string())),
        }
    }
}

impl fmt::Display for ScalePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize)]
struct ScaleFile {
    points: BTreeMap<String, u32>,
}

/// Grade-to-points table used by every average computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeScale {
    label: String,
    points: [u32; 7],
}

impl GradeScale {
    /// Build one of the built-in tables.
    #[must_use]
    pub fn preset(preset: ScalePreset) -> Self {
        Self {
            label: preset.name().to_string(),
            points: preset.table(),
        }
    }

    /// Load a custom table from TOML of the form:
    ///
    /// ```toml
    /// [points]
    /// S = 10
    /// A = 9
    /// ```
    ///
    /// Letters left out of the table score 0. Values above [`MAX_GPA`] are rejected.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed, a key is not a grade letter,
    /// or a value exceeds [`MAX_GPA`].
    pub fn from_toml(label: &str, toml_str: &str) -> Result<Self, CgpaError> {
        let file: ScaleFile =
            toml::from_str(toml_str).map_err(|e| CgpaError::toml("grade scale", e))?;

        let mut points = [0; 7];
        for (letter, value) in file.points {
            let grade: Grade = letter.parse()?;
            if f64::from(value) > MAX_GPA {
                return Err(CgpaError::PointsOutOfRange {
                    grade: grade.to_string(),
                    points: value,
                });
            }
            points[grade.index()] = value;
        }

        Ok(Self {
            label: label.to_string(),
            points,
        })
    }

    /// Load a custom table from a TOML file. The label is the file name.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &std::path::Path) -> Result<Self, CgpaError> {
        let content = std::fs::read_to_string(path).map_err(|e| CgpaError::io(path, e))?;
        Self::from_toml(&path.display().to_string(), &content)
    }

    /// Short description of where this table came from (`e4`, `e5`, or a path).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Points for a parsed grade.
    #[must_use]
    pub const fn points(&self, grade: Grade) -> u32 {
        self.points[grade.index()]
    }

    /// Points for a raw grade symbol (case-insensitive).
    ///
    /// Anything that is not a grade letter scores 0.
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> u32 {
        symbol.parse::<Grade>().map_or(0, |grade| self.points(grade))
    }

    /// `(grade, points)` rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = (Grade, u32)> + '_ {
        Grade::ALL.iter().map(|&grade| (grade, self.points(grade)))
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::preset(ScalePreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_e4_table() {
        let scale = GradeScale::preset(ScalePreset::EFour);
        let expected = [10, 9, 8, 7, 6, 4, 0];
        for (grade, points) in Grade::ALL.iter().zip(expected) {
            assert_eq!(scale.points(*grade), points, "grade {grade}");
        }
    }

    #[test]
    fn test_e5_differs_only_on_e() {
        let four = GradeScale::preset(ScalePreset::EFour);
        let five = GradeScale::preset(ScalePreset::EFive);
        for grade in Grade::ALL {
            if grade == Grade::E {
                assert_eq!(four.points(grade), 4);
                assert_eq!(five.points(grade), 5);
            } else {
                assert_eq!(four.points(grade), five.points(grade));
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let scale = GradeScale::default();
        for grade in Grade::ALL {
            let letter = grade.to_string();
            let expected = scale.points(grade);
            assert_eq!(scale.lookup(&letter.to_lowercase()), expected, "grade {grade}");
            assert_eq!(scale.lookup(&letter.to_uppercase()), expected, "grade {grade}");
        }
        assert_eq!(scale.lookup(" b "), 8);
    }

    #[test]
    fn test_unknown_symbols_score_zero() {
        let scale = GradeScale::default();
        assert_eq!(scale.lookup("Z"), 0);
        assert_eq!(scale.lookup(""), 0);
        assert_eq!(scale.lookup("AA"), 0);
        assert_eq!(scale.lookup("Not Done"), 0);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!("E4".parse::<ScalePreset>().unwrap(), ScalePreset::EFour);
        assert_eq!("variant-b".parse::<ScalePreset>().unwrap(), ScalePreset::EFive);
        assert!("e6".parse::<ScalePreset>().is_err());
        assert_eq!(ScalePreset::EFive.to_string(), "e5");
    }

    #[test]
    fn test_custom_table() {
        let scale = GradeScale::from_toml(
            "custom",
            r"
[points]
s = 10
A = 9
E = 3
",
        )
        .unwrap();

        assert_eq!(scale.label(), "custom");
        assert_eq!(scale.lookup("S"), 10);
        assert_eq!(scale.lookup("e"), 3);
        // Letters missing from a custom table score 0
        assert_eq!(scale.lookup("B"), 0);
    }

    #[test]
    fn test_custom_table_rejects_unknown_letter() {
        let result = GradeScale::from_toml("bad", "[points]\nX = 4\n");
        assert!(matches!(result, Err(CgpaError::UnknownGrade(_))));
    }

    #[test]
    fn test_custom_table_rejects_points_above_max() {
        let result = GradeScale::from_toml("big", "[points]\nS = 4294967295\n");
        assert!(matches!(
            result,
            Err(CgpaError::PointsOutOfRange { ref grade, points: 4_294_967_295 }) if grade == "S"
        ));
        assert!(GradeScale::from_toml("edge", "[points]\nS = 10\n").is_ok());
        assert!(GradeScale::from_toml("over", "[points]\nA = 11\n").is_err());
    }

    #[test]
    fn test_rows_in_order() {
        let rows: Vec<_> = GradeScale::default().rows().collect();
        assert_eq!(rows.first(), Some(&(Grade::S, 10)));
        assert_eq!(rows.last(), Some(&(Grade::F, 0)));
        assert_eq!(rows.len(), 7);
    }
}
