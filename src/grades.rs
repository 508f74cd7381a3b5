use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The nine grade symbols, in the order they appear on the form.
pub const GRADE_OPTIONS: [&str; 9] = ["A", "A-", "B", "B-", "C", "C-", "D", "D-", "F"];

/// Map a letter grade onto the chart's ordinal scale.
///
/// The gaps between F and the D tier (and the unused 1, 2) are intentional
/// display spacing on the y axis, not grade points. Unknown input maps to 0;
/// callers that need hard validation go through [`Grade`] instead.
pub fn grade_to_number(grade: &str) -> i32 {
    match grade {
        "A" => 10,
        "A-" => 9,
        "B" => 8,
        "B-" => 7,
        "C" => 6,
        "C-" => 5,
        "D" => 4,
        "D-" => 3,
        "F" => 0,
        _ => 0,
    }
}

/// Inverse of [`grade_to_number`] for axis tick labels and tooltips.
/// Numbers off the scale decode to an empty label.
pub fn number_to_grade(num: i32) -> &'static str {
    match num {
        10 => "A",
        9 => "A-",
        8 => "B",
        7 => "B-",
        6 => "C",
        5 => "C-",
        4 => "D",
        3 => "D-",
        0 => "F",
        _ => "",
    }
}

/// A letter grade that is known to be inside the nine-symbol alphabet.
///
/// The permissive codec above silently defaults on unknown input; this enum
/// is the strict boundary the form validates through before anything goes on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    AMinus,
    B,
    BMinus,
    C,
    CMinus,
    D,
    DMinus,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }

    /// Position of this grade on the chart scale.
    pub fn scale_value(self) -> i32 {
        grade_to_number(self.as_str())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("grade must be one of A, A-, B, B-, C, C-, D, D-, F")]
pub struct GradeParseError;

impl FromStr for Grade {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "A-" => Ok(Grade::AMinus),
            "B" => Ok(Grade::B),
            "B-" => Ok(Grade::BMinus),
            "C" => Ok(Grade::C),
            "C-" => Ok(Grade::CMinus),
            "D" => Ok(Grade::D),
            "D-" => Ok(Grade::DMinus),
            "F" => Ok(Grade::F),
            _ => Err(GradeParseError),
        }
    }
}

/// Why a total-marks input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MarksError {
    #[error("total marks required")]
    Missing,
    #[error("total marks must be a number")]
    NotANumber,
    #[error("marks must be positive (over for u if its actually negative)")]
    BelowZero,
    #[error("marks cannot be more 100 (congrats if they are)")]
    Above100,
}

/// Parse and range-check a total-marks field. Scores are percentages, so the
/// bound is a fixed 0..=100.
pub fn parse_total_marks(input: &str) -> Result<f64, MarksError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MarksError::Missing);
    }
    let value: f64 = trimmed.parse().map_err(|_| MarksError::NotANumber)?;
    if !value.is_finite() {
        return Err(MarksError::NotANumber);
    }
    if value < 0.0 {
        return Err(MarksError::BelowZero);
    }
    if value > 100.0 {
        return Err(MarksError::Above100);
    }
    Ok(value)
}

/// One offering of a course, as listed by the directory endpoint.
/// `id_sem` is the composite key `"<code>_<semester-tag>"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id_sem: String,
    pub name: String,
}

impl Course {
    pub fn code(&self) -> &str {
        self.id_sem.split('_').next().unwrap_or(&self.id_sem)
    }

    pub fn semester(&self) -> &str {
        match self.id_sem.split_once('_') {
            Some((_, sem)) => sem,
            None => "",
        }
    }
}

/// POST body for a grade submission. One record per user per course;
/// resubmitting overwrites server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSubmission {
    pub course_id: String,
    pub total_marks: f64,
    pub grade: String,
}

/// One anonymous record in a course's distribution. Only ever read off the
/// wire; submissions go out as [`GradeSubmission`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeRecord {
    pub total_marks: f64,
    pub grade: String,
}

/// Case-insensitive substring filter over course name and composite id.
/// An empty term returns the full list in its original order.
pub fn filter_courses(courses: &[Course], term: &str) -> Vec<Course> {
    if term.is_empty() {
        return courses.to_vec();
    }
    let query = term.to_lowercase();
    courses
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query) || c.id_sem.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_courses() -> Vec<Course> {
        vec![
            Course {
                id_sem: "CS101_F24".to_string(),
                name: "Intro".to_string(),
            },
            Course {
                id_sem: "CS202_F24".to_string(),
                name: "Data Structures".to_string(),
            },
        ]
    }

    #[test]
    fn test_codec_round_trip_all_grades() {
        for grade in GRADE_OPTIONS {
            assert_eq!(
                number_to_grade(grade_to_number(grade)),
                grade,
                "round trip broke for {grade}"
            );
        }
    }

    #[test]
    fn test_codec_scale_values_exact() {
        let expected = [
            ("F", 0),
            ("D-", 3),
            ("D", 4),
            ("C-", 5),
            ("C", 6),
            ("B-", 7),
            ("B", 8),
            ("A-", 9),
            ("A", 10),
        ];
        for (grade, num) in expected {
            assert_eq!(grade_to_number(grade), num);
            assert_eq!(number_to_grade(num), grade);
        }
    }

    #[test]
    fn test_codec_unknown_grade_defaults_to_zero() {
        for bogus in ["E", "A+", "a", "", "AA", "x"] {
            assert_eq!(grade_to_number(bogus), 0);
        }
    }

    #[test]
    fn test_codec_unknown_number_defaults_to_empty() {
        for n in [-1, 1, 2, 11, 12, 100] {
            assert_eq!(number_to_grade(n), "");
        }
    }

    #[test]
    fn test_strict_grade_accepts_alphabet_only() {
        for grade in GRADE_OPTIONS {
            let parsed: Grade = grade.parse().expect("alphabet symbol must parse");
            assert_eq!(parsed.as_str(), grade);
        }
        for bogus in ["E", "a", "A+", "", "AA", "f", " A"] {
            assert!(bogus.parse::<Grade>().is_err(), "{bogus:?} should not parse");
        }
    }

    #[test]
    fn test_strict_grade_scale_matches_codec() {
        assert_eq!(Grade::A.scale_value(), 10);
        assert_eq!(Grade::DMinus.scale_value(), 3);
        assert_eq!(Grade::F.scale_value(), 0);
    }

    #[test]
    fn test_marks_accepts_bounds_and_decimals() {
        assert_eq!(parse_total_marks("0"), Ok(0.0));
        assert_eq!(parse_total_marks("100"), Ok(100.0));
        assert_eq!(parse_total_marks("87.5"), Ok(87.5));
        assert_eq!(parse_total_marks(" 42 "), Ok(42.0));
    }

    #[test]
    fn test_marks_rejects_out_of_range() {
        assert_eq!(parse_total_marks("-0.5"), Err(MarksError::BelowZero));
        assert_eq!(parse_total_marks("100.01"), Err(MarksError::Above100));
    }

    #[test]
    fn test_marks_rejects_empty_and_garbage() {
        assert_eq!(parse_total_marks(""), Err(MarksError::Missing));
        assert_eq!(parse_total_marks("   "), Err(MarksError::Missing));
        assert_eq!(parse_total_marks("ninety"), Err(MarksError::NotANumber));
        assert_eq!(parse_total_marks("NaN"), Err(MarksError::NotANumber));
        assert_eq!(parse_total_marks("inf"), Err(MarksError::NotANumber));
    }

    #[test]
    fn test_filter_matches_identifier_case_insensitive() {
        let courses = sample_courses();
        let hits = filter_courses(&courses, "cs101");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id_sem, "CS101_F24");
    }

    #[test]
    fn test_filter_matches_name() {
        let courses = sample_courses();
        let hits = filter_courses(&courses, "data");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Data Structures");
    }

    #[test]
    fn test_filter_empty_term_keeps_order() {
        let courses = sample_courses();
        assert_eq!(filter_courses(&courses, ""), courses);
    }

    #[test]
    fn test_filter_no_match() {
        let courses = sample_courses();
        assert!(filter_courses(&courses, "chemistry").is_empty());
    }

    #[test]
    fn test_grade_record_decodes_wire_shape() {
        let rows: Vec<GradeRecord> =
            serde_json::from_str(r#"[{"total_marks": 87.5, "grade": "A-"}]"#)
                .expect("distribution row must decode");
        assert_eq!(
            rows,
            vec![GradeRecord {
                total_marks: 87.5,
                grade: "A-".to_string(),
            }]
        );
    }

    #[test]
    fn test_course_id_splits_into_code_and_semester() {
        let course = Course {
            id_sem: "MA6.101_S25".to_string(),
            name: "Probability and Statistics".to_string(),
        };
        assert_eq!(course.code(), "MA6.101");
        assert_eq!(course.semester(), "S25");

        let bare = Course {
            id_sem: "CS101".to_string(),
            name: "Intro".to_string(),
        };
        assert_eq!(bare.code(), "CS101");
        assert_eq!(bare.semester(), "");
    }
}
