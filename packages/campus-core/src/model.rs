//! Record types and equality filters for the registry resources.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-backed record with a server-assigned identifier.
pub trait Record {
    /// Resource name used in errors and logs.
    const RESOURCE: &'static str;

    /// Store-assigned identifier, immutable once assigned.
    fn id(&self) -> u64;
}

/// A course offered by the campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned identifier
    pub id: u64,
    /// Course name
    pub name: String,
}

impl Record for Course {
    const RESOURCE: &'static str = "Course";

    fn id(&self) -> u64 {
        self.id
    }
}

/// A student enrolled at the campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned identifier
    pub id: u64,
    /// Student name
    pub name: String,
    /// Date of birth, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl Record for Student {
    const RESOURCE: &'static str = "Student";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Exact-match filters for course listing. Empty filter matches all.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Exact id match
    pub id: Option<u64>,
    /// Exact name match
    pub name: Option<String>,
}

impl CourseFilter {
    /// Returns true when the course satisfies every supplied filter.
    pub fn matches(&self, course: &Course) -> bool {
        self.id.map_or(true, |id| course.id == id)
            && self.name.as_deref().map_or(true, |name| course.name == name)
    }
}

/// Exact-match filters for student listing. Empty filter matches all.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Exact id match
    pub id: Option<u64>,
    /// Exact name match
    pub name: Option<String>,
}

impl StudentFilter {
    /// Returns true when the student satisfies every supplied filter.
    pub fn matches(&self, student: &Student) -> bool {
        self.id.map_or(true, |id| student.id == id)
            && self
                .name
                .as_deref()
                .map_or(true, |name| student.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_json_shape() {
        let course = Course {
            id: 7,
            name: "algebra".to_string(),
        };
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "algebra"}));
    }

    #[test]
    fn student_omits_missing_birth_date() {
        let student = Student {
            id: 1,
            name: "sam".to_string(),
            birth_date: None,
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "sam"}));

        let student = Student {
            birth_date: NaiveDate::from_ymd_opt(2001, 9, 11),
            ..student
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "sam", "birth_date": "2001-09-11"})
        );
    }

    #[test]
    fn filter_combines_with_and() {
        let course = Course {
            id: 3,
            name: "physics".to_string(),
        };
        let both = CourseFilter {
            id: Some(3),
            name: Some("physics".to_string()),
        };
        assert!(both.matches(&course));

        let wrong_name = CourseFilter {
            id: Some(3),
            name: Some("chemistry".to_string()),
        };
        assert!(!wrong_name.matches(&course));

        assert!(CourseFilter::default().matches(&course));
    }
}
