//! Registry facade over the per-resource record tables.

use std::sync::RwLock;

use chrono::NaiveDate;

use crate::config::RegistryConfig;
use crate::error::StoreError;
use crate::model::{Course, CourseFilter, Student, StudentFilter};
use crate::table::Table;

/// Registry holding all resource tables.
///
/// Each table sits behind its own `RwLock`; a request takes the lock
/// once, which is the per-request transaction.
#[derive(Debug)]
pub struct Registry {
    courses: RwLock<Table<Course>>,
    students: RwLock<Table<Student>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            courses: RwLock::new(Table::with_capacity(config.initial_table_capacity)),
            students: RwLock::new(Table::with_capacity(config.initial_table_capacity)),
        }
    }

    // --- Courses ---

    /// Creates a course with a store-assigned id.
    pub fn create_course(&self, name: String) -> Result<Course, StoreError> {
        validate_name(&name)?;
        let mut courses = self.courses.write().map_err(|_| StoreError::LockPoisoned)?;
        let course = courses.insert(|id| Course { id, name }).clone();
        tracing::debug!("Created course {}", course.id);
        Ok(course)
    }

    /// Returns the course with the given id.
    pub fn course(&self, id: u64) -> Result<Course, StoreError> {
        let courses = self.courses.read().map_err(|_| StoreError::LockPoisoned)?;
        courses.get(id).cloned()
    }

    /// Lists courses matching the filter, in insertion order.
    pub fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, StoreError> {
        let courses = self.courses.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(courses.select(|course| filter.matches(course)))
    }

    /// Number of stored courses.
    pub fn course_count(&self) -> Result<usize, StoreError> {
        let courses = self.courses.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(courses.len())
    }

    /// Partially updates a course. `None` leaves the name unchanged.
    pub fn update_course(&self, id: u64, name: Option<String>) -> Result<Course, StoreError> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        let mut courses = self.courses.write().map_err(|_| StoreError::LockPoisoned)?;
        let course = courses.get_mut(id)?;
        if let Some(name) = name {
            course.name = name;
        }
        tracing::debug!("Updated course {}", id);
        Ok(course.clone())
    }

    /// Replaces a course's mutable fields.
    pub fn replace_course(&self, id: u64, name: String) -> Result<Course, StoreError> {
        validate_name(&name)?;
        let mut courses = self.courses.write().map_err(|_| StoreError::LockPoisoned)?;
        let course = courses.get_mut(id)?;
        course.name = name;
        tracing::debug!("Replaced course {}", id);
        Ok(course.clone())
    }

    /// Deletes the course with the given id.
    pub fn delete_course(&self, id: u64) -> Result<(), StoreError> {
        let mut courses = self.courses.write().map_err(|_| StoreError::LockPoisoned)?;
        courses.remove(id)?;
        tracing::debug!("Deleted course {}", id);
        Ok(())
    }

    // --- Students ---

    /// Creates a student with a store-assigned id.
    pub fn create_student(
        &self,
        name: String,
        birth_date: Option<NaiveDate>,
    ) -> Result<Student, StoreError> {
        validate_name(&name)?;
        let mut students = self
            .students
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let student = students
            .insert(|id| Student {
                id,
                name,
                birth_date,
            })
            .clone();
        tracing::debug!("Created student {}", student.id);
        Ok(student)
    }

    /// Returns the student with the given id.
    pub fn student(&self, id: u64) -> Result<Student, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::LockPoisoned)?;
        students.get(id).cloned()
    }

    /// Lists students matching the filter, in insertion order.
    pub fn students(&self, filter: &StudentFilter) -> Result<Vec<Student>, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(students.select(|student| filter.matches(student)))
    }

    /// Partially updates a student. `None` fields are left unchanged.
    pub fn update_student(
        &self,
        id: u64,
        name: Option<String>,
        birth_date: Option<NaiveDate>,
    ) -> Result<Student, StoreError> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        let mut students = self
            .students
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let student = students.get_mut(id)?;
        if let Some(name) = name {
            student.name = name;
        }
        if let Some(birth_date) = birth_date {
            student.birth_date = Some(birth_date);
        }
        tracing::debug!("Updated student {}", id);
        Ok(student.clone())
    }

    /// Replaces a student's mutable fields.
    pub fn replace_student(
        &self,
        id: u64,
        name: String,
        birth_date: Option<NaiveDate>,
    ) -> Result<Student, StoreError> {
        validate_name(&name)?;
        let mut students = self
            .students
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let student = students.get_mut(id)?;
        student.name = name;
        student.birth_date = birth_date;
        tracing::debug!("Replaced student {}", id);
        Ok(student.clone())
    }

    /// Deletes the student with the given id.
    pub fn delete_student(&self, id: u64) -> Result<(), StoreError> {
        let mut students = self
            .students
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        students.remove(id)?;
        tracing::debug!("Deleted student {}", id);
        Ok(())
    }
}

/// Rejects blank names before they reach a table.
fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation {
            field: "name",
            reason: "may not be blank".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(&RegistryConfig::default())
    }

    #[test]
    fn created_course_is_retrievable_with_same_name() {
        let registry = registry();
        let created = registry.create_course("test course".to_string()).unwrap();
        let fetched = registry.course(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "test course");
    }

    #[test]
    fn blank_name_is_rejected() {
        let registry = registry();
        let err = registry.create_course("   ".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "name", .. }));
        assert_eq!(registry.course_count().unwrap(), 0);
    }

    #[test]
    fn blank_name_is_rejected_on_update_and_replace() {
        let registry = registry();
        let created = registry.create_course("kept".to_string()).unwrap();

        let err = registry
            .update_course(created.id, Some("  ".to_string()))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "name", .. }));

        let err = registry
            .replace_course(created.id, String::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "name", .. }));

        // The stored record is untouched
        assert_eq!(registry.course(created.id).unwrap().name, "kept");
    }

    #[test]
    fn listing_respects_filters() {
        let registry = registry();
        for name in ["math", "math", "art"] {
            registry.create_course(name.to_string()).unwrap();
        }

        let all = registry.courses(&CourseFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, 1);

        let by_name = registry
            .courses(&CourseFilter {
                name: Some("math".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_name.len(), 2);

        let by_id = registry
            .courses(&CourseFilter {
                id: Some(3),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "art");
    }

    #[test]
    fn update_changes_only_the_name() {
        let registry = registry();
        let created = registry.create_course("old".to_string()).unwrap();
        let updated = registry
            .update_course(created.id, Some("new name".to_string()))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "new name");

        // None is a no-op
        let unchanged = registry.update_course(created.id, None).unwrap();
        assert_eq!(unchanged.name, "new name");
    }

    #[test]
    fn update_missing_course_is_not_found() {
        let registry = registry();
        let err = registry
            .update_course(99, Some("name".to_string()))
            .unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { .. }));
    }

    #[test]
    fn delete_removes_the_record() {
        let registry = registry();
        let created = registry.create_course("doomed".to_string()).unwrap();
        assert_eq!(registry.course_count().unwrap(), 1);

        registry.delete_course(created.id).unwrap();
        assert_eq!(registry.course_count().unwrap(), 0);
        assert!(registry.course(created.id).is_err());
        assert!(registry.delete_course(created.id).is_err());
    }

    #[test]
    fn student_birth_date_round_trip() {
        let registry = registry();
        let date = NaiveDate::from_ymd_opt(1999, 5, 20);
        let created = registry.create_student("ada".to_string(), date).unwrap();
        assert_eq!(created.birth_date, date);

        let patched = registry
            .update_student(created.id, Some("ada l".to_string()), None)
            .unwrap();
        assert_eq!(patched.name, "ada l");
        assert_eq!(patched.birth_date, date);

        let replaced = registry
            .replace_student(created.id, "ada lovelace".to_string(), None)
            .unwrap();
        assert_eq!(replaced.birth_date, None);
    }

    #[test]
    fn course_and_student_ids_are_independent() {
        let registry = registry();
        let course = registry.create_course("c".to_string()).unwrap();
        let student = registry.create_student("s".to_string(), None).unwrap();
        assert_eq!(course.id, 1);
        assert_eq!(student.id, 1);
    }
}
