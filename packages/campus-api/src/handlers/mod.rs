//! HTTP endpoint implementations for the registry resources.

pub mod course_handlers;
pub mod request_utils;
pub mod response;
pub mod student_handlers;

pub use course_handlers::{
    create_course, delete_course, get_course, list_courses, replace_course, update_course,
};
pub use response::error_response;
pub use student_handlers::{
    create_student, delete_student, get_student, list_students, replace_student, update_student,
};
