//! Student domain models and DTOs.
//!
//! This module contains all data structures related to student management,
//! including the student entity, request/response DTOs, and list filtering.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use registrar_core::serde::{
    deserialize_optional_string, deserialize_optional_trimmed, deserialize_some, deserialize_trimmed,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Enrollment status of a student.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Pending,
    Suspended,
    Graduated,
    Transferred,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 5] = [
        StudentStatus::Active,
        StudentStatus::Pending,
        StudentStatus::Suspended,
        StudentStatus::Graduated,
        StudentStatus::Transferred,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Pending => "pending",
            StudentStatus::Suspended => "suspended",
            StudentStatus::Graduated => "graduated",
            StudentStatus::Transferred => "transferred",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown student status: {s}"))
    }
}

/// A student record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course: String,
    pub status: StudentStatus,
    /// Human-facing identifier, e.g. `STU20250042`
    pub student_id: String,
    pub enrollment_date: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for creating a new student.
///
/// `status` defaults to `active`; a missing or blank `studentId` is
/// generated by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "Course is required"))]
    pub course: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StudentStatus>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 32, message = "Student ID must be at most 32 characters"))]
    pub student_id: Option<String>,
    pub enrollment_date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// DTO for a partial update.
///
/// Only provided fields are applied. For `phone`, `address` and `notes` an
/// explicit `null` clears the value. An empty `studentId` asks for a freshly
/// generated one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(min = 1, max = 100, message = "Course is required"))]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StudentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32, message = "Student ID must be at most 32 characters"))]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl UpdateStudentDto {
    /// Applies the present fields onto `student`, leaving the rest untouched.
    ///
    /// `studentId` regeneration and timestamps are the repository's concern;
    /// this only copies values. Blank optional text is stored as absent.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(first_name) = &self.first_name {
            student.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            student.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(course) = &self.course {
            student.course = course.clone();
        }
        if let Some(status) = self.status {
            student.status = status;
        }
        if let Some(student_id) = &self.student_id {
            student.student_id = student_id.clone();
        }
        if let Some(enrollment_date) = self.enrollment_date {
            student.enrollment_date = enrollment_date;
        }
        if let Some(phone) = &self.phone {
            student.phone = non_blank(phone.clone());
        }
        if let Some(address) = &self.address {
            student.address = non_blank(address.clone());
        }
        if let Some(notes) = &self.notes {
            student.notes = non_blank(notes.clone());
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Response envelope for create and update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub message: String,
    pub student: Student,
}

/// Course and status filter over a student list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub course: Option<String>,
    pub status: Option<StudentStatus>,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        let course_match = self
            .course
            .as_deref()
            .is_none_or(|course| student.course == course);
        let status_match = self.status.is_none_or(|status| student.status == status);
        course_match && status_match
    }

    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Distinct course names, sorted.
pub fn distinct_courses(students: &[Student]) -> Vec<String> {
    students
        .iter()
        .map(|s| s.course.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_create_dto() -> CreateStudentDto {
        CreateStudentDto {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            course: "Mathematics".to_string(),
            status: None,
            student_id: None,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            phone: None,
            address: None,
            notes: None,
        }
    }

    pub(crate) fn sample_student(id: i64, course: &str, status: StudentStatus) -> Student {
        let ts = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();
        Student {
            id,
            first_name: "Test".to_string(),
            last_name: format!("Student{id}"),
            email: format!("student{id}@example.com"),
            course: course.to_string(),
            status,
            student_id: format!("STU2024{id:04}"),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            phone: None,
            address: None,
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in StudentStatus::ALL {
            assert_eq!(status.as_str().parse::<StudentStatus>().unwrap(), status);
        }
        assert!("expelled".parse::<StudentStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StudentStatus::Graduated).unwrap(),
            r#""graduated""#
        );
    }

    #[test]
    fn test_create_dto_validation() {
        assert!(valid_create_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_invalid_email() {
        let dto = CreateStudentDto {
            email: "invalid-email".to_string(),
            ..valid_create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_empty_name() {
        let dto = CreateStudentDto {
            first_name: String::new(),
            ..valid_create_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_create_dto_long_notes() {
        let dto = CreateStudentDto {
            notes: Some("x".repeat(2001)),
            ..valid_create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_deserializes_camel_case_and_blank_optionals() {
        let json = r#"{
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "course": "Computer Science",
            "enrollmentDate": "2024-01-15",
            "studentId": "",
            "phone": ""
        }"#;
        let dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.first_name, "Grace");
        assert_eq!(dto.status, None);
        assert_eq!(dto.student_id, None);
        assert_eq!(dto.phone, None);
        assert_eq!(
            dto.enrollment_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_create_dto_rejects_unknown_status() {
        let json = r#"{
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "course": "Computer Science",
            "enrollmentDate": "2024-01-15",
            "status": "expelled"
        }"#;
        assert!(serde_json::from_str::<CreateStudentDto>(json).is_err());
    }

    #[test]
    fn test_update_dto_empty_is_valid() {
        assert!(UpdateStudentDto::default().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_whitespace_only_names() {
        let json = r#"{
            "firstName": "   ",
            "lastName": " Hopper ",
            "email": "grace@example.com",
            "course": "\t",
            "enrollmentDate": "2024-01-15"
        }"#;
        let dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.last_name, "Hopper");

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("course"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_update_dto_rejects_whitespace_only_name() {
        let dto: UpdateStudentDto = serde_json::from_str(r#"{"firstName":"  "}"#).unwrap();
        assert_eq!(dto.first_name.as_deref(), Some(""));
        assert!(dto.validate().unwrap_err().field_errors().contains_key("first_name"));

        let dto: UpdateStudentDto = serde_json::from_str(r#"{"course":" Physics "}"#).unwrap();
        assert_eq!(dto.course.as_deref(), Some("Physics"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_dto_invalid_email() {
        let dto = UpdateStudentDto {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_distinguishes_null_from_missing() {
        let dto: UpdateStudentDto =
            serde_json::from_str(r#"{"phone":null,"studentId":""}"#).unwrap();
        assert_eq!(dto.phone, Some(None));
        assert_eq!(dto.address, None);
        assert_eq!(dto.student_id.as_deref(), Some(""));
    }

    #[test]
    fn test_apply_to_only_touches_present_fields() {
        let mut student = sample_student(1, "Physics", StudentStatus::Active);
        student.phone = Some("555-0100".to_string());
        student.notes = Some("keep me".to_string());
        let before = student.clone();

        let dto = UpdateStudentDto {
            status: Some(StudentStatus::Graduated),
            phone: Some(None),
            ..Default::default()
        };
        dto.apply_to(&mut student);

        assert_eq!(student.status, StudentStatus::Graduated);
        assert_eq!(student.phone, None);
        assert_eq!(student.notes, before.notes);
        assert_eq!(student.first_name, before.first_name);
        assert_eq!(student.email, before.email);
        assert_eq!(student.student_id, before.student_id);
    }

    #[test]
    fn test_filter_and_distinct_courses() {
        let students = vec![
            sample_student(1, "Physics", StudentStatus::Active),
            sample_student(2, "Biology", StudentStatus::Pending),
            sample_student(3, "Physics", StudentStatus::Pending),
        ];

        let filter = StudentFilter {
            course: Some("Physics".to_string()),
            status: Some(StudentStatus::Pending),
        };
        let matched = filter.apply(&students);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 3);

        assert_eq!(StudentFilter::default().apply(&students).len(), 3);
        assert_eq!(distinct_courses(&students), vec!["Biology", "Physics"]);
    }

    #[test]
    fn test_student_serializes_camel_case() {
        let json = serde_json::to_value(sample_student(5, "Art", StudentStatus::Active)).unwrap();
        assert_eq!(json["studentId"], "STU20240005");
        assert_eq!(json["firstName"], "Test");
        assert_eq!(json["enrollmentDate"], "2024-09-01");
        assert!(json.get("createdAt").is_some());
    }
}
