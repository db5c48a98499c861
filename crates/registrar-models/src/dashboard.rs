//! Dashboard statistics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::students::{Student, StudentStatus};

/// Aggregate figures shown on the dashboard.
///
/// `active_courses` counts distinct course values over every student,
/// whatever their status.
/// `graduation_rate` is a percentage string with one decimal, e.g. `"33.3%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub active_courses: usize,
    pub pending_applications: usize,
    pub graduation_rate: String,
}

impl DashboardStats {
    pub fn from_students(students: &[Student]) -> Self {
        let total_students = students.len();
        let active_courses = students
            .iter()
            .map(|s| s.course.as_str())
            .collect::<HashSet<_>>()
            .len();
        let pending_applications = students
            .iter()
            .filter(|s| s.status == StudentStatus::Pending)
            .count();
        let graduated = students
            .iter()
            .filter(|s| s.status == StudentStatus::Graduated)
            .count();

        let rate = if total_students == 0 {
            0.0
        } else {
            graduated as f64 / total_students as f64 * 100.0
        };

        Self {
            total_students,
            active_courses,
            pending_applications,
            graduation_rate: format!("{rate:.1}%"),
        }
    }
}
