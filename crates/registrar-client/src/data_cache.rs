use registrar_models::{DashboardStats, Student, StudentFilter, distinct_courses};

/// Last fetched student list and dashboard stats.
#[derive(Debug, Default)]
pub struct DataCache {
    students: Option<Vec<Student>>,
    stats: Option<DashboardStats>,
}

impl DataCache {
    pub fn students(&self) -> Option<&[Student]> {
        self.students.as_deref()
    }

    pub fn set_students(&mut self, students: Vec<Student>) {
        self.students = Some(students);
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = Some(stats);
    }

    /// Drops everything; the next read goes to the server.
    pub fn invalidate(&mut self) {
        self.students = None;
        self.stats = None;
    }

    pub fn filtered(&self, filter: &StudentFilter) -> Vec<Student> {
        self.students()
            .map(|students| filter.apply(students).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn courses(&self) -> Vec<String> {
        self.students().map(distinct_courses).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use registrar_models::StudentStatus;

    fn student(id: i64, course: &str, status: StudentStatus) -> Student {
        let now = Utc::now();
        Student {
            id,
            first_name: "Test".to_string(),
            last_name: format!("Student{id}"),
            email: format!("s{id}@example.com"),
            course: course.to_string(),
            status,
            student_id: format!("STU2025{id:04}"),
            enrollment_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            phone: None,
            address: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stats() -> DashboardStats {
        DashboardStats {
            total_students: 3,
            active_courses: 2,
            pending_applications: 1,
            graduation_rate: "33.3%".to_string(),
        }
    }

    #[test]
    fn test_empty_cache() {
        let cache = DataCache::default();
        assert!(cache.students().is_none());
        assert!(cache.stats().is_none());
        assert!(cache.filtered(&StudentFilter::default()).is_empty());
        assert!(cache.courses().is_empty());
    }

    #[test]
    fn test_filter_and_courses() {
        let mut cache = DataCache::default();
        cache.set_students(vec![
            student(3, "Physics", StudentStatus::Pending),
            student(2, "Biology", StudentStatus::Active),
            student(1, "Physics", StudentStatus::Active),
        ]);

        assert_eq!(cache.courses(), vec!["Biology", "Physics"]);

        let filter = StudentFilter {
            course: Some("Physics".to_string()),
            status: Some(StudentStatus::Active),
        };
        let ids: Vec<i64> = cache.filtered(&filter).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);

        let all: Vec<i64> = cache
            .filtered(&StudentFilter::default())
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(all, vec![3, 2, 1]);
    }

    #[test]
    fn test_invalidate_clears_both() {
        let mut cache = DataCache::default();
        cache.set_students(vec![student(1, "Physics", StudentStatus::Active)]);
        cache.set_stats(stats());

        cache.invalidate();

        assert!(cache.students().is_none());
        assert!(cache.stats().is_none());
    }
}
