//! Student seeding functionality.

use chrono::{Days, Utc};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rayon::prelude::*;
use registrar_db::{StoreError, StudentRepository};
use registrar_models::{CreateStudentDto, StudentStatus};
use std::time::Instant;

/// Courses offered on the enrollment form.
pub const COURSES: [&str; 7] = [
    "Computer Science",
    "Engineering",
    "Business Administration",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
];

/// Enrollment dates are spread over roughly the last four years.
const ENROLLMENT_WINDOW_DAYS: u64 = 4 * 365;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    /// Generated rows skipped because their email was already taken.
    pub skipped: usize,
}

/// Generates `count` fake students.
///
/// `batch_tag` is folded into every email so repeated runs do not collide.
pub fn generate_students(count: usize, batch_tag: &str) -> Vec<CreateStudentDto> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_student(idx, batch_tag))
        .collect()
}

fn generate_student(idx: usize, batch_tag: &str) -> CreateStudentDto {
    let mut rng = rand::thread_rng();

    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email = format!(
        "{}.{}+{}{}@example.com",
        email_part(&first_name),
        email_part(&last_name),
        batch_tag,
        idx
    );

    let course = COURSES[rng.gen_range(0..COURSES.len())].to_string();
    let status = StudentStatus::ALL[rng.gen_range(0..StudentStatus::ALL.len())];
    let days_ago = rng.gen_range(0..ENROLLMENT_WINDOW_DAYS);
    let today = Utc::now().date_naive();
    let enrollment_date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);

    let street: String = StreetName().fake();
    let number: String = BuildingNumber().fake();

    CreateStudentDto {
        first_name,
        last_name,
        email,
        course,
        status: Some(status),
        student_id: None,
        enrollment_date,
        phone: Some(PhoneNumber().fake()),
        address: Some(format!("{number} {street}")),
        notes: None,
    }
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Seeds `count` students into the repository.
pub async fn seed_students(
    students: &dyn StudentRepository,
    count: usize,
) -> Result<SeedReport, StoreError> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let batch_tag = format!("s{:x}", Utc::now().timestamp());
    let generated = generate_students(count, &batch_tag);
    println!(
        "   Generated {} records in {:.2?}",
        generated.len(),
        start_time.elapsed()
    );

    let mut report = SeedReport::default();
    for dto in generated {
        match students.create_student(dto).await {
            Ok(_) => report.created += 1,
            Err(StoreError::Conflict { .. }) => report.skipped += 1,
            Err(e) => return Err(e),
        }
    }

    println!(
        "✅ Seeded {} students ({} skipped) in {:.2?}",
        report.created,
        report.skipped,
        start_time.elapsed()
    );
    Ok(report)
}

/// Removes every student record.
pub async fn clear_students(students: &dyn StudentRepository) -> Result<u64, StoreError> {
    let start_time = Instant::now();
    let deleted = students.delete_all_students().await?;
    println!("🧹 Removed {} students in {:.2?}", deleted, start_time.elapsed());
    Ok(deleted)
}
