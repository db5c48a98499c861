use registrar_core::AppError;
use registrar_db::StudentRepository;
use registrar_models::DashboardStats;
use tracing::instrument;

use crate::modules::students::service::StudentService;

pub struct DashboardService;

impl DashboardService {
    /// Scans the whole student set. Storage outages yield all-zero stats.
    #[instrument(skip(students))]
    pub async fn stats(students: &dyn StudentRepository) -> Result<DashboardStats, AppError> {
        let all = StudentService::list_students(students).await?;
        Ok(DashboardStats::from_students(&all))
    }
}
