//! Feature modules.
//!
//! Each module follows the same layout: `controller.rs` for handlers,
//! `service.rs` for business logic and `router.rs` for route wiring.
//! Models live in the `registrar-models` crate.

pub mod auth;
pub mod dashboard;
pub mod students;
pub mod users;

use registrar_core::AppError;
use registrar_db::StoreError;
use tracing::warn;

use crate::metrics::track_storage_fallback;

/// Serves `fallback` when storage is unreachable, so reads degrade to
/// empty or absent instead of failing. Other errors pass through.
pub(crate) fn with_fallback<T>(
    operation: &'static str,
    result: Result<T, StoreError>,
    fallback: T,
) -> Result<T, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(StoreError::Unavailable(reason)) => {
            warn!(operation, %reason, "Storage unavailable, serving fallback");
            track_storage_fallback(operation);
            Ok(fallback)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fallback() {
        let ok = with_fallback("list", Ok(vec![1]), vec![]);
        assert_eq!(ok.unwrap(), vec![1]);

        let down = with_fallback::<Vec<i32>>(
            "list",
            Err(StoreError::Unavailable("down".into())),
            vec![],
        );
        assert!(down.unwrap().is_empty());

        let failed = with_fallback::<Vec<i32>>("list", Err(StoreError::Query("bad".into())), vec![]);
        assert_eq!(failed.unwrap_err().status.as_u16(), 500);
    }
}
