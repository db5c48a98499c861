//! Admin account creation.

use anyhow::{Result, anyhow};
use registrar::modules::users::service::UserService;
use registrar_config::PasswordConfig;
use registrar_core::AppError;
use registrar_db::UserRepository;
use registrar_models::{CreateUserDto, User};

/// Creates a user account from CLI input through the same service the
/// server uses for its default admin.
///
/// Invalid input and an already registered email are both reported as
/// errors.
pub async fn create_admin(
    users: &dyn UserRepository,
    dto: CreateUserDto,
    password_config: &PasswordConfig,
) -> Result<User> {
    UserService::create_user(users, dto, password_config)
        .await
        .map_err(describe)
}

fn describe(err: AppError) -> anyhow::Error {
    if err.status.is_server_error() {
        return err.error;
    }
    if err.details.is_empty() {
        return anyhow!(err.public_message());
    }
    let fields = err
        .details
        .iter()
        .map(|d| format!("{}: {}", d.field, d.message))
        .collect::<Vec<_>>()
        .join(", ");
    anyhow!("{} ({})", err.public_message(), fields)
}
