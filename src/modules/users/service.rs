use registrar_config::{PasswordConfig, SeedConfig};
use registrar_core::{AppError, hash_password};
use registrar_db::UserRepository;
use registrar_models::{CreateUserDto, NewUser, User};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::modules::with_fallback;

pub struct UserService;

impl UserService {
    #[instrument(skip(users, dto, password_config), fields(email = %dto.email))]
    pub async fn create_user(
        users: &dyn UserRepository,
        dto: CreateUserDto,
        password_config: &PasswordConfig,
    ) -> Result<User, AppError> {
        dto.validate()?;

        let password_hash = hash_password(&dto.password, password_config.hash_cost)?;
        let role = dto.role_or_default().to_string();
        let user = users
            .create_user(NewUser {
                email: dto.email,
                name: dto.name,
                role,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(users))]
    pub async fn get_user(users: &dyn UserRepository, id: i64) -> Result<User, AppError> {
        let user = with_fallback("get_user", users.get_user(id).await, None)?;
        user.ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// First-run seed: creates the configured admin when no user has its
    /// email yet. Returns the new user, or `None` when nothing was done.
    #[instrument(skip_all)]
    pub async fn ensure_default_admin(
        users: &dyn UserRepository,
        seed: &SeedConfig,
        password_config: &PasswordConfig,
    ) -> Result<Option<User>, AppError> {
        if !seed.enabled {
            return Ok(None);
        }

        if users.get_user_by_email(&seed.admin_email).await?.is_some() {
            return Ok(None);
        }

        if seed.uses_default_password() {
            warn!(
                email = %seed.admin_email,
                "Seeding default admin with the default password; set SEED_ADMIN_PASSWORD"
            );
        }

        let dto = CreateUserDto {
            email: seed.admin_email.clone(),
            name: seed.admin_name.clone(),
            password: seed.admin_password.clone(),
            role: None,
        };
        let user = Self::create_user(users, dto, password_config).await?;

        info!(email = %user.email, "Default admin created");
        Ok(Some(user))
    }
}
