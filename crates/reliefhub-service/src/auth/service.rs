//! Account lifecycle: register, login, profile, password, admin management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use reliefhub_auth::jwt::JwtEncoder;
use reliefhub_auth::password::PasswordHasher;
use reliefhub_auth::policy;
use reliefhub_core::error::AppError;
use reliefhub_core::result::AppResult;
use reliefhub_database::store::UserStore;
use reliefhub_entity::user::{CreateUser, ProfileUpdate, User, UserRole};

use crate::context::RequestContext;

/// Data supplied at registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Requested role. Admin accounts cannot be self-registered.
    pub role: UserRole,
    /// Free-text location.
    pub location: String,
    /// Contact phone number.
    pub phone: String,
    /// Skill tags; kept only for volunteers.
    pub skills: Vec<String>,
}

/// Handles identity and account management.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    /// Registers a new account and returns a signed token with the user.
    pub async fn register(&self, data: Registration) -> AppResult<(String, User)> {
        if data.role == UserRole::Admin {
            return Err(AppError::validation(
                "Role must be one of: user, volunteer",
            ));
        }

        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::validation("User with this email already exists"));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;
        let skills = if data.role == UserRole::Volunteer {
            data.skills
        } else {
            Vec::new()
        };

        let user = self
            .users
            .create(&CreateUser {
                name: data.name,
                email: data.email,
                password_hash,
                role: data.role,
                location: data.location,
                phone: data.phone,
                skills,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        let (token, _) = self.encoder.generate_token(&user)?;
        Ok((token, user))
    }

    /// Authenticates with email and password, returning a signed token.
    ///
    /// Touches the last-login timestamp — the only place it is written.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !user.is_active {
            return Err(AppError::account_disabled("Account is deactivated"));
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        self.users.touch_last_login(user.id).await?;
        let user = self
            .users
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        info!(user_id = %user.id, "User logged in");

        let (token, _) = self.encoder.generate_token(&user)?;
        Ok((token, user))
    }

    /// Returns the caller's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Applies a partial update to the caller's own profile.
    ///
    /// Skill tags are meaningful only for volunteers; for other roles the
    /// field is ignored.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        mut update: ProfileUpdate,
    ) -> AppResult<User> {
        if ctx.role != UserRole::Volunteer {
            update.skills = None;
        }
        self.users.update_profile(ctx.user_id, &update).await
    }

    /// Rotates the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.get_profile(ctx).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::validation("Current password is incorrect"));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(ctx.user_id, &new_hash).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    /// Lists every non-admin account. Admin only.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        policy::require_role(ctx.role, UserRole::Admin)?;
        self.users.find_non_admins().await
    }

    /// Removes a non-admin account. Admin only.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<()> {
        policy::require_role(ctx.role, UserRole::Admin)?;

        let target = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if target.role == UserRole::Admin {
            return Err(AppError::validation("Cannot delete admin user"));
        }

        self.users.delete(user_id).await?;
        info!(user_id = %user_id, deleted_by = %ctx.user_id, "User deleted");
        Ok(())
    }
}
