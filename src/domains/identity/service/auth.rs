//! Registration, login and profile

use super::password::{hash_password, verify_password};
use crate::domain::{LoginInput, LoginResponse, NewUser, RegisterInput, Role, User};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::UserRepository;
use metrics::counter;
use std::sync::Arc;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService<U: UserRepository> {
    user_repo: Arc<U>,
    jwt_manager: JwtManager,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: Arc<U>, jwt_manager: JwtManager) -> Self {
        Self {
            user_repo,
            jwt_manager,
        }
    }

    /// Register a student account
    pub async fn register(&self, input: RegisterInput) -> Result<User> {
        input.validate()?;

        let new_user = NewUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash: hash_password(&input.password)?,
            role: Role::Student,
        };

        let user = self
            .user_repo
            .create(&new_user)
            .await?
            .or_conflict("User already exists!")?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, input: LoginInput) -> Result<LoginResponse> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                counter!("lms_auth_login_total", "result" => "failure").increment(1);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(&input.password, &user.password_hash)? {
            counter!("lms_auth_login_total", "result" => "failure").increment(1);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = self
            .jwt_manager
            .create_access_token(user.id, &user.email, user.role)?;

        counter!("lms_auth_login_total", "result" => "success").increment(1);
        Ok(LoginResponse { user, access_token })
    }

    pub async fn profile(&self, user_id: i64) -> Result<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found!".to_string()))
    }
}
