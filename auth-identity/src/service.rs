use crate::{config::*, error::*, models::*, repository::*};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::Arc;
use uuid::Uuid;

pub struct IdentityService {
    user_repo: Arc<dyn UserRepository>,
    config: IdentityConfig,
    argon2: Argon2<'static>,
}

impl IdentityService {
    pub fn new(user_repo: Arc<dyn UserRepository>, config: IdentityConfig) -> Self {
        Self {
            user_repo,
            config,
            argon2: Argon2::default(),
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(IdentityError::Validation("Name is required".to_string()));
        }

        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(IdentityError::Validation("Invalid email format".to_string()));
        }

        self.validate_password(&request.password)?;

        if self.user_repo.find_user_by_email(&email).await?.is_some() {
            return Err(IdentityError::EmailAlreadyInUse);
        }

        let password_hash = self.hash_password(&request.password)?;
        let role = request.role.unwrap_or(Role::Patient);

        let user = self
            .user_repo
            .create_user(NewUser {
                name: name.to_string(),
                email,
                phone: request.phone.filter(|p| !p.trim().is_empty()),
                role,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Unknown email and wrong password fail identically
    pub async fn login(&self, request: &LoginRequest) -> Result<User> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(IdentityError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        self.verify_password(&request.password, &user.password_hash)?;

        tracing::debug!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User> {
        self.user_repo
            .find_user(user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)
    }

    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<User> {
        let update = normalize_update(update)?;
        self.user_repo.update_user_profile(user_id, &update).await
    }

    /// Every doctor as display fields, ordered by name
    pub async fn list_doctors(&self) -> Result<Vec<UserSummary>> {
        let doctors = self.user_repo.list_users_by_role(Role::Doctor).await?;
        Ok(doctors.iter().map(UserSummary::from).collect())
    }

    /// A doctor may only edit their own profile
    pub async fn update_doctor(
        &self,
        actor: &Actor,
        doctor_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User> {
        self.find_doctor(doctor_id).await?;

        if actor.id != doctor_id {
            return Err(IdentityError::Forbidden(
                "You can only update your own profile".to_string(),
            ));
        }

        self.update_profile(doctor_id, update).await
    }

    pub async fn delete_doctor(&self, doctor_id: Uuid) -> Result<()> {
        self.find_doctor(doctor_id).await?;
        self.user_repo.delete_user(doctor_id).await?;
        tracing::info!(doctor_id = %doctor_id, "Doctor deleted");
        Ok(())
    }

    async fn find_doctor(&self, doctor_id: Uuid) -> Result<User> {
        match self.user_repo.find_user(doctor_id).await? {
            Some(user) if user.role == Role::Doctor => Ok(user),
            _ => Err(IdentityError::UserNotFound),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| IdentityError::HashingError)?
            .to_string();
        Ok(password_hash)
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| IdentityError::HashingError)?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| IdentityError::InvalidCredentials)
    }

    fn validate_password(&self, password: &str) -> Result<()> {
        if password.chars().count() < self.config.password_min_length {
            return Err(IdentityError::Validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }
        Ok(())
    }
}

fn normalize_update(update: ProfileUpdate) -> Result<ProfileUpdate> {
    let name = match update.name {
        Some(name) if name.trim().is_empty() => {
            return Err(IdentityError::Validation("Name cannot be empty".to_string()))
        }
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };

    let email = match update.email {
        Some(email) => {
            let email = normalize_email(&email);
            if !is_valid_email(&email) {
                return Err(IdentityError::Validation("Invalid email format".to_string()));
            }
            Some(email)
        }
        None => None,
    };

    Ok(ProfileUpdate {
        name,
        email,
        phone: update.phone.map(|p| p.trim().to_string()),
    })
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
