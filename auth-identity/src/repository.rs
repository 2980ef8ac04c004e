use crate::{error::Result, models::*};
use async_trait::async_trait;
use uuid::Uuid;

/// User storage.
///
/// Emails are compared case-insensitively; implementations reject a second
/// user with the same email with [`IdentityError::EmailAlreadyInUse`].
///
/// [`IdentityError::EmailAlreadyInUse`]: crate::IdentityError::EmailAlreadyInUse
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Users holding `role`, ordered by name
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>>;
    async fn update_user_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<User>;
    async fn delete_user(&self, id: Uuid) -> Result<()>;
}
