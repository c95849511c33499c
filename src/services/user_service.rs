//! User service - Handles user-related business logic.
//!
//! Owns the one domain rule (email uniqueness) and the mapping between
//! the HTTP shapes and the stored entity.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, Password, UserRequest, UserResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; fails with `DuplicateEmail` if the email is taken
    async fn create_user(&self, request: UserRequest) -> AppResult<UserResponse>;

    /// List every user
    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<UserResponse>;

    /// Overwrite name and email of an existing user
    async fn update_user(&self, id: i64, request: UserRequest) -> AppResult<UserResponse>;

    /// Delete user by ID; absent ids are a no-op
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, request: UserRequest) -> AppResult<UserResponse> {
        let plain = request
            .password
            .as_deref()
            .ok_or_else(|| AppError::validation("senha is required"))?;

        if self.repo.exists_by_email(&request.email).await? {
            tracing::debug!(email = %request.email, "Rejected duplicate email on create");
            return Err(AppError::DuplicateEmail);
        }

        let password = Password::new(plain)?;
        let user = self
            .repo
            .insert(NewUser {
                name: request.name,
                email: request.email,
                password_hash: password.into_string(),
            })
            .await?;

        tracing::info!(id = user.id, "User created");
        Ok(UserResponse::from(user))
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user(&self, id: i64) -> AppResult<UserResponse> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found()
            .map(UserResponse::from)
    }

    async fn update_user(&self, id: i64, request: UserRequest) -> AppResult<UserResponse> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        if !user.owns_email(&request.email) {
            if let Some(owner) = self.repo.find_by_email(&request.email).await? {
                if owner.id != id {
                    tracing::debug!(id, owner = owner.id, "Rejected duplicate email on update");
                    return Err(AppError::DuplicateEmail);
                }
            }
        }

        // senha is ignored on update
        user.apply_profile(request.name, request.email);
        let user = self.repo.update(user).await?;

        tracing::info!(id = user.id, "User updated");
        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    fn stored_user(id: i64, name: &str, email: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stored".to_string(),
        }
    }

    fn request(name: &str, email: &str, password: Option<&str>) -> UserRequest {
        UserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email()
            .withf(|email| email == "ana@x.com")
            .returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|new_user| {
                new_user.password_hash != "p1"
                    && Password::from_hash(new_user.password_hash.clone()).verify("p1")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: 1,
                    name: new_user.name,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                })
            });

        let created = service(repo)
            .create_user(request("Ana", "ana@x.com", Some("p1")))
            .await
            .unwrap();

        assert_eq!(
            created,
            UserResponse {
                id: 1,
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_insert().never();

        let result = service(repo)
            .create_user(request("Bia", "ana@x.com", Some("p2")))
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_create_user_requires_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().never();
        repo.expect_insert().never();

        let result = service(repo)
            .create_user(request("Ana", "ana@x.com", None))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(vec![
                stored_user(1, "Ana", "ana@x.com"),
                stored_user(2, "Bia", "bia@x.com"),
            ])
        });

        let users = service(repo).list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].email, "bia@x.com");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let result = service(repo).get_user(42).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_user_keeps_id_and_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(stored_user(id, "Ana", "ana@x.com"))));
        repo.expect_find_by_email()
            .withf(|email| email == "ana.souza@x.com")
            .returning(|_| Ok(None));
        repo.expect_update()
            .withf(|user| {
                user.id == 1
                    && user.name == "Ana Souza"
                    && user.email == "ana.souza@x.com"
                    && user.password_hash == "$argon2id$stored"
            })
            .times(1)
            .returning(Ok);

        let updated = service(repo)
            .update_user(1, request("Ana Souza", "ana.souza@x.com", Some("ignored")))
            .await
            .unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Ana Souza");
    }

    #[tokio::test]
    async fn test_update_user_same_email_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "Ana", "ana@x.com"))));
        repo.expect_find_by_email().never();
        repo.expect_update().returning(Ok);

        let updated = service(repo)
            .update_user(1, request("Ana Maria", "ana@x.com", None))
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana Maria");
    }

    #[tokio::test]
    async fn test_update_user_into_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "Bia", "bia@x.com"))));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(1, "Ana", "ana@x.com"))));
        repo.expect_update().never();

        let result = service(repo)
            .update_user(2, request("Bia", "ana@x.com", None))
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let result = service(repo)
            .update_user(5, request("Ana", "ana@x.com", None))
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_user_delegates() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(repo).delete_user(3).await.is_ok());
    }
}
