use std::sync::Arc;

use async_trait::async_trait;
use auth::Identity;
use auth::IdentityLookup;
use auth::LookupError;
use auth::ValidationError;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Also serves as the identity lookup behind login, so registration and
/// authentication read the same store.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service backed by `repository`.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        if password.is_empty() {
            let mut errors = ValidationError::new();
            errors.add("password", "Password is required");
            return Err(errors.into());
        }

        Ok(self.password_hasher.hash(password)?)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password)?;

        let new_user = NewUser {
            email: command.email,
            name: command.name,
            role: auth::DEFAULT_ROLE.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            user.name = Some(new_name);
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password)?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[async_trait]
impl<UR> IdentityLookup for UserService<UR>
where
    UR: UserRepository,
{
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, LookupError> {
        let user = self.repository.find_by_email(email).await?;
        Ok(user.as_ref().map(Identity::from))
    }
}

#[cfg(test)]
mod tests {
    use auth::AuthenticationError;
    use auth::CredentialVerifier;
    use auth::Credentials;
    use auth::PasswordHasher;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn stored_user(id: i64, email: &str, password_hash: &str) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            name: Some(DisplayName::new("Test User".to_string()).unwrap()),
            role: "user".to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        }
    }

    fn create_command(email: &str, password: &str) -> CreateUserCommand {
        CreateUserCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            None,
            password.to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "test@example.com"
                    && user.role == "user"
                    && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|user| Ok(user.with_id(UserId(1))));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .create_user(create_command("test@example.com", "password123"))
            .await
            .expect("Failed to create user");

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.email.as_str(), "test@example.com");
        assert_eq!(user.role, "user");
        assert!(PasswordHasher::new()
            .verify("password123", &user.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service
            .create_user(create_command("test@example.com", "password456"))
            .await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_user_empty_password_rejected() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .create_user(create_command("test@example.com", ""))
            .await;
        match result {
            Err(UserError::Validation(err)) => assert!(err.field("password").is_some()),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let expected_user = stored_user(3, "test@example.com", "$argon2id$test_hash");
        let returned_user = expected_user.clone();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(3))
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository));

        let user = service.get_user(&UserId(3)).await.unwrap();
        assert_eq!(user, expected_user);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId(99)).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                stored_user(1, "a@example.com", "$argon2id$a"),
                stored_user(2, "b@example.com", "$argon2id$b"),
            ])
        });

        let service = UserService::new(Arc::new(repository));

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, UserId(2));
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "old@example.com", "$argon2id$old"))));
        repository
            .expect_update()
            .withf(|user| {
                user.email.as_str() == "new@example.com"
                    && user.password_hash != "$argon2id$old"
                    && user.name.as_ref().map(|n| n.as_str()) == Some("Test User")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: None,
            email: Some(EmailAddress::new("new@example.com".to_string()).unwrap()),
            password: Some("new_password".to_string()),
        };

        let user = service.update_user(&UserId(1), command).await.unwrap();
        assert!(PasswordHasher::new()
            .verify("new_password", &user.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .update_user(&UserId(5), UpdateUserCommand::default())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_delete()
            .withf(|id| *id == UserId(4))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_user(&UserId(4)).await.is_ok());
    }

    #[tokio::test]
    async fn test_identity_lookup_maps_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "a@example.com")
            .times(1)
            .returning(|_| Ok(Some(stored_user(8, "a@example.com", "$argon2id$h"))));

        let service = UserService::new(Arc::new(repository));

        let identity = service
            .find_by_email("a@example.com")
            .await
            .unwrap()
            .expect("identity should exist");
        assert_eq!(identity.id, 8);
        assert_eq!(identity.name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn test_identity_lookup_surfaces_storage_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.find_by_email("a@example.com").await;
        assert!(matches!(result, Err(LookupError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_registered_password_verifies_through_lookup() {
        let hash = PasswordHasher::new().hash("s3cret").unwrap();
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |email| {
                Ok((email == "a@example.com").then(|| stored_user(2, "a@example.com", &hash)))
            });

        let verifier = CredentialVerifier::new(Arc::new(UserService::new(Arc::new(repository))));

        let user_id = verifier
            .verify(&Credentials::new("a@example.com", "s3cret"))
            .await
            .unwrap();
        assert_eq!(user_id, 2);

        let result = verifier
            .verify(&Credentials::new("a@example.com", "wrong"))
            .await;
        assert!(matches!(result, Err(AuthenticationError::InvalidCredentials)));
    }
}
