use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::post::errors::PostError;
use crate::user::errors::UserError;

#[derive(Default)]
struct Store {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email.as_str() == email && Some(user.id) != except)
    }
}

/// Process-local user storage.
///
/// Ids are assigned sequentially from 1 and never reused. Every write is
/// visible to the next read.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut store = self.store.write().await;

        if store.email_taken(user.email.as_str(), None) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        store.last_id += 1;
        let user = user.with_id(UserId(store.last_id));
        store.users.insert(user.id.0, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.store.read().await.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if store.email_taken(user.email.as_str(), Some(user.id)) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        store.users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.store
            .write()
            .await
            .users
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
struct PostStore {
    posts: BTreeMap<i64, Post>,
    last_id: i64,
}

/// Process-local post storage with the same id rules as
/// `InMemoryUserRepository`. Author existence is left to the service.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<PostStore>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let post = post.with_id(PostId(store.last_id));
        store.posts.insert(post.id.0, post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        Ok(self.store.read().await.posts.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.store.read().await.posts.values().cloned().collect())
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut store = self.store.write().await;

        match store.posts.get_mut(&post.id.0) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post)
            }
            None => Err(PostError::NotFound(post.id.to_string())),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        self.store
            .write()
            .await
            .posts
            .remove(&id.0)
            .map(|_| ())
            .ok_or(PostError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::post::models::PostMessage;
    use crate::domain::user::models::EmailAddress;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: EmailAddress::new(email.to_string()).unwrap(),
            name: None,
            role: "user".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("a@example.com")).await.unwrap();
        let second = repository.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_created_user_immediately_readable() {
        let repository = InMemoryUserRepository::new();

        let created = repository.create(new_user("a@example.com")).await.unwrap();

        let by_email = repository.find_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email, Some(created.clone()));
        let by_id = repository.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id, Some(created));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("a@example.com")).await.unwrap();

        let result = repository.create(new_user("a@example.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("a@example.com")).await.unwrap();
        let mut second = repository.create(new_user("b@example.com")).await.unwrap();

        second.email = EmailAddress::new("a@example.com".to_string()).unwrap();
        let result = repository.update(second).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_does_not_reuse_ids() {
        let repository = InMemoryUserRepository::new();
        let first = repository.create(new_user("a@example.com")).await.unwrap();

        repository.delete(&first.id).await.unwrap();
        assert!(matches!(
            repository.delete(&first.id).await,
            Err(UserError::NotFound(_))
        ));

        let next = repository.create(new_user("a@example.com")).await.unwrap();
        assert_eq!(next.id, UserId(2));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    fn new_post(user_id: i64, message: &str) -> NewPost {
        NewPost {
            user_id: UserId(user_id),
            message: PostMessage::new(message.to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_post_written_then_read_back() {
        let repository = InMemoryPostRepository::new();

        let first = repository.create(new_post(1, "one")).await.unwrap();
        let second = repository.create(new_post(2, "two")).await.unwrap();
        assert_eq!(first.id, PostId(1));
        assert_eq!(second.id, PostId(2));

        let mut edited = first.clone();
        edited.message = PostMessage::new("uno".to_string()).unwrap();
        repository.update(edited.clone()).await.unwrap();

        assert_eq!(repository.find_by_id(&first.id).await.unwrap(), Some(edited));
        let listed = repository.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1], second);
    }

    #[tokio::test]
    async fn test_missing_post_update_and_delete() {
        let repository = InMemoryPostRepository::new();
        let post = repository.create(new_post(1, "one")).await.unwrap();

        repository.delete(&post.id).await.unwrap();

        assert!(matches!(
            repository.update(post.clone()).await,
            Err(PostError::NotFound(_))
        ));
        assert!(matches!(
            repository.delete(&post.id).await,
            Err(PostError::NotFound(_))
        ));
        let next = repository.create(new_post(1, "again")).await.unwrap();
        assert_eq!(next.id, PostId(2));
    }
}
