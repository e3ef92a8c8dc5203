use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithAuthor;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for post operations.
///
/// Reads authors from the user store to attach their names.
pub struct PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    posts: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    pub fn new(posts: Arc<PR>, users: Arc<UR>) -> Self {
        Self { posts, users }
    }

    async fn author_name(&self, id: &UserId) -> Result<Option<String>, PostError> {
        let author = self.users.find_by_id(id).await?;
        Ok(author
            .and_then(|user| user.name)
            .map(|name| name.as_str().to_string()))
    }
}

#[async_trait]
impl<PR, UR> PostServicePort for PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        if self.users.find_by_id(&command.user_id).await?.is_none() {
            return Err(PostError::AuthorNotFound(command.user_id.to_string()));
        }

        let new_post = NewPost {
            user_id: command.user_id,
            message: command.message,
            created_at: Utc::now(),
        };

        let post = self.posts.create(new_post).await?;
        tracing::info!(post_id = %post.id, user_id = %post.user_id, "Post created");

        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<PostWithAuthor, PostError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;
        let author_name = self.author_name(&post.user_id).await?;

        Ok(PostWithAuthor { post, author_name })
    }

    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, PostError> {
        let posts = self.posts.list_all().await?;

        let mut names: HashMap<UserId, Option<String>> = HashMap::new();
        let mut listed = Vec::with_capacity(posts.len());
        for post in posts {
            let author_name = match names.get(&post.user_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.author_name(&post.user_id).await?;
                    names.insert(post.user_id, name.clone());
                    name
                }
            };
            listed.push(PostWithAuthor { post, author_name });
        }

        Ok(listed)
    }

    async fn update_post(
        &self,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        post.message = command.message;

        let updated_post = self.posts.update(post).await?;
        tracing::info!(post_id = %updated_post.id, "Post updated");

        Ok(updated_post)
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), PostError> {
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }
}
