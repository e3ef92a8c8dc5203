use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::post::errors::MessageError;
use crate::post::errors::PostIdError;
use crate::domain::user::models::UserId;

/// A short message published by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub message: PostMessage,
    pub created_at: DateTime<Utc>,
}

/// Post paired with its author's display name, if the author still has one.
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl PostId {
    /// Parse a post ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PostId(id)),
            Ok(id) => Err(PostIdError::InvalidFormat(format!("{} is not positive", id))),
            Err(e) => Err(PostIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post body, stored as given apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMessage(String);

impl PostMessage {
    const MAX_LENGTH: usize = 500;

    /// # Errors
    /// * `Blank` - Nothing left after trimming
    /// * `TooLong` - More than 500 characters
    pub fn new(message: String) -> Result<Self, MessageError> {
        let message = message.trim();
        let length = message.chars().count();
        if length == 0 {
            Err(MessageError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(MessageError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(message.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post data handed to storage, which assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub user_id: UserId,
    pub message: PostMessage,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            user_id: self.user_id,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

/// Command to publish a post for an authenticated author.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub user_id: UserId,
    pub message: PostMessage,
}

impl CreatePostCommand {
    pub fn new(user_id: UserId, message: PostMessage) -> Self {
        Self { user_id, message }
    }
}

/// Command to replace a post's message. Author and creation time are kept.
#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub message: PostMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_from_string() {
        assert_eq!(PostId::from_string("12"), Ok(PostId(12)));
        assert!(PostId::from_string("0").is_err());
        assert!(PostId::from_string("twelve").is_err());
    }

    #[test]
    fn test_message_bounds() {
        assert_eq!(
            PostMessage::new("  hello  ".to_string()).unwrap().as_str(),
            "hello"
        );
        assert_eq!(PostMessage::new("\n ".to_string()), Err(MessageError::Blank));
        assert!(PostMessage::new("é".repeat(500)).is_ok());
        assert_eq!(
            PostMessage::new("é".repeat(501)),
            Err(MessageError::TooLong {
                max: 500,
                actual: 501
            })
        );
    }
}
