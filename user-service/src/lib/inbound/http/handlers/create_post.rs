use auth::ValidationError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostData;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostMessage;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::ports::PostRepository;
use crate::user::ports::UserRepository;

/// Publish a post as the caller named by the bearer token.
pub async fn create_post<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<PostMessageRequest>,
) -> Result<ApiSuccess<PostData>, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let command = CreatePostCommand::new(caller.user_id, body.try_into_message()?);

    state
        .post_service
        .create_post(command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body carrying a post message (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub message: String,
}

impl PostMessageRequest {
    pub(super) fn try_into_message(self) -> Result<PostMessage, ValidationError> {
        PostMessage::new(self.message).map_err(|e| {
            let mut errors = ValidationError::new();
            errors.add("message", e.to_string());
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_reported_on_field() {
        let err = PostMessageRequest::default()
            .try_into_message()
            .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "message");
    }

    #[test]
    fn test_message_trimmed() {
        let message = PostMessageRequest {
            message: "  hello world ".to_string(),
        }
        .try_into_message()
        .unwrap();

        assert_eq!(message.as_str(), "hello world");
    }
}
