use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::create_post::PostMessageRequest;
use super::PostData;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;
use crate::user::ports::UserRepository;

pub async fn update_post<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<PostMessageRequest>,
) -> Result<ApiSuccess<PostData>, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let post_id = PostId::from_string(&id).map_err(PostError::from)?;
    let command = UpdatePostCommand {
        message: body.try_into_message()?,
    };

    let post = state.post_service.update_post(&post_id, command).await?;
    tracing::info!(post_id = %post_id, caller = %caller.user_id, "Post updated via API");

    Ok(ApiSuccess::new(StatusCode::OK, (&post).into()))
}
