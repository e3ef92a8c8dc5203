use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;
use crate::user::ports::UserRepository;

pub async fn delete_post<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let post_id = PostId::from_string(&id).map_err(PostError::from)?;

    state.post_service.delete_post(&post_id).await?;
    tracing::info!(post_id = %post_id, caller = %caller.user_id, "Post deleted via API");

    Ok(StatusCode::NO_CONTENT)
}
