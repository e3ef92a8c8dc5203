use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::PostData;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;
use crate::post::ports::PostRepository;
use crate::user::ports::UserRepository;

pub async fn list_posts<UR, PR>(
    State(state): State<AppState<UR, PR>>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let posts = state.post_service.list_posts().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostData::from).collect(),
    ))
}
