use auth::AccessToken;
use auth::Credentials;
use auth::StageTimings;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::post::ports::PostRepository;
use crate::user::ports::UserRepository;

/// Exchange email and password for an access token.
///
/// Unknown email and wrong password both answer 401 with the same body.
pub async fn login<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AccessToken>, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let credentials = Credentials::new(body.email, body.password);
    let mut timings = StageTimings::new();

    let result = state
        .authenticator
        .login_observed(&credentials, &mut timings)
        .await;

    for (stage, elapsed) in timings.stages() {
        tracing::debug!(
            stage = stage.as_str(),
            elapsed_us = elapsed.as_micros(),
            "Login stage completed"
        );
    }
    tracing::debug!(
        total_ms = timings.total().as_millis(),
        success = result.is_ok(),
        "Login finished"
    );

    result
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}

/// Missing fields deserialize as empty strings and fail validation with 422.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,

    #[serde(default)]
    password: String,
}
