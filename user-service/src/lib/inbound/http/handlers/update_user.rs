use auth::ValidationError;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::ports::PostRepository;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub async fn update_user<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = body.try_into_command()?;

    let user = state.user_service.update_user(&user_id, command).await?;
    tracing::info!(user_id = %user_id, caller = %caller.user_id, "User updated via API");

    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ValidationError> {
        let mut errors = ValidationError::new();

        let name = self.name.and_then(|name| {
            DisplayName::new(name)
                .map_err(|e| errors.add("name", e.to_string()))
                .ok()
        });

        let email = self.email.and_then(|email| {
            EmailAddress::new(email)
                .map_err(|_| errors.add("email", "Email address is not valid"))
                .ok()
        });

        if let Some(password) = &self.password {
            auth::credentials::check_password(&mut errors, "password", password);
        }

        errors.into_result()?;

        Ok(UpdateUserCommand {
            name,
            email,
            password: self.password,
        })
    }
}
