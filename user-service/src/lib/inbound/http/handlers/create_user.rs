use auth::AccessToken;
use auth::AuthenticationError;
use auth::ValidationError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::post::ports::PostRepository;
use crate::user::ports::UserRepository;

/// Register a user and hand back a token for the new account.
pub async fn create_user<UR, PR>(
    State(state): State<AppState<UR, PR>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await?;

    let token = state
        .authenticator
        .issue_token(user.id.0)
        .map_err(AuthenticationError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        CreateUserResponseData {
            user: (&user).into(),
            token,
        },
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    email: String,

    #[serde(default)]
    password: String,

    /// Confirmation, must equal `password`.
    #[serde(default)]
    password2: String,

    name: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ValidationError> {
        let mut errors = ValidationError::new();

        auth::credentials::check_email(&mut errors, "email", &self.email);
        auth::credentials::check_password(&mut errors, "password", &self.password);
        if self.password != self.password2 {
            errors.add("password2", "Passwords do not match");
        }

        let name = match self
            .name
            .filter(|name| !name.trim().is_empty())
            .map(DisplayName::new)
            .transpose()
        {
            Ok(name) => name,
            Err(e) => {
                errors.add("name", e.to_string());
                None
            }
        };

        errors.into_result()?;

        let email = EmailAddress::new(self.email).map_err(|e| {
            let mut errors = ValidationError::new();
            errors.add("email", e.to_string());
            errors
        })?;

        Ok(CreateUserCommand::new(email, name, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub user: UserData,
    pub token: AccessToken,
}
