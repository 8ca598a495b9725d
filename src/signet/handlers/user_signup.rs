use crate::signet::{
    handlers::{
        error_response, message_response,
        payload::Fields,
        required_password, required_text,
        types::{ErrorResponse, MessageResponse, SignupResponse, UserSignup},
    },
    password::PasswordHasher,
    service::{CreateUserOutcome, UserService},
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

// name, email, password, checked in that order
fn signup_fields(fields: &Fields) -> Result<(&str, &str, &str), Response> {
    Ok((
        required_text(fields, "name", "Name")?,
        required_text(fields, "email", "Email")?,
        required_password(fields)?,
    ))
}

#[utoipa::path(
    post,
    path= "/api/user/signup",
    request_body = UserSignup,
    responses (
        (status = 201, description = "User successfully registered", body = SignupResponse, content_type = "application/json"),
        (status = 400, description = "Missing field or invalid input", body = ErrorResponse),
        (status = 403, description = "User already exists, or password hashing failed", body = MessageResponse),
    ),
    tag= "user"
)]
// axum handler for signup
#[instrument(skip_all)]
pub async fn signup(
    service: Extension<UserService>,
    hasher: Extension<Arc<dyn PasswordHasher>>,
    fields: Fields,
) -> Response {
    let (name, email, password) = match signup_fields(&fields) {
        Ok(values) => values,
        Err(response) => return response,
    };

    // salt + hash, never reach the store on failure
    let password = match hasher.hash(password).await {
        Ok(hash) => hash,
        Err(e) => {
            error!("Error hashing password: {}", e);
            return error_response(StatusCode::FORBIDDEN, "Error in user registration! ");
        }
    };

    match service.create_user(name, email, password).await {
        Ok(CreateUserOutcome::Created { id }) => {
            debug!("User created");
            (
                StatusCode::CREATED,
                Json(SignupResponse {
                    message: "User successfully registered!".to_string(),
                    id,
                }),
            )
                .into_response()
        }

        Ok(CreateUserOutcome::Duplicate) => {
            message_response(StatusCode::FORBIDDEN, "User Already Exists!")
        }

        Err(e) => {
            error!("Error creating user: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}
