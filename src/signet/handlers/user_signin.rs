use crate::signet::{
    handlers::{
        error_response, message_response,
        payload::Fields,
        required_password, required_text,
        types::{
            ErrorResponse, InternalErrorResponse, MessageResponse, SigninResponse, UserSignin,
            UserSummary,
        },
    },
    password::PasswordHasher,
    service::UserService,
    token::TokenIssuer,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

fn signin_fields(fields: &Fields) -> Result<(&str, &str), Response> {
    Ok((
        required_text(fields, "email", "Email")?,
        required_password(fields)?,
    ))
}

#[utoipa::path(
    post,
    path= "/api/user/signin",
    request_body = UserSignin,
    responses (
        (status = 200, description = "Login successful", body = SigninResponse, content_type = "application/json"),
        (status = 400, description = "Missing field or unexpected error", body = ErrorResponse),
        (status = 404, description = "Unknown email or wrong password", body = MessageResponse),
        (status = 500, description = "Password comparison failed", body = InternalErrorResponse),
    ),
    tag= "user"
)]
// axum handler for signin
#[instrument(skip_all)]
pub async fn signin(
    service: Extension<UserService>,
    hasher: Extension<Arc<dyn PasswordHasher>>,
    tokens: Extension<Arc<TokenIssuer>>,
    fields: Fields,
) -> Response {
    let (email, password) = match signin_fields(&fields) {
        Ok(values) => values,
        Err(response) => return response,
    };

    let user = match service.get_user(email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("User not found");
            return message_response(StatusCode::NOT_FOUND, "Invalid Email Provided! ");
        }
        Err(e) => {
            error!("Error getting user: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match hasher.verify(password, &user.password).await {
        Ok(true) => match tokens.issue(user.id) {
            Ok(token) => {
                debug!("Login successful");

                (
                    StatusCode::OK,
                    Json(SigninResponse {
                        user: UserSummary {
                            id: user.id,
                            name: user.name,
                            email: user.email,
                        },
                        message: "Login Successful".to_string(),
                        access_token: token,
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Error signing token: {}", e);
                error_response(StatusCode::BAD_REQUEST, e.to_string())
            }
        },

        Ok(false) => {
            debug!("Invalid password");
            message_response(StatusCode::NOT_FOUND, "Invalid Password! ")
        }

        Err(e) => {
            error!("Error comparing password: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InternalErrorResponse {
                    message: "Internal Server Error! ".to_string(),
                    err: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
