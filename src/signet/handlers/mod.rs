pub mod health;
pub use self::health::health;

pub mod payload;
pub mod types;

pub mod user_signup;
pub use self::user_signup::signup;

pub mod user_signin;
pub use self::user_signin::signin;

// common functions for the handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use payload::{Field, Fields};
use types::{ErrorResponse, MessageResponse};

fn required<'a>(
    fields: &'a Fields,
    key: &str,
    label: &str,
    is_blank: fn(&str) -> bool,
) -> Result<&'a str, Response> {
    match fields.get(key) {
        Field::Text(value) if !is_blank(value) => Ok(value),
        Field::Missing | Field::Text(_) => Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("{label} not provided"),
        )),
        Field::NotText => Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("{label} must be a string"),
        )),
    }
}

/// A required text field, blank counts as missing.
pub(crate) fn required_text<'a>(
    fields: &'a Fields,
    key: &str,
    label: &str,
) -> Result<&'a str, Response> {
    required(fields, key, label, |value| value.trim().is_empty())
}

/// The password is not trimmed, whitespace is part of the secret.
pub(crate) fn required_password(fields: &Fields) -> Result<&str, Response> {
    required(fields, "password", "Password", str::is_empty)
}

pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

pub(crate) fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn rejection(result: Result<&str, Response>) -> Result<(StatusCode, Value)> {
        let Err(response) = result else {
            anyhow::bail!("expected a rejection");
        };
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&body)?))
    }

    #[tokio::test]
    async fn required_text_rejects_missing_and_blank() -> Result<()> {
        let fields = Fields::from_value(json!({"name": "   ", "email": null, "x": "Ada"}));

        assert_eq!(required_text(&fields, "x", "X").ok(), Some("Ada"));
        for key in ["name", "email", "absent"] {
            let (status, body) = rejection(required_text(&fields, key, "Name")).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Name not provided" }));
        }
        Ok(())
    }

    #[tokio::test]
    async fn required_text_names_non_string_field() -> Result<()> {
        let fields = Fields::from_value(json!({"email": ["ada@ex.com"]}));

        let (status, body) = rejection(required_text(&fields, "email", "Email")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Email must be a string" }));
        Ok(())
    }

    #[tokio::test]
    async fn required_password_keeps_whitespace() -> Result<()> {
        let fields = Fields::from_value(json!({"password": "  "}));
        assert_eq!(required_password(&fields).ok(), Some("  "));

        let fields = Fields::from_value(json!({"password": ""}));
        let (_, body) = rejection(required_password(&fields)).await?;
        assert_eq!(body, json!({ "error": "Password not provided" }));
        Ok(())
    }
}
