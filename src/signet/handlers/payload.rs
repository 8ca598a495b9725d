//! Request bodies for the user endpoints.
//!
//! Both endpoints accept JSON and urlencoded forms. Fields are read one at a
//! time, so a single field of the wrong type is reported by name instead of
//! discarding the whole body.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};
use std::{collections::HashMap, convert::Infallible};
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One field as sent by the client.
#[derive(Debug, PartialEq, Eq)]
pub enum Field<'a> {
    Missing,
    Text(&'a str),
    NotText,
}

/// The decoded body. An absent or unreadable body has no fields.
#[derive(Debug, Default)]
pub struct Fields(Map<String, Value>);

impl Fields {
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    fn from_form(form: HashMap<String, String>) -> Self {
        Self(
            form.into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    /// `null` counts as missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Field<'_> {
        match self.0.get(key) {
            None | Some(Value::Null) => Field::Missing,
            Some(Value::String(value)) => Field::Text(value),
            Some(_) => Field::NotText,
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

#[async_trait]
impl<S> FromRequest<S> for Fields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            return Ok(
                match Form::<HashMap<String, String>>::from_request(req, state).await {
                    Ok(Form(form)) => Self::from_form(form),
                    Err(e) => {
                        debug!("Unreadable form body: {}", e);
                        Self::default()
                    }
                },
            );
        }

        Ok(match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Self::from_value(value),
            Err(e) => {
                debug!("Unreadable JSON body: {}", e);
                Self::default()
            }
        })
    }
}
