use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};
use std::io;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        storage_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            102 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 102,
        message: "route not found".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn storage_error<T: Debug>(err: T) -> Error {
    tracing::error!("storage error: {:?}", err);

    Error {
        code: 2,
        message: "storage error".into(),
    }
}

pub fn serialization_error<T: Debug>(err: T) -> Error {
    tracing::error!("serialization error: {:?}", err);

    Error {
        code: 3,
        message: "serialization error".into(),
    }
}

pub fn server_error<T: Debug>(err: T) -> Error {
    tracing::error!("server error: {:?}", err);

    Error {
        code: 4,
        message: "server error".into(),
    }
}

pub fn config_error(key: &str) -> Error {
    Error {
        code: 6,
        message: format!("invalid configuration value for {}", key),
    }
}

#[test]
fn http_status_follows_error_code() {
    let not_found = not_found_error().into_response();
    assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

    let bad_input = invalid_input_error().into_response();
    assert_eq!(bad_input.status(), StatusCode::BAD_REQUEST);

    let storage = storage_error("disk full").into_response();
    assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
