//! Errors handling

use std::any::Any;
use std::fmt;

use itertools::Itertools;
use reqwest::StatusCode;

/// Represent an error response returned by the GitHub REST API.
///
/// The message is the one GitHub puts in the `message` field of the error
/// body, which is what ends up in the failed run's annotation.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Validation details, e.g. `{"resource":"Issue","code":"invalid","field":"state_reason"}`.
    pub errors: Vec<serde_json::Value>,
    pub documentation_url: Option<String>,
}

impl ApiError {
    /// Builds the error from a non-success response body.
    ///
    /// GitHub answers with `{"message": ..., "documentation_url": ...}`; any
    /// other body (proxies, HTML error pages) is used verbatim.
    pub fn from_response(status: StatusCode, body: &[u8]) -> ApiError {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
            #[serde(default)]
            errors: Vec<serde_json::Value>,
            documentation_url: Option<String>,
        }

        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(b) => ApiError {
                status,
                message: b.message,
                errors: b.errors,
                documentation_url: b.documentation_url,
            },
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                let message = if text.is_empty() {
                    status.to_string()
                } else {
                    text
                };
                ApiError {
                    status,
                    message,
                    errors: Vec::new(),
                    documentation_url: None,
                }
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.errors.is_empty() {
            write!(f, ": {}", self.errors.iter().format(", "))?;
        }
        if let Some(url) = &self.documentation_url {
            write!(f, " - {url}")?;
        }
        Ok(())
    }
}

/// Renders a panic payload the way a thrown non-error value is rendered:
/// its string form if it has one.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}
