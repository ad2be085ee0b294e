//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Only links with this prefix may be shortened.
pub const REQUIRED_SCHEME_PREFIX: &str = "https://";

/// JSON body of a create request.
///
/// Missing fields decode as empty, so a request without a secret is rejected
/// by the secret check rather than by JSON decoding.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// The link to be shortened.
    #[serde(default)]
    pub long_url: String,

    #[serde(default)]
    pub secret: Option<String>,
}

impl CreateRequest {
    /// Returns true if the request carries exactly `secret`.
    pub fn has_secret(&self, secret: &str) -> bool {
        self.secret.as_deref() == Some(secret)
    }

    /// Checks the scheme and, when `length_limit` is set, the length of
    /// `long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL does not start with
    /// `https://` or is longer than `length_limit` bytes.
    pub fn validate_long_url(&self, length_limit: Option<usize>) -> Result<(), AppError> {
        if !self.long_url.starts_with(REQUIRED_SCHEME_PREFIX) {
            return Err(AppError::bad_request(
                "Links must start with https://",
                json!({ "url": self.long_url }),
            ));
        }

        if let Some(limit) = length_limit
            && self.long_url.len() > limit
        {
            return Err(AppError::bad_request(
                format!("Links must be at most {limit} characters"),
                json!({ "length": self.long_url.len(), "limit": limit }),
            ));
        }

        Ok(())
    }
}

/// JSON body of a successful create response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    /// The generated short link.
    pub short_url: String,
}
