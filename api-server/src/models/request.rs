use serde::Deserialize;
use validator::Validate;

use crate::{AppError, AppResult};

/// Body of `POST /predict` and `POST /extract_features`
#[derive(Debug, Deserialize, Validate)]
pub struct UrlRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub url: Option<String>,
}

impl UrlRequest {
    /// Validated, non-empty URL
    pub fn into_url(self) -> AppResult<String> {
        self.validate()?;
        self.url.ok_or(AppError::MissingInput)
    }
}
