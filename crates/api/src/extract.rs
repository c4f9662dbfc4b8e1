//! Request extractors.

use axum::{extract::FromRequest, extract::rejection::JsonRejection};
use tipjar_shared::AppError;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API error format.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}
