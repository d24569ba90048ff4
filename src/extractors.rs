use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` whose rejections (bad syntax, wrong types, wrong content type)
/// come back as 400 `ApiError::Validation` instead of axum's defaults.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
