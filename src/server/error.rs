use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const INVALID_URL: &str = "Invalid URL.";
pub const SCREENSHOT_FAILED: &str = "Failed to generate screenshot.";
pub const INVALID_SLIDES: &str = "No slides provided or invalid format";
pub const PDF_FAILED: &str = "An error occurred while generating the PDF";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Client-facing failures. Internal detail is logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InvalidUrl,
    ScreenshotFailed,
    InvalidSlides,
    PdfFailed,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::InvalidUrl | ApiError::InvalidSlides => StatusCode::BAD_REQUEST,
            ApiError::ScreenshotFailed | ApiError::PdfFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // The screenshot flow is form based and answers in plain text.
            ApiError::InvalidUrl => (status, INVALID_URL).into_response(),
            ApiError::ScreenshotFailed => (status, SCREENSHOT_FAILED).into_response(),
            ApiError::InvalidSlides => (status, Json(ErrorBody { error: INVALID_SLIDES })).into_response(),
            ApiError::PdfFailed => (status, Json(ErrorBody { error: PDF_FAILED })).into_response(),
        }
    }
}
