use super::error::ApiError;
use super::AppState;
use crate::pipeline::{self, SlideDeck};
use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use base64::Engine as Base64Engine;
use log::{debug, error};
use serde::Deserialize;

/// Body of `POST /screenshot`, sent as `multipart/form-data` (the index
/// form) or `application/x-www-form-urlencoded`.
#[derive(Debug, Deserialize)]
pub struct ScreenshotForm {
    #[serde(default)]
    pub url: Option<String>,
}

impl ScreenshotForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut url = None;
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("rejected screenshot request: {}", e);
            ApiError::InvalidUrl
        })? {
            if field.name() != Some("url") || url.is_some() {
                continue;
            }
            url = Some(field.text().await.map_err(|e| {
                debug!("rejected screenshot request: {}", e);
                ApiError::InvalidUrl
            })?);
        }
        Ok(Self { url })
    }
}

impl<S> FromRequest<S> for ScreenshotForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
                debug!("rejected screenshot request: {}", rejection);
                ApiError::InvalidUrl
            })?;
            return Self::from_multipart(multipart).await;
        }

        let Form(form) = Form::<Self>::from_request(req, state).await.map_err(|rejection| {
            debug!("rejected screenshot request: {}", rejection);
            ApiError::InvalidUrl
        })?;
        Ok(form)
    }
}

/// Body of `POST /slides`
#[derive(Debug, Deserialize)]
pub struct SlidesRequest {
    pub slides: Vec<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage;

#[derive(Template)]
#[template(path = "screenshot.html")]
struct ScreenshotPage<'a> {
    url: &'a str,
    image_base64: String,
}

pub async fn index() -> Response {
    match IndexPage.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render index page: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn screenshot(
    State(state): State<AppState>,
    form: ScreenshotForm,
) -> Result<Html<String>, ApiError> {
    let url = match form.url {
        Some(url) if pipeline::is_capturable_url(&url) => url,
        _ => {
            debug!("rejected screenshot request with a missing or invalid url");
            return Err(ApiError::InvalidUrl);
        }
    };

    let png = pipeline::capture_url(&state.pool, &url, state.navigation_timeout)
        .await
        .map_err(|e| {
            error!("Screenshot error for {}: {}", url, e);
            ApiError::ScreenshotFailed
        })?;

    let page = ScreenshotPage {
        url: &url,
        image_base64: base64::engine::general_purpose::STANDARD.encode(&png),
    };
    page.render().map(Html).map_err(|e| {
        error!("Failed to render screenshot page: {}", e);
        ApiError::ScreenshotFailed
    })
}

pub async fn slides(
    State(state): State<AppState>,
    body: Result<Json<SlidesRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let deck = match body {
        Ok(Json(request)) => SlideDeck::new(request.slides).map_err(|e| {
            debug!("rejected slides request: {}", e);
            ApiError::InvalidSlides
        })?,
        Err(rejection) => {
            debug!("rejected slides request: {}", rejection);
            return Err(ApiError::InvalidSlides);
        }
    };

    let pdf = pipeline::render_deck(&state.pool, &deck).await.map_err(|e| {
        error!("Error generating PDF: {}", e);
        ApiError::PdfFailed
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"ai_slides.pdf\""),
        ],
        pdf,
    )
        .into_response())
}
