use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("\"{title}\" is already in your collection")]
    DuplicateTitle { title: String },

    #[error("no movie with id {id}")]
    NotFound { id: i32 },

    /// The provider could not be reached or answered with a non-success status.
    #[error("movie database unavailable, try again later ({0})")]
    LookupUnavailable(reqwest::Error),

    #[error("unexpected response from movie database: {detail}")]
    MalformedProviderData { detail: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        Self::LookupUnavailable(err.without_url())
    }
}

impl AppError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedProviderData { detail: detail.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateTitle { .. } => StatusCode::CONFLICT,
            Self::LookupUnavailable(_) | Self::MalformedProviderData { .. } => {
                StatusCode::BAD_GATEWAY
            },
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = crate::templates::error_page(status, self.to_string());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
