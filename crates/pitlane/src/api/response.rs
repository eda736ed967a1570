//! Response envelopes and error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use super::params::{page_link, PageRequest};
use crate::error::Error;
use crate::storage::Page;

/// One page of a list endpoint with links to its neighbours.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Rows matching the request across all pages.
    pub count: u64,
    /// Link to the following page, if any.
    pub next: Option<String>,
    /// Link to the preceding page, if any.
    pub previous: Option<String>,
    /// Rows on this page.
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub(crate) fn new(
        page: Page<T>,
        request: PageRequest,
        path: &str,
        query: Option<&str>,
    ) -> Self {
        let shown = u64::from(request.number) * u64::from(request.size);
        let next = (shown < page.count).then(|| page_link(path, query, request.number + 1));
        let previous = (request.number > 1).then(|| page_link(path, query, request.number - 1));

        Self {
            count: page.count,
            next,
            previous,
            results: page.results,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl Error {
    fn status(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {self}");
            "internal server error".to_string()
        } else {
            debug!("Request rejected: {self}");
            self.to_string()
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
