// src/responses/errors.rs
use crate::errors::ServerError;
use crate::templates;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

/// Convert a ServerError into an HTML error page
pub fn error_to_response(err: ServerError) -> Response {
    let status = match err {
        ServerError::NotFound => 404,
        ServerError::BadRequest(_) => 400,
        ServerError::Internal(_) | ServerError::XlsxError(_) => 500,
    };

    if status >= 500 {
        error!(%err, status, "request failed");
    } else {
        warn!(%err, status, "request rejected");
    }

    html_error_response(status, &err.to_string())
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let page = templates::error_page(status, message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(page))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
