// src/errors.rs
use astra::Response;
use thiserror::Error;

/// Errors a route handler can end with. Each renders as an HTML error
/// page; expected user mistakes (bad paste, missing acreage) are shown
/// inline on the page instead and never reach this type.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
