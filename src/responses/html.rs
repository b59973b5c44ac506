// src/responses/html.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    html_response_with_cookie(markup, None)
}

/// Same as [`html_response`], attaching a `Set-Cookie` header when given.
pub fn html_response_with_cookie(markup: Markup, cookie: Option<&str>) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8");
    if let Some(cookie) = cookie {
        builder = builder.header("Set-Cookie", cookie);
    }

    builder
        .body(Body::from(markup.into_string()))
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {e}")))
}
