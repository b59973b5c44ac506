// src/tests/utils.rs

use crate::config::AppConfig;
use crate::router::{handle, AppState};
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;

pub fn test_state() -> AppState {
    AppState::new(AppConfig::default()).expect("extractor patterns compile")
}

pub fn test_state_with(config: AppConfig) -> AppState {
    AppState::new(config).expect("extractor patterns compile")
}

pub fn get(path: &str, cookie: Option<&str>) -> Request {
    request(Method::GET, path, cookie, Vec::new())
}

/// POST with an `application/x-www-form-urlencoded` body.
pub fn post_form(path: &str, cookie: Option<&str>, pairs: &[(&str, &str)]) -> Request {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    request(Method::POST, path, cookie, body.into_bytes())
}

fn request(method: Method, path: &str, cookie: Option<&str>, body: Vec<u8>) -> Request {
    let mut builder = http::Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(token) = cookie {
        builder = builder.header("Cookie", format!("landcalc_session={token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn send(state: &AppState, req: Request) -> Response {
    handle(req, state).unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut buf = Vec::new();
    resp.body_mut().reader().read_to_end(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Token from the `Set-Cookie` header of a response that started a session.
pub fn session_token(resp: &Response) -> String {
    let header = resp
        .headers()
        .get("Set-Cookie")
        .expect("new session sets a cookie")
        .to_str()
        .unwrap();
    header
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("landcalc_session="))
        .unwrap()
        .to_string()
}

/// Open a session and return its token.
pub fn start_session(state: &AppState) -> String {
    let resp = send(state, get("/", None));
    session_token(&resp)
}
