// src/session/mod.rs
mod store;
mod token;

pub use store::{SessionHandle, SessionStore, SESSION_COOKIE};
