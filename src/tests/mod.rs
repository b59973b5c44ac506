// src/tests/mod.rs
mod router_tests;
mod utils;
