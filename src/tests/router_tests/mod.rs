// src/tests/router_tests/mod.rs
mod calculator_tests;
mod calculators_tests;
mod report_tests;
