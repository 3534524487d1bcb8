//! Test Module
//!
//! Cross-module test suites for the security chatbot.
//!
//! ## Test Categories
//! - `brain_tests`: normalization, classification, prompt selection, request building
//! - `integration_tests`: full turn from raw message to HTTP call to transcript
//! - `repl_tests`: how prompt lines become commands or turns

pub mod integration_tests;
pub mod repl_tests;
