//! skillcheck-core — Assessment engine: model, validation, scoring, session.
//!
//! This crate defines the question and answer model, the per-variant
//! correctness rules, the scoring engine, and the timed session state machine
//! that the rest of the skillcheck system builds on.

pub mod answer;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod validator;
