//! intake-core — Questionnaire model, scoring engine, and statistics.
//!
//! This crate defines the fundamental data model, the pure scoring engine,
//! and the report/statistics types that the entire intake system builds on.

pub mod answers;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod statistics;
