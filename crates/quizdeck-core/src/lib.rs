//! quizdeck-core: Question ingestion, session state machine, and scoring.
//!
//! This crate defines the data model, the CSV loader, and the quiz session
//! that the quizdeck CLI drives.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod session;
