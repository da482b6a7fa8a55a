//! # Satya Common Library
//!
//! Shared code for the Satya credibility check service including:
//! - Submission and verdict types
//! - The credibility heuristic engine (keyword rule tables)
//! - The signal analyzer (pattern scoring for free text)
//! - Identity providers (mock credential store, Firebase Identity Toolkit)
//! - Submission orchestration
//! - Configuration loading and database initialization

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod identity;
pub mod orchestrator;
pub mod signals;
pub mod submission;
pub mod verdict;

pub use engine::evaluate;
pub use error::{Error, Result};
pub use submission::{ContentKind, ContentSubmission, ImageRef};
pub use verdict::CredibilityVerdict;
