// Readiness analysis engine.
// Implements: JD/resume signal extraction, pairing, dimension scoring, score adjustment,
// report assembly and text export. Pure and synchronous; handlers reach it through
// the ReadinessAnalyzer trait, which moves each run onto the blocking pool.

pub mod adjustments;
pub mod dimensions;
pub mod education;
pub mod eligibility;
pub mod export;
pub mod handlers;
pub mod jd_signals;
pub mod pairing;
pub mod pipeline;
pub mod report;
pub mod resume_signals;
pub mod text;

// Re-export the public API consumed by routes and state.
pub use pipeline::{KeywordAnalyzer, ReadinessAnalyzer};
