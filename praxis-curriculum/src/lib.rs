//! # praxis-curriculum
//!
//! Discrete difficulty levels that advance on a rolling window of episode
//! performance, the complexity window used to filter cases for a level, and
//! an EMA skill score per competency tag.

pub mod competency;
pub mod engine;
pub mod range;
pub mod window;

pub use competency::CompetencyTracker;
pub use engine::CurriculumManager;
pub use range::ComplexityRange;
pub use window::PerformanceWindow;
