//! # praxis-selection
//!
//! Chooses which training cases the agent sees next.
//!
//! Cases are profiled once per [`ProfileKey`](praxis_core::models::ProfileKey)
//! by the [`ComplexityAnalyzer`], then one of five strategies picks a batch:
//! curriculum-progressive, uncertainty-focused, diversity-maximizing,
//! competency-based, or the adaptive hybrid of those. Every few selections the
//! engine reviews how its strategy has performed and may switch.

pub mod analyzer;
pub mod engine;
pub mod features;
pub mod result;
pub mod scorer;
pub mod strategies;

pub use analyzer::{ComplexityAnalyzer, ProfileCache};
pub use engine::{CaseSelectionEngine, StrategyChange};
pub use result::{DifficultyHistogram, SelectionRecord, SelectionResult};
pub use scorer::{AgentCaseScorer, CaseScorer};
pub use strategies::{ProfiledPool, SelectionContext, SelectionStrategy, StrategyPick};
