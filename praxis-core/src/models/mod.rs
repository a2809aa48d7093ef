//! Data model shared by every subsystem.

pub mod budget;
pub mod case;
pub mod complexity;
pub mod consultation;
pub mod curriculum;
pub mod episode;
pub mod experience;
pub mod query;
pub mod session;
pub mod state;
pub mod uncertainty;

pub use budget::Budget;
pub use case::{AgeBucket, ComplaintCategory, TrainingCase, VitalSigns};
pub use complexity::{ComplexityDimension, ComplexityFactor, ComplexityProfile, ProfileKey};
pub use consultation::{
    ConsultationContext, ConsultationRequest, ConsultationResponse, ConsultationStatus,
};
pub use curriculum::{
    AdaptationStrategy, EpisodePerformance, LearningCurriculum, LevelChange, LevelDirection,
    ProgressMetrics,
};
pub use episode::{EpisodeMetrics, EpisodeResult, StepRecord, TerminationReason};
pub use experience::Experience;
pub use query::{ActiveQuery, QueryType};
pub use session::SessionState;
pub use state::{Action, ActionKind, State, StepInfo, Transition};
pub use uncertainty::UncertaintyMetrics;
