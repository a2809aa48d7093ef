// Single source of truth for all default values.

// --- Orchestrator ---
pub const DEFAULT_MAX_STEPS: u32 = 50;
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;
pub const DEFAULT_OPPORTUNITY_WINDOW: usize = 5;
pub const DEFAULT_MIN_LEARNING_OPPORTUNITY: f64 = 0.2;
pub const DEFAULT_EARLY_STOP_ENABLED: bool = true;
pub const DEFAULT_PAUSE_POLL_INTERVAL_MS: u64 = 250;
pub const DEFAULT_BATCH_SIZE: usize = 8;
pub const DEFAULT_ADOPT_EXPERT_RECOMMENDATION: bool = false;

// --- Uncertainty ---
pub const DEFAULT_EPISTEMIC_WEIGHT: f64 = 1.0;
pub const DEFAULT_ALEATORIC_SCALE: f64 = 0.5;
pub const DEFAULT_UNCERTAINTY_HISTORY: usize = 1_000;

// --- Active query ---
pub const DEFAULT_QUERY_BUDGET: u32 = 5;
pub const DEFAULT_QUERY_TOTAL_THRESHOLD: f64 = 0.6;
pub const DEFAULT_QUERY_INFO_GAIN_THRESHOLD: f64 = 0.8;
pub const DEFAULT_QUERY_EPSILON: f64 = 0.1;
pub const DEFAULT_THOMPSON_NOISE: f64 = 0.1;
pub const DEFAULT_QUERY_HISTORY: usize = 200;
pub const DEFAULT_QUERY_WEIGHT_BOOST: f64 = 1.0;
pub const DEFAULT_QUERY_SEED: u64 = 7;

// --- Curriculum ---
pub const DEFAULT_MAX_LEVEL: u32 = 5;
pub const DEFAULT_CURRICULUM_WINDOW: usize = 10;
pub const DEFAULT_ADVANCE_SUCCESS_RATE: f64 = 0.8;
pub const DEFAULT_ADVANCE_CONSISTENCY: f64 = 0.7;
pub const DEFAULT_ALLOW_REGRESSION: bool = false;
pub const DEFAULT_REGRESSION_SUCCESS_RATE: f64 = 0.3;
pub const DEFAULT_COMPLEXITY_WINDOW_WIDTH: f64 = 0.4;
pub const DEFAULT_COMPLEXITY_WIDEN_STEP: f64 = 0.1;
pub const DEFAULT_COMPETENCY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_COMPETENCY_EMA_ALPHA: f64 = 0.2;
pub const DEFAULT_COMPETENCY_PRIOR: f64 = 0.5;

// --- Case selection ---
pub const DEFAULT_REEVALUATION_INTERVAL: usize = 10;
pub const DEFAULT_MIN_SELECTIONS_FOR_REVIEW: usize = 3;
pub const DEFAULT_MIN_EXPECTED_BENEFIT: f64 = 0.35;
pub const DEFAULT_MAX_ADAPTATION_FREQUENCY: f64 = 0.5;
pub const DEFAULT_DIVERSITY_WEIGHT: f64 = 0.3;
pub const DEFAULT_HISTOGRAM_BINS: usize = 5;
pub const DEFAULT_SELECTION_HISTORY: usize = 100;
pub const DEFAULT_PROFILE_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_STRUGGLING_SUCCESS_RATE: f64 = 0.4;
pub const DEFAULT_EXCELLING_SUCCESS_RATE: f64 = 0.8;

// --- Consultation ---
pub const DEFAULT_CONSULTATION_BUDGET: u32 = 2;
pub const DEFAULT_CONSULTATION_THRESHOLD: f64 = 0.85;
pub const DEFAULT_CONSULTATION_MIN_THRESHOLD: f64 = 0.7;
pub const DEFAULT_CONSULTATION_MAX_THRESHOLD: f64 = 1.1;
pub const DEFAULT_CONSULTATION_THRESHOLD_STEP: f64 = 0.02;
pub const DEFAULT_CONSULTATION_TIMEOUT_MS: u64 = 2_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1_024;
