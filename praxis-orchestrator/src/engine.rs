//! EpisodeOrchestrator: owns every per-session subsystem and runs training.

use std::collections::VecDeque;
use std::sync::Arc;

use praxis_consultation::ConsultationCoordinator;
use praxis_core::config::PraxisConfig;
use praxis_core::errors::PraxisResult;
use praxis_core::events::{EventDispatcher, StrategyChangedEvent, TrainingEventHandler};
use praxis_core::models::{
    Budget, ConsultationRequest, ConsultationResponse, EpisodeResult, LevelChange, SessionState,
    State, TerminationReason, TrainingCase,
};
use praxis_core::traits::{
    Agent, CaseGenerator, ConsultationChannel, Environment, GenerationOptions, TerminationRule,
};
use praxis_curriculum::CurriculumManager;
use praxis_observability::{selection_span, training_span};
use praxis_selection::{AgentCaseScorer, CaseSelectionEngine, SelectionContext};
use praxis_uncertainty::{ActiveQuerySelector, ConfidenceSpreadEstimator, UncertaintyEstimator};
use tracing::{debug, info, warn, Instrument};

use crate::control::SessionControl;
use crate::history::EpisodeHistory;
use crate::report::{FailedEpisode, TrainingReport};
use crate::session::{SessionRegistry, SessionStatus};

/// Episodes whose success rate feeds case selection.
const RECENT_SUCCESS_WINDOW: usize = 10;

/// Consultation channel for sessions without an expert. Never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExpert;

impl ConsultationChannel for NoExpert {
    async fn consult(
        &mut self,
        _request: &ConsultationRequest,
    ) -> PraxisResult<Option<ConsultationResponse>> {
        Ok(None)
    }
}

/// Per-session training orchestrator.
///
/// All mutable training state (budgets, curriculum level, uncertainty and
/// episode history) is owned here; nothing is shared between sessions.
pub struct EpisodeOrchestrator<E, C = NoExpert> {
    pub(crate) session_id: String,
    pub(crate) config: PraxisConfig,
    pub(crate) environment: E,
    pub(crate) expert: Option<C>,
    pub(crate) agent: Box<dyn Agent>,
    pub(crate) estimator: Box<dyn UncertaintyEstimator>,
    pub(crate) query_selector: ActiveQuerySelector,
    pub(crate) query_budget: Budget,
    pub(crate) consultation: ConsultationCoordinator,
    pub(crate) curriculum: CurriculumManager,
    pub(crate) selection: CaseSelectionEngine,
    pub(crate) case_pool: Vec<TrainingCase>,
    pub(crate) pending_selection: Option<String>,
    pub(crate) termination_rules: Vec<Box<dyn TerminationRule>>,
    pub(crate) history: EpisodeHistory,
    pub(crate) events: EventDispatcher,
    pub(crate) control: SessionControl,
    pub(crate) registry: Option<Arc<SessionRegistry>>,
    pub(crate) episodes_run: u64,
    pub(crate) recent_success: VecDeque<f64>,
    /// Level change made by the most recent episode.
    pub(crate) last_level_change: Option<LevelChange>,
}

impl<E: Environment> EpisodeOrchestrator<E, NoExpert> {
    /// Validate `config` and build a session without an expert.
    pub fn new(config: PraxisConfig, environment: E, agent: Box<dyn Agent>) -> PraxisResult<Self> {
        config.validate()?;
        let session_id = uuid::Uuid::new_v4().to_string();
        info!(session_id = %session_id, agent = agent.name(), "training session created");
        Ok(Self {
            estimator: Box::new(ConfidenceSpreadEstimator::new(config.uncertainty.clone())),
            query_selector: ActiveQuerySelector::new(config.query.clone()),
            query_budget: Budget::new(config.query.budget),
            consultation: ConsultationCoordinator::new(
                config.consultation.clone(),
                config.query.total_threshold,
            ),
            curriculum: CurriculumManager::new(config.curriculum.clone()),
            selection: CaseSelectionEngine::new(config.selection.clone()),
            history: EpisodeHistory::new(config.orchestrator.history_capacity),
            session_id,
            config,
            environment,
            expert: None,
            agent,
            case_pool: Vec::new(),
            pending_selection: None,
            termination_rules: Vec::new(),
            events: EventDispatcher::new(),
            control: SessionControl::new(),
            registry: None,
            episodes_run: 0,
            recent_success: VecDeque::new(),
            last_level_change: None,
        })
    }
}

impl<E: Environment, C: ConsultationChannel> EpisodeOrchestrator<E, C> {
    /// Route consultations to `expert`.
    pub fn with_expert<X: ConsultationChannel>(self, expert: X) -> EpisodeOrchestrator<E, X> {
        EpisodeOrchestrator {
            session_id: self.session_id,
            config: self.config,
            environment: self.environment,
            expert: Some(expert),
            agent: self.agent,
            estimator: self.estimator,
            query_selector: self.query_selector,
            query_budget: self.query_budget,
            consultation: self.consultation,
            curriculum: self.curriculum,
            selection: self.selection,
            case_pool: self.case_pool,
            pending_selection: self.pending_selection,
            termination_rules: self.termination_rules,
            history: self.history,
            events: self.events,
            control: self.control,
            registry: self.registry,
            episodes_run: self.episodes_run,
            recent_success: self.recent_success,
            last_level_change: self.last_level_change,
        }
    }

    pub fn with_estimator(mut self, estimator: Box<dyn UncertaintyEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Register with `registry` and publish a status snapshot after every episode.
    pub fn with_registry(mut self, registry: Arc<SessionRegistry>) -> Self {
        registry.register(&self.session_id, self.control.clone());
        self.registry = Some(registry);
        self
    }

    pub fn register_handler(&mut self, handler: Arc<dyn TrainingEventHandler>) {
        self.events.register(handler);
    }

    pub fn add_termination_rule(&mut self, rule: Box<dyn TerminationRule>) {
        self.termination_rules.push(rule);
    }

    // ---- Accessors ----

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &PraxisConfig {
        &self.config
    }

    /// Handle for pausing, resuming or stopping this session from elsewhere.
    pub fn control(&self) -> SessionControl {
        self.control.clone()
    }

    pub fn agent(&self) -> &dyn Agent {
        self.agent.as_ref()
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    pub fn curriculum(&self) -> &CurriculumManager {
        &self.curriculum
    }

    pub fn selection(&self) -> &CaseSelectionEngine {
        &self.selection
    }

    pub fn consultation(&self) -> &ConsultationCoordinator {
        &self.consultation
    }

    pub fn query_selector(&self) -> &ActiveQuerySelector {
        &self.query_selector
    }

    pub fn query_budget(&self) -> Budget {
        self.query_budget
    }

    pub fn history(&self) -> &EpisodeHistory {
        &self.history
    }

    pub fn case_pool(&self) -> &[TrainingCase] {
        &self.case_pool
    }

    pub fn episodes_run(&self) -> u64 {
        self.episodes_run
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            session_id: self.session_id.clone(),
            state: self.control.state(),
            episodes_run: self.episodes_run,
            curriculum_level: self.curriculum.level(),
            last_reward: self.history.latest().map(|r| r.total_reward),
            updated_at: chrono::Utc::now(),
        }
    }

    // ---- Case pool ----

    /// Replace the pool that episodes draw their case batches from.
    pub fn load_case_pool(&mut self, cases: Vec<TrainingCase>) {
        info!(session_id = %self.session_id, cases = cases.len(), "case pool loaded");
        self.case_pool = cases;
    }

    /// Append `count` generated cases to the pool. Returns the new pool size.
    pub async fn generate_case_pool<G: CaseGenerator>(
        &mut self,
        generator: &mut G,
        count: usize,
        options: &GenerationOptions,
    ) -> PraxisResult<usize> {
        self.case_pool.reserve(count);
        for _ in 0..count {
            let case = generator.generate(options).await?;
            self.case_pool.push(case);
        }
        debug!(
            session_id = %self.session_id,
            generated = count,
            pool = self.case_pool.len(),
            "case pool generated"
        );
        Ok(self.case_pool.len())
    }

    /// Select the next batch from the pool and hand it to the environment.
    pub(crate) fn prepare_cases(&mut self) {
        let Some(first) = self.case_pool.first() else {
            return;
        };
        let actions = match self.environment.available_actions(&State::from_case(first)) {
            Ok(actions) => actions,
            Err(e) => {
                warn!(error = %e, "could not list actions for case scoring");
                Vec::new()
            }
        };

        let batch_size = self.config.orchestrator.batch_size;
        let _span = selection_span!(self.case_pool.len(), batch_size).entered();

        let scorer = AgentCaseScorer::new(self.agent.as_ref(), self.estimator.as_ref(), &actions);
        let mut ctx = SelectionContext::new(&self.curriculum).with_scorer(&scorer);
        if let Some(rate) = mean(&self.recent_success) {
            ctx = ctx.with_success_rate(rate);
        }

        let result = match self.selection.select(&self.case_pool, &ctx, batch_size) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "case selection failed; keeping current cases");
                return;
            }
        };

        if let Some(change) = self.selection.take_strategy_change() {
            self.events.emit_strategy_changed(&StrategyChangedEvent {
                session_id: self.session_id.clone(),
                from: change.from.to_string(),
                to: change.to.to_string(),
                reason: change.reason,
            });
        }

        debug!(
            selection_id = %result.selection_id,
            strategy = %result.strategy,
            cases = result.cases.len(),
            "case batch prepared"
        );
        self.pending_selection = Some(result.selection_id);
        self.environment.load_cases(result.cases);
    }

    /// Report an episode's success rate to the selection that produced its cases.
    pub(crate) fn close_selection(&mut self, success_rate: f64) {
        if let Some(id) = self.pending_selection.take() {
            if let Err(e) = self.selection.record_outcome(&id, success_rate) {
                debug!(error = %e, "selection outcome not recorded");
            }
        }
    }

    pub(crate) fn remember_success(&mut self, success_rate: f64) {
        if self.recent_success.len() >= RECENT_SUCCESS_WINDOW {
            self.recent_success.pop_front();
        }
        self.recent_success.push_back(success_rate);
    }

    pub(crate) fn publish_status(&self) {
        if let Some(registry) = &self.registry {
            registry.publish(self.status());
        }
    }

    // ---- Training ----

    /// Run up to `episodes` episodes, selecting a case batch before each one
    /// when a case pool is loaded.
    ///
    /// Failed episodes are recorded and the run continues; a stop request
    /// ends the run after the current episode is flushed.
    pub async fn train(&mut self, episodes: u64) -> TrainingReport {
        let span = training_span!(self.session_id, episodes);
        self.train_inner(episodes).instrument(span).await
    }

    async fn train_inner(&mut self, episodes: u64) -> TrainingReport {
        let start_level = self.curriculum.level();
        let start_advancements = self.curriculum.curriculum().progress.advancements;
        let mut level_changes = Vec::new();
        let mut failures = Vec::new();
        let mut results: Vec<EpisodeResult> = Vec::new();
        let mut stopped = false;
        let mut run = 0;

        for _ in 0..episodes {
            if self.control.state() == SessionState::Stopped {
                stopped = true;
                break;
            }
            if !self.case_pool.is_empty() {
                self.prepare_cases();
            }

            let outcome = self.run_episode().await;
            run += 1;
            if let Some(change) = self.last_level_change.take() {
                level_changes.push(change);
            }

            match outcome {
                Ok(result) => {
                    let was_stopped = result.termination_reason == TerminationReason::Stopped;
                    results.push(result);
                    if was_stopped {
                        stopped = true;
                        break;
                    }
                }
                Err(failure) => {
                    failures.push(FailedEpisode {
                        episode_id: failure.result.episode_id.clone(),
                        episode_index: failure.result.episode_index,
                        error: failure.error.to_string(),
                    });
                    results.push(failure.result);
                }
            }
        }

        let total_reward: f64 = results.iter().map(|r| r.total_reward).sum();
        let mean_reward = if results.is_empty() {
            0.0
        } else {
            total_reward / results.len() as f64
        };
        let mean_success_rate = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.metrics.success_rate).sum::<f64>() / results.len() as f64
        };

        let report = TrainingReport {
            session_id: self.session_id.clone(),
            episodes_requested: episodes,
            episodes_run: run,
            failures,
            stopped,
            total_reward,
            mean_reward,
            mean_success_rate,
            final_level: self.curriculum.level(),
            level_changes,
            final_strategy: self.selection.current_strategy().to_string(),
            queries: self.query_selector.stats(),
            consultations: self.consultation.stats(),
            profile_cache_hit_rate: self.selection.analyzer().cache().hit_rate(),
        };

        info!(
            session_id = %self.session_id,
            episodes_run = report.episodes_run,
            failures = report.failures.len(),
            stopped = report.stopped,
            mean_reward = report.mean_reward,
            start_level,
            final_level = report.final_level,
            advancements = self.curriculum.curriculum().progress.advancements - start_advancements,
            "training run finished"
        );
        report
    }

    // ---- History ----

    pub fn export_history(&self) -> PraxisResult<String> {
        self.history.export_json()
    }

    pub fn import_history(&mut self, json: &str) -> PraxisResult<usize> {
        self.history.import_json(json)
    }
}

fn mean(values: &VecDeque<f64>) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
