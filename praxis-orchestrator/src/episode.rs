//! The episode step loop.
//!
//! Per step: control checkpoint, available actions, uncertainty on the
//! agent's preferred action, optional query, optional consultation, action,
//! environment step, experience and agent update, then termination checks in
//! order: environment done, custom rules, diminishing returns, step cap.

use std::time::Duration;

use chrono::{DateTime, Utc};
use praxis_core::errors::{ConsultationError, PraxisResult};
use praxis_core::events::*;
use praxis_core::models::{
    Action, ActiveQuery, ConsultationContext, EpisodePerformance, EpisodeResult, Experience,
    SessionState, State, StepRecord, TerminationReason, UncertaintyMetrics,
};
use praxis_core::traits::{ConsultationChannel, Environment};
use praxis_observability::tracing_setup::events as log_events;
use praxis_observability::{consultation_span, episode_span, step_span};
use praxis_uncertainty::{best, score_actions, UncertaintyHistory};
use tracing::{debug, warn, Instrument};

use crate::engine::EpisodeOrchestrator;
use crate::metrics;
use crate::report::EpisodeFailure;

/// Mutable state of the episode in flight.
struct EpisodeRun {
    episode_id: String,
    episode_index: u64,
    steps: Vec<StepRecord>,
    uncertainty: UncertaintyHistory,
    total_reward: f64,
    competency_outcomes: Vec<(String, bool)>,
    case_ids: Vec<String>,
    started_at: DateTime<Utc>,
}

impl EpisodeRun {
    fn note_case(&mut self, state: &State) {
        if let Some(id) = &state.case_id {
            if !self.case_ids.contains(id) {
                self.case_ids.push(id.clone());
            }
        }
    }
}

/// What the consultation phase produced for one step.
#[derive(Default)]
struct ConsultationOutcome {
    request_id: Option<String>,
    recommendation: Option<String>,
}

impl<E: Environment, C: ConsultationChannel> EpisodeOrchestrator<E, C> {
    /// Run one episode to termination.
    ///
    /// Budgets reset at the start. `Agent::end_episode` runs on every exit
    /// path. An environment or agent failure yields `EpisodeFailure` whose
    /// result carries `termination_reason = error`.
    pub async fn run_episode(&mut self) -> Result<EpisodeResult, EpisodeFailure> {
        let mut run = EpisodeRun {
            episode_id: uuid::Uuid::new_v4().to_string(),
            episode_index: self.episodes_run,
            steps: Vec::new(),
            uncertainty: UncertaintyHistory::new(self.config.uncertainty.history_capacity),
            total_reward: 0.0,
            competency_outcomes: Vec::new(),
            case_ids: Vec::new(),
            started_at: Utc::now(),
        };

        self.query_budget.reset();
        self.consultation.start_episode();
        self.agent.start_episode();
        self.last_level_change = None;
        self.events.emit_episode_started(&EpisodeStartedEvent {
            session_id: self.session_id.clone(),
            episode_id: run.episode_id.clone(),
            episode_index: run.episode_index,
            curriculum_level: self.curriculum.level(),
        });

        let span = episode_span!(run.episode_id, run.episode_index);
        let outcome = self.drive(&mut run).instrument(span).await;

        self.agent.end_episode();
        let consultations = self.consultation.end_episode(run.total_reward);
        self.episodes_run += 1;

        let (reason, error) = match outcome {
            Ok(reason) => (reason, None),
            Err(error) => (TerminationReason::Error, Some(error)),
        };
        let result = EpisodeResult {
            metrics: metrics::summarize(
                &run.steps,
                &run.uncertainty,
                consultations.used,
                self.curriculum.curriculum().completion(),
            ),
            episode_id: run.episode_id,
            episode_index: run.episode_index,
            steps: run.steps,
            total_reward: run.total_reward,
            termination_reason: reason,
            curriculum_level: self.curriculum.level(),
            case_ids: run.case_ids,
            started_at: run.started_at,
            finished_at: Utc::now(),
        };
        self.history.push(result.clone());

        if let Some(error) = error {
            self.close_selection(result.metrics.success_rate);
            self.events.emit_episode_failed(&EpisodeFailedEvent {
                session_id: self.session_id.clone(),
                episode_id: result.episode_id.clone(),
                episode_index: result.episode_index,
                error: error.to_string(),
            });
            self.publish_status();
            return Err(EpisodeFailure { result, error });
        }

        if reason != TerminationReason::Stopped {
            self.adapt(&result, run.competency_outcomes);
        }
        self.events.emit_episode_completed(&EpisodeCompletedEvent {
            session_id: self.session_id.clone(),
            episode_id: result.episode_id.clone(),
            episode_index: result.episode_index,
            termination_reason: result.termination_reason,
            total_reward: result.total_reward,
            steps: result.step_count(),
            metrics: result.metrics.clone(),
        });
        self.publish_status();
        Ok(result)
    }

    /// Episode-boundary feedback into the curriculum and case selection.
    fn adapt(&mut self, result: &EpisodeResult, competency_outcomes: Vec<(String, bool)>) {
        let performance = EpisodePerformance {
            success_rate: result.metrics.success_rate,
            consistency: result.metrics.consistency,
            total_reward: result.total_reward,
            competency_outcomes,
        };
        self.curriculum.record_episode(&performance);
        if let Some(change) = self.curriculum.check_advancement() {
            self.events.emit_curriculum_advanced(&CurriculumAdvancedEvent {
                session_id: self.session_id.clone(),
                change: change.clone(),
            });
            self.last_level_change = Some(change);
        }
        self.remember_success(performance.success_rate);
        self.close_selection(performance.success_rate);
    }

    async fn drive(&mut self, run: &mut EpisodeRun) -> PraxisResult<TerminationReason> {
        let mut state = self.environment.reset().await?;
        run.note_case(&state);
        let max_steps = self.config.orchestrator.max_steps;

        for step in 0..max_steps {
            if !self.checkpoint().await {
                return Ok(TerminationReason::Stopped);
            }

            let (next, done) = self.step(run, &state, step).instrument(step_span!(step)).await?;
            state = next;

            if done {
                return Ok(TerminationReason::EnvironmentTerminal);
            }
            if let Some(rule) = self
                .termination_rules
                .iter()
                .find(|r| r.should_terminate(&run.steps, &state))
            {
                debug!(rule = rule.name(), step, "custom termination rule fired");
                return Ok(TerminationReason::CustomTermination);
            }
            let o = &self.config.orchestrator;
            if o.early_stop_enabled
                && metrics::diminishing_returns(
                    &run.steps,
                    o.opportunity_window,
                    o.min_learning_opportunity,
                )
            {
                debug!(step, "learning opportunity exhausted");
                return Ok(TerminationReason::ActiveLearningTermination);
            }
        }
        Ok(TerminationReason::MaxStepsReached)
    }

    /// Honour pause and stop requests. Returns false when the session stopped.
    async fn checkpoint(&self) -> bool {
        match self.control.state() {
            SessionState::Running => true,
            SessionState::Stopped => {
                self.announce(SessionState::Stopped);
                false
            }
            SessionState::Paused => {
                self.announce(SessionState::Paused);
                let poll_ms = self.config.orchestrator.pause_poll_interval_ms.max(1);
                let poll = Duration::from_millis(poll_ms);
                let state = self.control.wait_while_paused(poll).await;
                self.announce(state);
                state == SessionState::Running
            }
        }
    }

    fn announce(&self, state: SessionState) {
        self.events.emit_session_state_changed(&SessionStateChangedEvent {
            session_id: self.session_id.clone(),
            state,
        });
    }

    /// One pass through the step state machine. Returns the next state and
    /// whether the environment reported the episode done.
    async fn step(
        &mut self,
        run: &mut EpisodeRun,
        state: &State,
        step: u32,
    ) -> PraxisResult<(State, bool)> {
        let actions = self.environment.available_actions(state)?;
        let scored = score_actions(self.agent.as_ref(), state, &actions);
        let preferred = best(&scored).map(|s| s.action.clone());
        let uncertainty = self.estimator.estimate(
            self.agent.as_ref(),
            state,
            preferred.as_ref().unwrap_or(&Action::wait()),
            &actions,
        );

        let mut query = None;
        let mut consultation = ConsultationOutcome::default();
        if !actions.is_empty() {
            query = self.query(run, state, &scored, &uncertainty);
            consultation = self
                .consult(run, state, step, &actions, preferred.clone(), uncertainty)
                .await;
        }

        let (action, used_fallback) = if actions.is_empty() {
            debug!(step, "no actions available; waiting");
            (Action::wait(), true)
        } else {
            let chosen = self.agent.select_action(state, &actions)?;
            (self.maybe_adopt(chosen, &actions, consultation.recommendation.as_deref()), false)
        };

        let transition = self.environment.step(&action).await?;

        let experience = Experience {
            state: state.clone(),
            action: action.clone(),
            reward: transition.reward,
            next_state: transition.state.clone(),
            done: transition.done,
            uncertainty,
            learning_weight: self.query_selector.learning_weight(query.as_ref()),
            query: query.clone(),
            expert_recommendation: consultation.recommendation,
        };
        self.agent.update(&experience)?;

        if let Some(success) = transition.info.success {
            for tag in &transition.info.competencies {
                run.competency_outcomes.push((tag.clone(), success));
            }
        }
        run.total_reward += transition.reward;
        run.uncertainty.push(uncertainty.total);
        run.note_case(&transition.state);
        run.steps.push(StepRecord {
            step,
            action,
            reward: transition.reward,
            uncertainty,
            query_id: query.map(|q| q.id),
            consultation_id: consultation.request_id,
            learning_opportunity: metrics::learning_opportunity(&uncertainty),
            used_fallback,
            success: transition.info.success,
        });

        Ok((transition.state, transition.done))
    }

    fn query(
        &mut self,
        run: &EpisodeRun,
        state: &State,
        scored: &[praxis_uncertainty::ScoredAction],
        uncertainty: &UncertaintyMetrics,
    ) -> Option<ActiveQuery> {
        let query =
            self.query_selector
                .maybe_query(state, scored, uncertainty, &mut self.query_budget)?;
        self.events.emit_active_query_generated(&ActiveQueryGeneratedEvent {
            session_id: self.session_id.clone(),
            episode_id: run.episode_id.clone(),
            query: query.clone(),
            budget_remaining: self.query_budget.remaining(),
        });
        Some(query)
    }

    /// Ask the expert when uncertainty clears the consultation threshold.
    ///
    /// Budget exhaustion skips silently. A missing or late answer leaves the
    /// request pending until the episode ends.
    async fn consult(
        &mut self,
        run: &EpisodeRun,
        state: &State,
        step: u32,
        actions: &[Action],
        preferred: Option<Action>,
        uncertainty: UncertaintyMetrics,
    ) -> ConsultationOutcome {
        let mut outcome = ConsultationOutcome::default();
        if self.expert.is_none() || !self.consultation.should_consult(&uncertainty) {
            return outcome;
        }

        let context = ConsultationContext {
            state: state.clone(),
            candidate_actions: actions.to_vec(),
            agent_preference: preferred,
            topic: state.topic().to_string(),
        };
        let question = format!("Which action for a {} presentation?", context.topic);
        let request = match self.consultation.submit(question, context, uncertainty, step) {
            Ok(request) => request,
            Err(ConsultationError::BudgetExhausted { .. }) => return outcome,
            Err(e) => {
                warn!(error = %e, step, "consultation not submitted");
                return outcome;
            }
        };
        outcome.request_id = Some(request.id.clone());
        self.events
            .emit_expert_consultation_requested(&ExpertConsultationRequestedEvent {
                session_id: self.session_id.clone(),
                episode_id: run.episode_id.clone(),
                request_id: request.id.clone(),
                step,
                uncertainty_total: uncertainty.total,
                budget_remaining: self.consultation.budget().remaining(),
            });

        let timeout_ms = self.consultation.timeout_ms();
        let Some(expert) = self.expert.as_mut() else {
            return outcome;
        };
        let answer = tokio::time::timeout(Duration::from_millis(timeout_ms), expert.consult(&request))
            .instrument(consultation_span!(request.id))
            .await;

        match answer {
            Ok(Ok(Some(response))) => match self.consultation.resolve(&response) {
                Ok(_) => {
                    self.events
                        .emit_expert_consultation_resolved(&ExpertConsultationResolvedEvent {
                            session_id: self.session_id.clone(),
                            request_id: response.request_id.clone(),
                            recommendation: response.recommendation.clone(),
                            confidence: response.confidence,
                        });
                    outcome.recommendation = Some(response.recommendation);
                }
                Err(e) => warn!(error = %e, "consultation response rejected"),
            },
            Ok(Ok(None)) => debug!(request_id = %request.id, "expert gave no answer"),
            Ok(Err(e)) => warn!(request_id = %request.id, error = %e, "consultation channel failed"),
            Err(_) => log_events::consultation_timeout(&request.id, timeout_ms),
        }
        outcome
    }

    /// Swap in the expert's recommendation when configured and it names an
    /// available action.
    fn maybe_adopt(&self, chosen: Action, actions: &[Action], recommendation: Option<&str>) -> Action {
        if !self.config.orchestrator.adopt_expert_recommendation {
            return chosen;
        }
        match recommendation.and_then(|name| actions.iter().find(|a| a.name == name)) {
            Some(action) => action.clone(),
            None => chosen,
        }
    }
}
