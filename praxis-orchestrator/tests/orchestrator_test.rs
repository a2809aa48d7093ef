//! End-to-end episode loop tests against scripted collaborators.

#![allow(async_fn_in_trait)]

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use praxis_consultation::SimulatedExpert;
use praxis_core::config::PraxisConfig;
use praxis_core::errors::{PraxisError, PraxisResult};
use praxis_core::events::*;
use praxis_core::models::{
    Action, ActionKind, ConsultationRequest, ConsultationResponse, Experience, SessionState,
    State, StepInfo, TerminationReason, TrainingCase, Transition, UncertaintyMetrics,
};
use praxis_core::traits::{Agent, AgentStats, ConsultationChannel, Environment};
use praxis_orchestrator::{
    EpisodeOrchestrator, FnTerminationRule, SessionControl, SessionRegistry,
};
use praxis_uncertainty::UncertaintyEstimator;

// ---- Scripted collaborators ----

#[derive(Default, Clone)]
struct Probe {
    steps: Arc<AtomicU32>,
    starts: Arc<AtomicUsize>,
    ends: Arc<AtomicUsize>,
    weights: Arc<Mutex<Vec<f64>>>,
    recommendations: Arc<Mutex<Vec<Option<String>>>>,
    loaded: Arc<Mutex<Vec<usize>>>,
}

struct ScriptedEnv {
    probe: Probe,
    actions: Vec<Action>,
    episode_len: u32,
    step: u32,
    episodes: u64,
    /// (episode, step) at which `step` fails.
    fail_at: Option<(u64, u32)>,
    stop_at: Option<(u32, SessionControl)>,
}

impl ScriptedEnv {
    fn new(probe: &Probe, episode_len: u32) -> Self {
        Self {
            probe: probe.clone(),
            actions: ["observe", "admit", "resuscitate"]
                .into_iter()
                .map(|n| Action::new(n, ActionKind::Disposition))
                .collect(),
            episode_len,
            step: 0,
            episodes: 0,
            fail_at: None,
            stop_at: None,
        }
    }

    fn without_actions(mut self) -> Self {
        self.actions.clear();
        self
    }

    fn observation(&self) -> State {
        State::new(self.step)
            .with_feature("acuity", 0.2)
            .with_tag("cardiac")
    }
}

impl Environment for ScriptedEnv {
    async fn reset(&mut self) -> PraxisResult<State> {
        self.step = 0;
        self.episodes += 1;
        Ok(self.observation())
    }

    fn available_actions(&self, _state: &State) -> PraxisResult<Vec<Action>> {
        Ok(self.actions.clone())
    }

    async fn step(&mut self, _action: &Action) -> PraxisResult<Transition> {
        tokio::task::yield_now().await;
        if self.fail_at == Some((self.episodes, self.step)) {
            return Err(PraxisError::environment("simulator crashed"));
        }
        if let Some((at, control)) = &self.stop_at {
            if *at == self.step + 1 {
                control.stop();
            }
        }
        self.step += 1;
        self.probe.steps.fetch_add(1, Ordering::SeqCst);
        Ok(Transition {
            state: self.observation(),
            reward: 1.0,
            done: self.step >= self.episode_len,
            info: StepInfo {
                success: Some(true),
                competencies: vec!["cardiac".into()],
                message: None,
            },
        })
    }

    fn load_cases(&mut self, cases: Vec<TrainingCase>) {
        self.probe.loaded.lock().unwrap().push(cases.len());
    }
}

struct ProbeAgent {
    probe: Probe,
}

impl Agent for ProbeAgent {
    fn name(&self) -> &str {
        "probe"
    }

    fn select_action(&mut self, _state: &State, actions: &[Action]) -> PraxisResult<Action> {
        Ok(actions[0].clone())
    }

    fn update(&mut self, experience: &Experience) -> PraxisResult<()> {
        self.probe
            .weights
            .lock()
            .unwrap()
            .push(experience.learning_weight);
        self.probe
            .recommendations
            .lock()
            .unwrap()
            .push(experience.expert_recommendation.clone());
        Ok(())
    }

    fn confidence(&self, _state: &State, _action: &Action) -> f64 {
        0.5
    }

    fn start_episode(&mut self) {
        self.probe.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn end_episode(&mut self) {
        self.probe.ends.fetch_add(1, Ordering::SeqCst);
    }

    fn stats(&self) -> AgentStats {
        AgentStats::default()
    }
}

struct FixedEstimator(UncertaintyMetrics);

impl UncertaintyEstimator for FixedEstimator {
    fn estimate(
        &self,
        _agent: &dyn Agent,
        _state: &State,
        _action: &Action,
        _action_set: &[Action],
    ) -> UncertaintyMetrics {
        self.0
    }
}

struct SlowExpert;

impl ConsultationChannel for SlowExpert {
    async fn consult(
        &mut self,
        _request: &ConsultationRequest,
    ) -> PraxisResult<Option<ConsultationResponse>> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(None)
    }
}

#[derive(Default)]
struct StateRecorder(Mutex<Vec<SessionState>>);

impl TrainingEventHandler for StateRecorder {
    fn on_session_state_changed(&self, event: &SessionStateChangedEvent) {
        self.0.lock().unwrap().push(event.state);
    }
}

fn uncertain(total: f64) -> Box<dyn UncertaintyEstimator> {
    Box::new(FixedEstimator(UncertaintyMetrics::from_components(
        total,
        0.0,
        1.0 - total.min(1.0),
    )))
}

fn orchestrator(
    config: PraxisConfig,
    env: ScriptedEnv,
    probe: &Probe,
) -> EpisodeOrchestrator<ScriptedEnv> {
    let agent = Box::new(ProbeAgent {
        probe: probe.clone(),
    });
    EpisodeOrchestrator::new(config, env, agent).unwrap()
}

// ---- Tests ----

#[tokio::test]
async fn three_uncertain_steps_use_the_whole_query_budget() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.query.budget = 2;
    let mut orch =
        orchestrator(config, ScriptedEnv::new(&probe, 3), &probe).with_estimator(uncertain(0.9));

    let result = orch.run_episode().await.unwrap();

    assert_eq!(result.step_count(), 3);
    assert_eq!(result.termination_reason, TerminationReason::EnvironmentTerminal);
    assert_eq!(result.metrics.queries_used, 2);
    assert!(result.steps[0].query_id.is_some());
    assert!(result.steps[1].query_id.is_some());
    assert!(result.steps[2].query_id.is_none());
    assert!(orch.query_budget().is_exhausted());

    let weights = probe.weights.lock().unwrap().clone();
    assert_eq!(weights.len(), 3);
    assert!(weights[0] >= 1.0 && weights[1] >= 1.0);
    assert_eq!(weights[2], 1.0);
}

#[tokio::test]
async fn budgets_reset_every_episode() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.query.budget = 2;
    let mut orch =
        orchestrator(config, ScriptedEnv::new(&probe, 3), &probe).with_estimator(uncertain(0.9));

    for _ in 0..3 {
        let result = orch.run_episode().await.unwrap();
        assert_eq!(result.metrics.queries_used, 2);
    }
    assert_eq!(orch.history().len(), 3);
    assert_eq!(orch.query_selector().stats().total_generated, 6);
}

#[tokio::test]
async fn empty_action_list_waits() {
    let probe = Probe::default();
    let mut orch = orchestrator(
        PraxisConfig::default(),
        ScriptedEnv::new(&probe, 2).without_actions(),
        &probe,
    );

    let result = orch.run_episode().await.unwrap();

    assert_eq!(result.termination_reason, TerminationReason::EnvironmentTerminal);
    assert_eq!(result.step_count(), 2);
    for step in &result.steps {
        assert!(step.used_fallback);
        assert!(step.action.is_wait());
        assert!(step.uncertainty.is_sentinel());
        assert!(step.query_id.is_none());
    }
}

#[tokio::test]
async fn environment_failure_marks_episode_and_still_ends_agent() {
    let probe = Probe::default();
    let mut env = ScriptedEnv::new(&probe, 3);
    env.fail_at = Some((1, 1));
    let mut orch = orchestrator(PraxisConfig::default(), env, &probe);

    let failure = orch.run_episode().await.unwrap_err();

    assert_eq!(failure.result.termination_reason, TerminationReason::Error);
    assert_eq!(failure.result.step_count(), 1);
    assert!(matches!(failure.error, PraxisError::Environment { .. }));
    assert_eq!(probe.starts.load(Ordering::SeqCst), 1);
    assert_eq!(probe.ends.load(Ordering::SeqCst), 1);
    assert_eq!(orch.history().len(), 1);
}

#[tokio::test]
async fn training_continues_past_a_failed_episode() {
    let probe = Probe::default();
    let mut env = ScriptedEnv::new(&probe, 3);
    env.fail_at = Some((1, 0));
    let mut orch = orchestrator(PraxisConfig::default(), env, &probe);

    let report = orch.train(3).await;

    assert_eq!(report.episodes_run, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].episode_index, 0);
    assert!(!report.stopped);
    assert_eq!(probe.ends.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn stop_before_start_flushes_an_empty_episode() {
    let probe = Probe::default();
    let mut orch = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 3), &probe);
    orch.control().stop();

    let result = orch.run_episode().await.unwrap();

    assert_eq!(result.termination_reason, TerminationReason::Stopped);
    assert_eq!(result.step_count(), 0);
    assert_eq!(probe.ends.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stop_between_steps_ends_training() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.orchestrator.early_stop_enabled = false;
    let mut orch = orchestrator(config, ScriptedEnv::new(&probe, 10), &probe);
    let handle = orch.control();
    orch.environment_mut().stop_at = Some((2, handle));

    let report = orch.train(5).await;

    assert!(report.stopped);
    assert_eq!(report.episodes_run, 1);
    let latest = orch.history().latest().unwrap();
    assert_eq!(latest.termination_reason, TerminationReason::Stopped);
    assert_eq!(latest.step_count(), 2);
    assert_eq!(orch.curriculum().curriculum().progress.total_episodes, 0);
}

#[tokio::test(start_paused = true)]
async fn paused_session_waits_for_resume() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.orchestrator.pause_poll_interval_ms = 5;
    let mut orch = orchestrator(config, ScriptedEnv::new(&probe, 3), &probe);
    let recorder = Arc::new(StateRecorder::default());
    orch.register_handler(recorder.clone());

    let control = orch.control();
    control.pause();
    let steps = probe.steps.clone();
    let (result, steps_while_paused) = tokio::join!(orch.run_episode(), async move {
        tokio::time::sleep(Duration::from_millis(40)).await;
        let seen = steps.load(Ordering::SeqCst);
        control.resume();
        seen
    });

    assert_eq!(steps_while_paused, 0);
    let result = result.unwrap();
    assert_eq!(result.step_count(), 3);
    assert_eq!(
        *recorder.0.lock().unwrap(),
        vec![SessionState::Paused, SessionState::Running]
    );
}

#[tokio::test]
async fn expert_answers_flow_into_experience() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.orchestrator.adopt_expert_recommendation = true;
    let mut orch = orchestrator(config, ScriptedEnv::new(&probe, 3), &probe)
        .with_estimator(uncertain(1.0))
        .with_expert(SimulatedExpert::new(3).with_accuracy(1.0));

    let result = orch.run_episode().await.unwrap();

    assert_eq!(result.metrics.consultations_used, 2);
    assert!(result.steps[0].consultation_id.is_some());
    assert_eq!(result.steps[0].action.name, "resuscitate");
    assert_eq!(result.steps[2].action.name, "observe");
    let recommendations = probe.recommendations.lock().unwrap().clone();
    assert_eq!(recommendations[0].as_deref(), Some("resuscitate"));
    assert_eq!(recommendations[2], None);
    assert_eq!(orch.consultation().stats().resolved, 2);
}

#[tokio::test(start_paused = true)]
async fn late_expert_answers_are_discarded_at_episode_end() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.consultation.timeout_ms = 10;
    let mut orch = orchestrator(config, ScriptedEnv::new(&probe, 3), &probe)
        .with_estimator(uncertain(1.0))
        .with_expert(SlowExpert);

    let result = orch.run_episode().await.unwrap();

    assert_eq!(result.step_count(), 3);
    assert_eq!(result.metrics.consultations_used, 2);
    let stats = orch.consultation().stats();
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.discarded, 2);
    assert_eq!(orch.consultation().pending_count(), 0);
}

#[tokio::test]
async fn termination_checks_run_in_order() {
    let probe = Probe::default();

    let mut orch = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 20), &probe)
        .with_estimator(uncertain(0.9));
    orch.add_termination_rule(Box::new(FnTerminationRule::new("two_steps", |steps, _| {
        steps.len() >= 2
    })));
    let result = orch.run_episode().await.unwrap();
    assert_eq!(result.termination_reason, TerminationReason::CustomTermination);
    assert_eq!(result.step_count(), 2);

    let mut orch = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 20), &probe)
        .with_estimator(uncertain(0.0));
    let result = orch.run_episode().await.unwrap();
    assert_eq!(result.termination_reason, TerminationReason::ActiveLearningTermination);
    assert_eq!(result.step_count(), 5);

    let mut config = PraxisConfig::default();
    config.orchestrator.max_steps = 4;
    let mut orch = orchestrator(config, ScriptedEnv::new(&probe, 20), &probe)
        .with_estimator(uncertain(0.9));
    let result = orch.run_episode().await.unwrap();
    assert_eq!(result.termination_reason, TerminationReason::MaxStepsReached);
    assert_eq!(result.step_count(), 4);
}

#[tokio::test]
async fn consistent_success_advances_the_curriculum() {
    let probe = Probe::default();
    let mut orch = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 3), &probe)
        .with_estimator(uncertain(0.9));

    let report = orch.train(10).await;

    assert_eq!(report.final_level, 2);
    assert_eq!(report.level_changes.len(), 1);
    assert_eq!(report.level_changes[0].from, 1);
    assert!((report.mean_success_rate - 1.0).abs() < 1e-12);
    assert!(orch.curriculum().competencies().score("cardiac") > 0.5);
}

#[tokio::test]
async fn case_pool_drives_batch_selection() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.orchestrator.batch_size = 4;
    let mut orch = orchestrator(config, ScriptedEnv::new(&probe, 3), &probe);
    orch.load_case_pool(test_fixtures::triage_pool());

    let report = orch.train(3).await;

    assert_eq!(report.episodes_run, 3);
    let loaded = probe.loaded.lock().unwrap().clone();
    assert_eq!(loaded.len(), 3);
    assert!(loaded.iter().all(|&n| (1..=4).contains(&n)));
    assert_eq!(orch.selection().selection_count(), 3);
    assert!(orch
        .selection()
        .history()
        .all(|r| r.observed_success.is_some()));
}

#[tokio::test]
async fn history_survives_export_and_import() {
    let probe = Probe::default();
    let mut orch = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 2), &probe);
    orch.train(2).await;
    let json = orch.export_history().unwrap();

    let mut fresh = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 2), &probe);
    assert_eq!(fresh.import_history(&json).unwrap(), 2);
    let original = orch.history().latest().unwrap();
    let restored = fresh.history().latest().unwrap();
    assert_eq!(restored.episode_id, original.episode_id);
    assert_eq!(restored.reward_sum(), original.reward_sum());
}

#[tokio::test]
async fn registry_receives_status_snapshots() {
    let probe = Probe::default();
    let registry = Arc::new(SessionRegistry::new());
    let mut orch = orchestrator(PraxisConfig::default(), ScriptedEnv::new(&probe, 2), &probe)
        .with_session_id("ward-a")
        .with_registry(registry.clone());

    orch.run_episode().await.unwrap();

    let status = registry.status("ward-a").unwrap();
    assert_eq!(status.episodes_run, 1);
    assert_eq!(status.last_reward, Some(2.0));
    assert!(registry.stop("ward-a"));
    assert!(orch.control().is_stopped());
}

#[test]
fn invalid_config_is_rejected() {
    let probe = Probe::default();
    let mut config = PraxisConfig::default();
    config.consultation.min_threshold = 0.5;
    config.consultation.threshold = 0.5;
    let agent = Box::new(ProbeAgent {
        probe: probe.clone(),
    });
    let err = EpisodeOrchestrator::new(config, ScriptedEnv::new(&probe, 2), agent)
        .err()
        .unwrap();
    assert!(matches!(err, PraxisError::Config(_)));
}
