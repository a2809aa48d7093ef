//! Event handler and tracing setup tests.

use std::sync::Arc;

use chrono::Utc;
use praxis_core::events::*;
use praxis_core::models::{
    ActiveQuery, EpisodeMetrics, LevelChange, LevelDirection, QueryType, SessionState,
    TerminationReason, UncertaintyMetrics,
};
use praxis_observability::tracing_setup::spans::names;
use praxis_observability::{ChannelEventHandler, LoggingEventHandler, MetricsEventHandler};

fn started(index: u64) -> EpisodeStartedEvent {
    EpisodeStartedEvent {
        session_id: "s1".into(),
        episode_id: format!("ep-{index}"),
        episode_index: index,
        curriculum_level: 1,
    }
}

fn completed(index: u64, reward: f64) -> EpisodeCompletedEvent {
    EpisodeCompletedEvent {
        session_id: "s1".into(),
        episode_id: format!("ep-{index}"),
        episode_index: index,
        termination_reason: TerminationReason::EnvironmentTerminal,
        total_reward: reward,
        steps: 3,
        metrics: EpisodeMetrics::default(),
    }
}

fn query() -> ActiveQueryGeneratedEvent {
    ActiveQueryGeneratedEvent {
        session_id: "s1".into(),
        episode_id: "ep-0".into(),
        query: ActiveQuery {
            id: "q-1".into(),
            query_type: QueryType::InformationGain,
            uncertainty: UncertaintyMetrics::sentinel(),
            expected_benefit: 0.4,
            step: 0,
            target_action: None,
            timestamp: Utc::now(),
        },
        budget_remaining: 1,
    }
}

#[test]
fn channel_handler_forwards_in_order() {
    let (handler, mut rx) = ChannelEventHandler::new(8);
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(handler));

    dispatcher.emit_episode_started(&started(0));
    dispatcher.emit_active_query_generated(&query());
    dispatcher.emit_episode_completed(&completed(0, 1.0));

    let kinds: Vec<&str> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|e| e.kind())
        .collect();
    assert_eq!(
        kinds,
        vec!["episode_started", "active_query_generated", "episode_completed"]
    );
}

#[test]
fn channel_handler_drops_when_full() {
    let (handler, mut rx) = ChannelEventHandler::new(2);
    for i in 0..5 {
        handler.on_episode_started(&started(i));
    }
    assert_eq!(handler.forwarded(), 2);
    assert_eq!(handler.dropped(), 3);

    let first = rx.try_recv().unwrap();
    assert_eq!(first, TrainingEvent::EpisodeStarted(started(0)));
}

#[test]
fn channel_handler_survives_closed_receiver() {
    let (handler, rx) = ChannelEventHandler::new(4);
    drop(rx);
    handler.on_session_state_changed(&SessionStateChangedEvent {
        session_id: "s1".into(),
        state: SessionState::Stopped,
    });
    assert_eq!(handler.dropped(), 1);
}

#[test]
fn metrics_handler_aggregates_stream() {
    let metrics = Arc::new(MetricsEventHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(LoggingEventHandler::new()));
    dispatcher.register(metrics.clone());

    for i in 0..3 {
        dispatcher.emit_episode_started(&started(i));
        dispatcher.emit_episode_completed(&completed(i, i as f64));
    }
    dispatcher.emit_episode_started(&started(3));
    dispatcher.emit_active_query_generated(&query());
    dispatcher.emit_curriculum_advanced(&CurriculumAdvancedEvent {
        session_id: "s1".into(),
        change: LevelChange {
            from: 1,
            to: 2,
            direction: LevelDirection::Advanced,
            success_rate: 0.9,
            consistency: 0.8,
        },
    });
    dispatcher.emit_strategy_changed(&StrategyChangedEvent {
        session_id: "s1".into(),
        from: "adaptive_hybrid".into(),
        to: "diversity_maximizing".into(),
        reason: "re-evaluation".into(),
    });

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.episodes.started, 4);
    assert_eq!(snapshot.episodes.completed, 3);
    assert_eq!(snapshot.episodes.in_flight(), 1);
    assert!((snapshot.episodes.mean_reward() - 1.0).abs() < 1e-12);
    assert_eq!(snapshot.episodes.termination_reasons["environment_terminal"], 3);
    assert_eq!(snapshot.learning.queries, 1);
    assert_eq!(snapshot.learning.query_types["information_gain"], 1);
    assert_eq!(snapshot.learning.advancements, 1);
    assert_eq!(snapshot.learning.highest_level, 2);
    assert_eq!(
        snapshot.learning.current_strategy.as_deref(),
        Some("diversity_maximizing")
    );
}

#[test]
fn metrics_serialize_to_json() {
    let handler = MetricsEventHandler::new();
    handler.on_episode_started(&started(0));
    let json = serde_json::to_value(handler.snapshot()).unwrap();
    assert_eq!(json["episodes"]["started"], 1);
}

#[test]
fn span_names_are_namespaced() {
    for name in [
        names::TRAINING,
        names::EPISODE,
        names::STEP,
        names::SELECTION,
        names::CONSULTATION,
    ] {
        assert!(name.starts_with("praxis."));
    }
    let span = praxis_observability::episode_span!("ep-0", 0u64);
    let _guard = span.enter();
}
