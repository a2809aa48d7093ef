//! Knowledge gaps: topics the agent needed help with.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGap {
    pub topic: String,
    /// Consultations requested on this topic.
    pub occurrences: u64,
    /// Consultations on this topic that received an answer.
    pub addressed: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub last_addressed: Option<DateTime<Utc>>,
}

impl KnowledgeGap {
    /// Some requests on this topic never got an answer.
    pub fn is_open(&self) -> bool {
        self.addressed < self.occurrences
    }
}

/// Gap records keyed by state topic.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGapTracker {
    gaps: BTreeMap<String, KnowledgeGap>,
}

impl KnowledgeGapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, topic: &str) {
        let now = Utc::now();
        self.gaps
            .entry(topic.to_string())
            .and_modify(|gap| {
                gap.occurrences += 1;
                gap.last_seen = now;
            })
            .or_insert_with(|| KnowledgeGap {
                topic: topic.to_string(),
                occurrences: 1,
                addressed: 0,
                first_seen: now,
                last_seen: now,
                last_addressed: None,
            });
    }

    /// Returns false when the topic was never recorded.
    pub fn mark_addressed(&mut self, topic: &str) -> bool {
        match self.gaps.get_mut(topic) {
            Some(gap) => {
                gap.addressed = (gap.addressed + 1).min(gap.occurrences);
                gap.last_addressed = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, topic: &str) -> Option<&KnowledgeGap> {
        self.gaps.get(topic)
    }

    /// Open gaps, most frequent first.
    pub fn open_gaps(&self) -> Vec<&KnowledgeGap> {
        let mut open: Vec<&KnowledgeGap> = self.gaps.values().filter(|g| g.is_open()).collect();
        open.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then(a.topic.cmp(&b.topic)));
        open
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_closes_when_every_request_is_answered() {
        let mut tracker = KnowledgeGapTracker::new();
        tracker.record("cardiac");
        tracker.record("cardiac");
        tracker.record("sepsis");
        assert_eq!(tracker.open_gaps()[0].topic, "cardiac");

        assert!(tracker.mark_addressed("cardiac"));
        assert!(tracker.get("cardiac").unwrap().is_open());
        tracker.mark_addressed("cardiac");
        assert!(!tracker.get("cardiac").unwrap().is_open());
        assert_eq!(tracker.open_gaps().len(), 1);
    }

    #[test]
    fn unknown_topic_is_not_addressed() {
        let mut tracker = KnowledgeGapTracker::new();
        assert!(!tracker.mark_addressed("trauma"));
        assert!(tracker.is_empty());
    }
}
