use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated by a [`GridEngine`](crate::engine::GridEngine).
#[derive(Debug, Default, Clone)]
pub struct EngineMetrics {
    searches: u64,
    misses: u64,
    resolves: u64,
    collisions: u64,
    relocated: u64,
    overflows: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_search(&mut self, found: bool) {
        self.searches = self.searches.saturating_add(1);
        if !found {
            self.misses = self.misses.saturating_add(1);
        }
    }

    pub fn record_resolve(&mut self, collided: bool, relocated: usize, unplaced: usize) {
        self.resolves = self.resolves.saturating_add(1);
        if collided {
            self.collisions = self.collisions.saturating_add(1);
        }
        self.relocated = self.relocated.saturating_add(relocated as u64);
        if unplaced > 0 {
            self.overflows = self.overflows.saturating_add(1);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            searches: self.searches,
            misses: self.misses,
            resolves: self.resolves,
            collisions: self.collisions,
            relocated: self.relocated,
            overflows: self.overflows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub searches: u64,
    pub misses: u64,
    pub resolves: u64,
    pub collisions: u64,
    pub relocated: u64,
    pub overflows: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "engine_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("searches".to_string(), json!(self.searches));
        map.insert("misses".to_string(), json!(self.misses));
        map.insert("resolves".to_string(), json!(self.resolves));
        map.insert("collisions".to_string(), json!(self.collisions));
        map.insert("relocated".to_string(), json!(self.relocated));
        map.insert("overflows".to_string(), json!(self.overflows));
        map
    }
}
