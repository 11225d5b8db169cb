use crate::models::search::SearchParams;

/// Search lifecycle events, emitted as structured log records
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEvent {
    SearchStarted {
        params: SearchParams,
        timestamp: i64,
    },
    ResultsReplaced {
        params: SearchParams,
        flight_count: usize,
        timestamp: i64,
    },
    SearchFailed {
        params: SearchParams,
        reason: String,
        timestamp: i64,
    },
}

impl SessionEvent {
    pub fn params(&self) -> &SearchParams {
        match self {
            SessionEvent::SearchStarted { params, .. }
            | SessionEvent::ResultsReplaced { params, .. }
            | SessionEvent::SearchFailed { params, .. } => params,
        }
    }
}
