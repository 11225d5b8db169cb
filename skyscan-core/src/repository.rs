use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyscan_shared::{Airport, Flight, SearchParams};
use uuid::Uuid;

/// Failures surfaced by an upstream flight data provider
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Network failure: {0}")]
    Network(String),
    #[error("Provider rejected credentials")]
    Unauthorized,
    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),
}

/// Source of raw flight offers for a search
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Fetch every candidate offer for the given search.
    ///
    /// The returned list is treated as ground truth for the session; an
    /// empty list is a valid answer.
    async fn search(&self, params: &SearchParams) -> Result<Vec<Flight>, ProviderError>;

    fn name(&self) -> &str;
}

/// Airport lookup used by autocomplete and history labels
#[async_trait]
pub trait AirportDirectory: Send + Sync {
    async fn search(
        &self,
        query: &str,
        exclude_code: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Airport>, Box<dyn std::error::Error + Send + Sync>>;

    async fn by_code(
        &self,
        code: &str,
    ) -> Result<Option<Airport>, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub params: SearchParams,
    pub searched_at: DateTime<Utc>,
}

/// Write-mostly sink of past searches
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    async fn record(
        &self,
        params: &SearchParams,
    ) -> Result<HistoryEntry, Box<dyn std::error::Error + Send + Sync>>;

    /// Most recent first
    async fn list(&self) -> Result<Vec<HistoryEntry>, Box<dyn std::error::Error + Send + Sync>>;

    async fn remove(&self, id: Uuid) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Flights the user starred, keyed by flight id
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Returns true when the flight is a favorite after the call
    async fn toggle(&self, flight: &Flight) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn contains(&self, flight_id: &str) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn list(&self) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_provider_error_messages() {
        assert_eq!(
            ProviderError::RateLimited { retry_after_seconds: 30 }.to_string(),
            "Rate limited, retry after 30s"
        );
        assert_eq!(ProviderError::Unauthorized.to_string(), "Provider rejected credentials");
    }

    #[test]
    fn test_provider_error_wraps_into_core_error() {
        let err: crate::CoreError = ProviderError::Network("timeout".to_string()).into();
        assert_eq!(err.to_string(), "Provider error: Network failure: timeout");
    }

    #[test]
    fn test_history_entry_serde() {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            params: SearchParams::one_way("LHR", "JFK", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
            searched_at: Utc::now(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
