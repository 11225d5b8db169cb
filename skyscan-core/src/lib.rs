pub mod invariants;
pub mod repository;
pub mod search;

pub use repository::{
    AirportDirectory, FavoritesRepository, FlightProvider, ProviderError, SearchHistoryRepository,
};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
