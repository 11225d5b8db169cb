pub mod airports;
pub mod app_config;
pub mod favorites_repo;
pub mod history_repo;
pub mod mock_provider;

pub use airports::StaticAirportDirectory;
pub use favorites_repo::InMemoryFavoritesRepository;
pub use history_repo::InMemoryHistoryRepository;
pub use mock_provider::MockFlightProvider;

use app_config::{Config, ProviderKind};
use skyscan_core::FlightProvider;
use std::sync::Arc;

/// Build the flight provider selected in configuration
pub fn build_provider(config: &Config) -> Arc<dyn FlightProvider> {
    match config.provider.kind {
        ProviderKind::Mock => Arc::new(MockFlightProvider::new(&config.provider)),
    }
}
