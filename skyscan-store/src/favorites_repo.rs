use async_trait::async_trait;
use skyscan_core::FavoritesRepository;
use skyscan_shared::Flight;
use tokio::sync::RwLock;

/// Starred flights, kept as snapshots in the order they were starred
#[derive(Default)]
pub struct InMemoryFavoritesRepository {
    flights: RwLock<Vec<Flight>>,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn toggle(&self, flight: &Flight) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut flights = self.flights.write().await;
        match flights.iter().position(|f| f.id == flight.id) {
            Some(pos) => {
                flights.remove(pos);
                Ok(false)
            }
            None => {
                flights.push(flight.clone());
                Ok(true)
            }
        }
    }

    async fn contains(&self, flight_id: &str) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.flights.read().await.iter().any(|f| f.id == flight_id))
    }

    async fn list(&self) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.flights.read().await.clone())
    }
}
