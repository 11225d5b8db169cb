use async_trait::async_trait;
use chrono::Utc;
use skyscan_core::repository::HistoryEntry;
use skyscan_core::SearchHistoryRepository;
use skyscan_shared::SearchParams;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Session-lifetime search history, newest first, bounded in size
pub struct InMemoryHistoryRepository {
    entries: RwLock<VecDeque<HistoryEntry>>,
    max_entries: usize,
}

impl InMemoryHistoryRepository {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries: max_entries.max(1),
        }
    }
}

#[async_trait]
impl SearchHistoryRepository for InMemoryHistoryRepository {
    async fn record(
        &self,
        params: &SearchParams,
    ) -> Result<HistoryEntry, Box<dyn std::error::Error + Send + Sync>> {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            params: params.clone(),
            searched_at: Utc::now(),
        };

        let mut entries = self.entries.write().await;
        // repeating a search moves it to the front instead of duplicating it
        entries.retain(|e| &e.params != params);
        entries.push_front(entry.clone());
        entries.truncate(self.max_entries);

        debug!("History recorded {} -> {} ({} entries)", params.origin, params.destination, entries.len());
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.entries.read().await.iter().cloned().collect())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() != before)
    }

    async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn search(destination: &str) -> SearchParams {
        SearchParams::one_way("LHR", destination, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_bounded() {
        let repo = InMemoryHistoryRepository::new(2);
        repo.record(&search("JFK")).await.unwrap();
        repo.record(&search("CDG")).await.unwrap();
        repo.record(&search("DXB")).await.unwrap();

        let destinations: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.params.destination)
            .collect();
        assert_eq!(destinations, vec!["DXB", "CDG"]);
    }

    #[tokio::test]
    async fn test_repeat_search_moves_to_front() {
        let repo = InMemoryHistoryRepository::new(5);
        repo.record(&search("JFK")).await.unwrap();
        repo.record(&search("CDG")).await.unwrap();
        repo.record(&search("JFK")).await.unwrap();

        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].params.destination, "JFK");
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let repo = InMemoryHistoryRepository::new(5);
        let entry = repo.record(&search("JFK")).await.unwrap();
        repo.record(&search("CDG")).await.unwrap();

        assert!(repo.remove(entry.id).await.unwrap());
        assert!(!repo.remove(entry.id).await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
