use serde::{Deserialize, Serialize};
use skyscan_shared::Flight;

pub const DEFAULT_CAPACITY: usize = 3;

/// What a toggle did, so callers can tell a silent rejection apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToggleOutcome {
    Added,
    Removed,
    RejectedAtCapacity,
}

/// Bounded, insertion-ordered set of flight ids picked for side-by-side comparison.
///
/// When full, adding is refused rather than evicting the oldest member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSet {
    ids: Vec<String>,
    capacity: usize,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|member| member == id) {
            self.ids.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            tracing::debug!("Comparison full ({}), ignoring {}", self.capacity, id);
            return ToggleOutcome::RejectedAtCapacity;
        }
        self.ids.push(id.to_string());
        ToggleOutcome::Added
    }

    /// Members mapped onto `flights`, in comparison-slot order.
    ///
    /// Ids with no matching flight are skipped.
    pub fn resolve<'a>(&self, flights: &'a [Flight]) -> Vec<&'a Flight> {
        self.ids
            .iter()
            .filter_map(|id| flights.iter().find(|f| &f.id == id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|member| member == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A compared flight with its "best" markers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow<'a> {
    pub flight: &'a Flight,
    pub best_price: bool,
    pub best_duration: bool,
}

/// Mark every flight sharing the minimum price or duration, not just the first
pub fn compare<'a>(resolved: &[&'a Flight]) -> Vec<ComparisonRow<'a>> {
    let best_price = resolved
        .iter()
        .map(|f| f.price.amount)
        .fold(f64::INFINITY, f64::min);
    let best_duration = resolved.iter().map(|f| f.duration_minutes).min();

    resolved
        .iter()
        .map(|&flight| ComparisonRow {
            flight,
            best_price: flight.price.amount == best_price,
            best_duration: Some(flight.duration_minutes) == best_duration,
        })
        .collect()
}
