use crate::comparison::{compare, ComparisonRow, ComparisonSet, ToggleOutcome, DEFAULT_CAPACITY};
use crate::facets::{self, AirlineFacet, FacetScope};
use crate::filters::{FilterAction, FilterError, FilterState, PriceRange, SortBy, StopsBucket, TimeSlot};
use crate::pipeline::derive_visible;
use crate::stats::{compute_stats, observed_price_range, ResultStats};
use serde::{Deserialize, Serialize};
use skyscan_core::invariants::check_flight;
use skyscan_shared::models::events::SessionEvent;
use skyscan_shared::{Flight, SearchParams};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResultsConfig {
    #[serde(default)]
    pub default_sort: SortBy,
    #[serde(default)]
    pub facet_scope: FacetScope,
    #[serde(default = "default_capacity")]
    pub comparison_capacity: usize,
    #[serde(default = "default_fallback_price_max")]
    pub fallback_price_max: f64,
}

fn default_capacity() -> usize { DEFAULT_CAPACITY }
fn default_fallback_price_max() -> f64 { PriceRange::FALLBACK.max }

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            default_sort: SortBy::default(),
            facet_scope: FacetScope::default(),
            comparison_capacity: DEFAULT_CAPACITY,
            fallback_price_max: PriceRange::FALLBACK.max,
        }
    }
}

/// The flight list, filters and comparison picks of one search.
///
/// Every state change goes through `&mut self`, so readers never observe a
/// new flight list paired with stale filters or comparison ids. Derived
/// views are recomputed on each call.
#[derive(Debug, Clone)]
pub struct SearchSession {
    config: ResultsConfig,
    params: Option<SearchParams>,
    flights: Vec<Flight>,
    filters: FilterState,
    comparison: ComparisonSet,
    last_error: Option<String>,
}

impl SearchSession {
    pub fn new(config: ResultsConfig) -> Self {
        let filters = FilterState::new(PriceRange::new(0.0, config.fallback_price_max))
            .with_sort(config.default_sort);
        let comparison = ComparisonSet::with_capacity(config.comparison_capacity);
        Self {
            config,
            params: None,
            flights: Vec::new(),
            filters,
            comparison,
            last_error: None,
        }
    }

    /// Install a new result list, resetting filters and comparison picks with it
    pub fn replace(&mut self, params: SearchParams, flights: Vec<Flight>) -> SessionEvent {
        for flight in &flights {
            if let Err(violation) = check_flight(flight) {
                tracing::warn!("Provider returned malformed flight: {}", violation);
            }
        }

        let event = SessionEvent::ResultsReplaced {
            params: params.clone(),
            flight_count: flights.len(),
            timestamp: chrono::Utc::now().timestamp(),
        };

        self.install(params, flights);
        self.last_error = None;

        tracing::info!(event = ?event, "Search results replaced");
        event
    }

    /// Record a failed search: the session holds zero flights and the error text
    pub fn fail(&mut self, params: SearchParams, reason: impl Into<String>) -> SessionEvent {
        let reason = reason.into();
        let event = SessionEvent::SearchFailed {
            params: params.clone(),
            reason: reason.clone(),
            timestamp: chrono::Utc::now().timestamp(),
        };

        self.install(params, Vec::new());
        self.last_error = Some(reason);

        tracing::warn!(event = ?event, "Search failed");
        event
    }

    fn install(&mut self, params: SearchParams, flights: Vec<Flight>) {
        let bounds = self.bounds_for(&flights);
        self.filters = FilterState::new(bounds).with_sort(self.config.default_sort);
        self.comparison.clear();
        self.flights = flights;
        self.params = Some(params);
    }

    fn bounds_for(&self, flights: &[Flight]) -> PriceRange {
        observed_price_range(flights)
            .unwrap_or_else(|| PriceRange::new(0.0, self.config.fallback_price_max))
    }

    pub fn apply(&mut self, action: FilterAction) -> Result<(), FilterError> {
        let next = self.filters.apply(action)?;
        tracing::debug!("Filters updated: {:?}", next);
        self.filters = next;
        Ok(())
    }

    /// Back to all-inclusive filters over the current price bounds
    pub fn reset_filters(&mut self) {
        let next = FilterState::new(self.price_bounds()).with_sort(self.filters.sort_by);
        self.filters = next;
    }

    pub fn toggle_compare(&mut self, flight_id: &str) -> ToggleOutcome {
        let outcome = self.comparison.toggle(flight_id);
        tracing::debug!("Compare toggle {} -> {:?}", flight_id, outcome);
        outcome
    }

    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
    }

    pub fn params(&self) -> Option<&SearchParams> {
        self.params.as_ref()
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn price_bounds(&self) -> PriceRange {
        self.bounds_for(&self.flights)
    }

    pub fn visible(&self) -> Vec<Flight> {
        derive_visible(&self.flights, &self.filters)
    }

    pub fn stats(&self) -> ResultStats {
        compute_stats(self.flights.len(), &self.visible())
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count(&self.price_bounds())
    }

    pub fn airline_facets(&self) -> Vec<AirlineFacet> {
        facets::compute_airline_facets(&self.flights)
    }

    pub fn stop_counts(&self) -> Vec<(StopsBucket, usize)> {
        facets::stop_counts(&self.flights, &self.filters, self.config.facet_scope)
    }

    pub fn time_slot_counts(&self) -> Vec<(TimeSlot, usize)> {
        facets::time_slot_counts(&self.flights, &self.filters, self.config.facet_scope)
    }

    pub fn comparison_flights(&self) -> Vec<&Flight> {
        self.comparison.resolve(&self.flights)
    }

    pub fn comparison_rows(&self) -> Vec<ComparisonRow<'_>> {
        compare(&self.comparison_flights())
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(ResultsConfig::default())
    }
}
