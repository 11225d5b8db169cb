pub mod args;
pub mod error;
pub mod render;

use args::Cli;
use error::CliError;
use serde::Serialize;
use skyscan_core::repository::HistoryEntry;
use skyscan_core::search::validate_search;
use skyscan_core::{AirportDirectory, FavoritesRepository, FlightProvider, SearchHistoryRepository};
use skyscan_results::filters::Bucket;
use skyscan_results::{
    AirlineFacet, ComparisonRow, FilterAction, FilterState, ResultStats, SearchSession, StopsBucket,
    TimeSlot, ToggleOutcome,
};
use skyscan_shared::models::events::SessionEvent;
use skyscan_shared::{Flight, SearchParams};
use skyscan_store::app_config::Config;
use skyscan_store::{build_provider, InMemoryFavoritesRepository, InMemoryHistoryRepository, StaticAirportDirectory};
use std::collections::{BTreeSet, HashSet};

/// What one invocation produced
#[derive(Debug)]
pub struct RunOutput {
    pub rendered: String,
    pub search_failed: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    search: &'a SearchParams,
    history: &'a HistoryEntry,
    event: &'a SessionEvent,
    error: Option<&'a str>,
    filters: &'a FilterState,
    active_filters: usize,
    stats: ResultStats,
    airlines: Vec<AirlineFacet>,
    stops: Vec<(StopsBucket, usize)>,
    departure_slots: Vec<(TimeSlot, usize)>,
    flights: Vec<Flight>,
    compare: Vec<ComparePick>,
    comparison: Vec<ComparisonRow<'a>>,
    favorites: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ComparePick {
    id: String,
    outcome: ToggleOutcome,
}

/// Filter actions that narrow an all-inclusive state to the command line's choices
pub fn filter_actions(cli: &Cli, current: &FilterState) -> Vec<FilterAction> {
    let mut actions = Vec::new();

    actions.extend(deselect_others(&cli.stops).into_iter().map(FilterAction::ToggleStops));
    actions.extend(deselect_others(&cli.slots).into_iter().map(FilterAction::ToggleTimeSlot));

    let airlines: BTreeSet<String> = cli.airlines.iter().map(|code| code.trim().to_uppercase()).collect();
    actions.extend(airlines.into_iter().map(FilterAction::ToggleAirline));

    if cli.min_price.is_some() || cli.max_price.is_some() {
        actions.push(FilterAction::SetPriceRange {
            min: cli.min_price.unwrap_or(current.price_range.min),
            max: cli.max_price.unwrap_or(current.price_range.max),
        });
    }

    if let Some(sort_by) = cli.sort {
        actions.push(FilterAction::SetSortBy(sort_by));
    }

    actions
}

/// Buckets to toggle off so that only `wanted` stays selected
fn deselect_others<T: Bucket>(wanted: &[T]) -> Vec<T> {
    if wanted.is_empty() {
        return Vec::new();
    }
    T::ALL.iter().copied().filter(|bucket| !wanted.contains(bucket)).collect()
}

pub async fn run(cli: Cli, config: Config) -> Result<RunOutput, CliError> {
    let params = cli.search_params();
    validate_search(&params)?;

    let directory = StaticAirportDirectory::new();
    let origin = airport_label(&directory, &params.origin).await?;
    let destination = airport_label(&directory, &params.destination).await?;

    let history = InMemoryHistoryRepository::new(config.history.max_entries);
    let entry = history
        .record(&params)
        .await
        .map_err(|e| CliError::Collaborator(e.to_string()))?;

    let provider = build_provider(&config);
    tracing::info!("Searching {} -> {} via {} provider", params.origin, params.destination, provider.name());

    let started = SessionEvent::SearchStarted {
        params: params.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    };
    tracing::info!(event = ?started, "Search started");

    let mut session = SearchSession::new(config.results.clone());
    let event = match provider.search(&params).await {
        Ok(flights) => session.replace(params.clone(), flights),
        Err(e) => session.fail(params.clone(), e.to_string()),
    };

    for action in filter_actions(&cli, session.filters()) {
        session.apply(action)?;
    }

    let mut picks = Vec::new();
    for id in &cli.compare {
        if !session.flights().iter().any(|flight| &flight.id == id) {
            tracing::warn!("Ignoring unknown flight id for comparison: {}", id);
            continue;
        }
        let outcome = session.toggle_compare(id);
        if outcome == ToggleOutcome::RejectedAtCapacity {
            tracing::warn!(
                "Comparison is full ({} flights), {} not added",
                session.comparison().capacity(),
                id
            );
        }
        picks.push(ComparePick { id: id.clone(), outcome });
    }

    let favorites = InMemoryFavoritesRepository::new();
    for id in &cli.star {
        match session.flights().iter().find(|flight| &flight.id == id) {
            Some(flight) => {
                favorites
                    .toggle(flight)
                    .await
                    .map_err(|e| CliError::Collaborator(e.to_string()))?;
            }
            None => tracing::warn!("Ignoring unknown flight id for favorites: {}", id),
        }
    }
    let starred: Vec<String> = favorites
        .list()
        .await
        .map_err(|e| CliError::Collaborator(e.to_string()))?
        .into_iter()
        .map(|flight| flight.id)
        .collect();

    let visible = session.visible();
    let stats = session.stats();
    let search_failed = session.last_error().is_some();

    let rendered = if cli.json {
        let report = Report {
            search: &params,
            history: &entry,
            event: &event,
            error: session.last_error(),
            filters: session.filters(),
            active_filters: session.active_filter_count(),
            stats,
            airlines: session.airline_facets(),
            stops: session.stop_counts(),
            departure_slots: session.time_slot_counts(),
            flights: visible.into_iter().take(cli.limit).collect(),
            compare: picks,
            comparison: session.comparison_rows(),
            favorites: starred,
        };
        serde_json::to_string_pretty(&report)?
    } else {
        let currency = session
            .flights()
            .first()
            .map(|flight| flight.price.currency.clone())
            .unwrap_or_else(|| config.provider.currency.clone());
        let starred: HashSet<String> = starred.into_iter().collect();

        let mut out = render::header(&params, &origin, &destination);
        if let Some(reason) = session.last_error() {
            out.push_str(&render::error_banner(reason));
        }
        out.push_str(&render::stats_line(&stats, &currency, session.active_filter_count()));
        out.push_str(&render::facets_block(
            &session.airline_facets(),
            &session.stop_counts(),
            &session.time_slot_counts(),
        ));
        out.push('\n');
        out.push_str(&render::flights_table(&visible, &starred, session.comparison(), cli.limit));
        out.push_str(&render::comparison_table(&session.comparison_rows()));
        out
    };

    Ok(RunOutput { rendered, search_failed })
}

async fn airport_label(directory: &StaticAirportDirectory, code: &str) -> Result<String, CliError> {
    let airport = directory
        .by_code(code)
        .await
        .map_err(|e| CliError::Collaborator(e.to_string()))?;
    Ok(match airport {
        Some(airport) => format!("{} ({})", airport.city, airport.code),
        None => code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use skyscan_results::{Selection, SortBy};

    fn cli(extra: &[&str]) -> Cli {
        let mut argv = vec!["skyscan", "LHR", "JFK", "--date", "2025-06-01"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_flags_means_no_actions() {
        assert!(filter_actions(&cli(&[]), &FilterState::default()).is_empty());
    }

    #[test]
    fn test_stop_flags_select_exactly_the_listed_buckets() {
        let state = filter_actions(&cli(&["--stops", "0,2+"]), &FilterState::default())
            .into_iter()
            .try_fold(FilterState::default(), |state, action| state.apply(action))
            .unwrap();

        assert_eq!(state.stops, Selection::only([StopsBucket::Nonstop, StopsBucket::TwoPlus]));
        assert!(state.time_slots.is_all());
    }

    #[test]
    fn test_listing_every_slot_keeps_facet_open() {
        let state = filter_actions(
            &cli(&["--slot", "early,morning,afternoon,evening"]),
            &FilterState::default(),
        )
        .into_iter()
        .try_fold(FilterState::default(), |state, action| state.apply(action))
        .unwrap();

        assert!(state.time_slots.is_all());
    }

    #[test]
    fn test_price_and_sort_flags() {
        let current = FilterState::default();
        let actions = filter_actions(&cli(&["--max-price", "300", "--sort", "departure", "--airline", "ba,BA"]), &current);

        assert_eq!(
            actions,
            vec![
                FilterAction::ToggleAirline("BA".to_string()),
                FilterAction::SetPriceRange { min: current.price_range.min, max: 300.0 },
                FilterAction::SetSortBy(SortBy::Departure),
            ]
        );
    }
}
