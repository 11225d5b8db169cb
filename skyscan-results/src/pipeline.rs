use crate::filters::{FilterState, Selection, SortBy, StopsBucket};
use chrono::Timelike;
use skyscan_shared::Flight;

/// Independent filter dimensions, used to exclude one facet when cross-filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Stops,
    Price,
    Airline,
    TimeSlot,
}

fn matches_stops(flight: &Flight, filters: &FilterState) -> bool {
    // an empty Only matches nothing; FilterState::validate reports it
    filters.stops.is_selected(&StopsBucket::for_stops(flight.stops))
}

fn matches_airline(flight: &Flight, filters: &FilterState) -> bool {
    match &filters.airlines {
        Selection::All => true,
        Selection::Only(codes) => codes.is_empty() || codes.contains(&flight.airline.code),
    }
}

fn matches_time_slot(flight: &Flight, filters: &FilterState) -> bool {
    match &filters.time_slots {
        Selection::All => true,
        Selection::Only(slots) => {
            let hour = flight.departure.at.hour();
            slots.iter().any(|slot| slot.contains_hour(hour))
        }
    }
}

/// Conjunction of every dimension except `skip`
pub fn matches_except(flight: &Flight, filters: &FilterState, skip: Option<Dimension>) -> bool {
    let check = |dimension: Dimension| Some(dimension) == skip || match dimension {
        Dimension::Stops => matches_stops(flight, filters),
        Dimension::Price => filters.price_range.contains(flight.price.amount),
        Dimension::Airline => matches_airline(flight, filters),
        Dimension::TimeSlot => matches_time_slot(flight, filters),
    };

    check(Dimension::Stops)
        && check(Dimension::Price)
        && check(Dimension::Airline)
        && check(Dimension::TimeSlot)
}

pub fn matches(flight: &Flight, filters: &FilterState) -> bool {
    matches_except(flight, filters, None)
}

/// Flights passing every active filter except `skip`, in input order
pub fn filter_except<'a>(flights: &'a [Flight], filters: &FilterState, skip: Dimension) -> Vec<&'a Flight> {
    flights
        .iter()
        .filter(|flight| matches_except(flight, filters, Some(skip)))
        .collect()
}

/// Stable sort on a single key; equal keys keep provider order
pub fn sort_flights(flights: &mut [Flight], sort_by: SortBy) {
    match sort_by {
        SortBy::Price => flights.sort_by(|a, b| a.price.amount.total_cmp(&b.price.amount)),
        SortBy::Duration => flights.sort_by_key(|f| f.duration_minutes),
        SortBy::Departure => flights.sort_by_key(|f| f.departure.at),
    }
}

/// The visible, ordered result list for the current filters.
///
/// Never mutates `flights` and never fails: an empty input or a filter
/// set that excludes everything yields an empty list.
pub fn derive_visible(flights: &[Flight], filters: &FilterState) -> Vec<Flight> {
    if let Err(err) = filters.validate() {
        tracing::warn!("Filter state is inconsistent, affected facet matches nothing: {}", err);
    }

    let mut visible: Vec<Flight> = flights
        .iter()
        .filter(|flight| matches(flight, filters))
        .cloned()
        .collect();
    sort_flights(&mut visible, filters.sort_by);

    tracing::debug!(
        "Derived {} visible of {} flights (sort: {:?})",
        visible.len(),
        flights.len(),
        filters.sort_by
    );
    visible
}
