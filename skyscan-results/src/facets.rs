use crate::filters::{Bucket, FilterState, StopsBucket, TimeSlot};
use crate::pipeline::{filter_except, Dimension};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use skyscan_shared::Flight;
use std::collections::HashMap;

/// Which list the stops and time-slot counts are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetScope {
    /// Raw search results, ignoring every active filter
    #[default]
    Global,
    /// Flights matching every active filter other than the facet's own
    CrossFiltered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineFacet {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub count: usize,
}

/// One entry per carrier in the raw list, most flights first.
///
/// Carriers with equal counts keep the order they first appear in.
pub fn compute_airline_facets(flights: &[Flight]) -> Vec<AirlineFacet> {
    let mut facets: Vec<AirlineFacet> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for flight in flights {
        match index.get(flight.airline.code.as_str()) {
            Some(&i) => facets[i].count += 1,
            None => {
                index.insert(&flight.airline.code, facets.len());
                facets.push(AirlineFacet {
                    code: flight.airline.code.clone(),
                    name: flight.airline.name.clone(),
                    logo: flight.airline.logo.clone(),
                    count: 1,
                });
            }
        }
    }

    facets.sort_by(|a, b| b.count.cmp(&a.count));
    facets
}

fn count_buckets<'a, T: Bucket>(
    flights: impl IntoIterator<Item = &'a Flight>,
    bucket_of: impl Fn(&Flight) -> T,
) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = T::ALL.iter().map(|b| (*b, 0)).collect();
    for flight in flights {
        let bucket = bucket_of(flight);
        if let Some(entry) = counts.iter_mut().find(|(b, _)| *b == bucket) {
            entry.1 += 1;
        }
    }
    counts
}

/// Flights per stops bucket, every bucket present
pub fn compute_stop_counts<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> Vec<(StopsBucket, usize)> {
    count_buckets(flights, |f| StopsBucket::for_stops(f.stops))
}

/// Flights per departure slot, by local departure hour
pub fn compute_time_slot_counts<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> Vec<(TimeSlot, usize)> {
    count_buckets(flights, |f| TimeSlot::for_hour(f.departure.at.hour()))
}

pub fn stop_counts(flights: &[Flight], filters: &FilterState, scope: FacetScope) -> Vec<(StopsBucket, usize)> {
    match scope {
        FacetScope::Global => compute_stop_counts(flights),
        FacetScope::CrossFiltered => {
            compute_stop_counts(filter_except(flights, filters, Dimension::Stops))
        }
    }
}

pub fn time_slot_counts(flights: &[Flight], filters: &FilterState, scope: FacetScope) -> Vec<(TimeSlot, usize)> {
    match scope {
        FacetScope::Global => compute_time_slot_counts(flights),
        FacetScope::CrossFiltered => {
            compute_time_slot_counts(filter_except(flights, filters, Dimension::TimeSlot))
        }
    }
}
