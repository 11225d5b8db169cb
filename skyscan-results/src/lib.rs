//! Result derivation for flight searches: filtering, sorting, statistics,
//! facet counts and the comparison tray.
//!
//! Every derived view is a pure function of the raw flight list and the
//! current [`FilterState`]; [`SearchSession`] owns both and recomputes on read.

pub mod comparison;
pub mod facets;
pub mod filters;
pub mod pipeline;
pub mod session;
pub mod stats;

#[cfg(test)]
mod fixtures;

pub use comparison::{compare, ComparisonRow, ComparisonSet, ToggleOutcome};
pub use facets::{AirlineFacet, FacetScope};
pub use filters::{FilterAction, FilterError, FilterState, PriceRange, Selection, SortBy, StopsBucket, TimeSlot};
pub use pipeline::derive_visible;
pub use session::{ResultsConfig, SearchSession};
pub use stats::{compute_price_bounds, compute_stats, ResultStats};
