use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Stop-count buckets offered by the stops facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopsBucket {
    Nonstop,
    OneStop,
    TwoPlus,
}

impl StopsBucket {
    pub fn for_stops(stops: u32) -> Self {
        match stops {
            0 => StopsBucket::Nonstop,
            1 => StopsBucket::OneStop,
            _ => StopsBucket::TwoPlus,
        }
    }
}

impl fmt::Display for StopsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StopsBucket::Nonstop => "0",
            StopsBucket::OneStop => "1",
            StopsBucket::TwoPlus => "2+",
        };
        f.write_str(label)
    }
}

impl FromStr for StopsBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "nonstop" | "direct" => Ok(StopsBucket::Nonstop),
            "1" | "one" => Ok(StopsBucket::OneStop),
            "2+" | "2" | "many" => Ok(StopsBucket::TwoPlus),
            other => Err(format!("Unknown stops bucket '{}', expected 0, 1 or 2+", other)),
        }
    }
}

/// Departure time-of-day buckets, half-open `[start, end)` in local hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Early,
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn hours(&self) -> (u32, u32) {
        match self {
            TimeSlot::Early => (0, 6),
            TimeSlot::Morning => (6, 12),
            TimeSlot::Afternoon => (12, 18),
            TimeSlot::Evening => (18, 24),
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        let (start, end) = self.hours();
        start <= hour && hour < end
    }

    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeSlot::Early,
            6..=11 => TimeSlot::Morning,
            12..=17 => TimeSlot::Afternoon,
            _ => TimeSlot::Evening,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.hours();
        let name = match self {
            TimeSlot::Early => "early",
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        };
        write!(f, "{} ({:02}-{:02})", name, start, end)
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "early" => Ok(TimeSlot::Early),
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            other => Err(format!(
                "Unknown time slot '{}', expected early, morning, afternoon or evening",
                other
            )),
        }
    }
}

/// Closed facets have a fixed, known bucket universe
pub trait Bucket: Copy + Ord + fmt::Display + 'static {
    const ALL: &'static [Self];
    const FACET: &'static str;
}

impl Bucket for StopsBucket {
    const ALL: &'static [Self] = &[StopsBucket::Nonstop, StopsBucket::OneStop, StopsBucket::TwoPlus];
    const FACET: &'static str = "stops";
}

impl Bucket for TimeSlot {
    const ALL: &'static [Self] = &[
        TimeSlot::Early,
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];
    const FACET: &'static str = "departure time";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Price,
    Duration,
    Departure,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortBy::Price),
            "duration" => Ok(SortBy::Duration),
            "departure" => Ok(SortBy::Departure),
            other => Err(format!("Unknown sort key '{}'", other)),
        }
    }
}

/// Facet selection with an explicit unrestricted state.
///
/// `All` never filters. `Only` restricts to its members; an empty `Only`
/// means different things per facet and is handled by the facet itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "values", rename_all = "snake_case")]
pub enum Selection<T: Ord> {
    All,
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Ord> Selection<T> {
    pub fn only(items: impl IntoIterator<Item = T>) -> Self {
        Selection::Only(items.into_iter().collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn is_selected(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }
}

impl<T: Bucket> Selection<T> {
    /// Members as a concrete set, expanding `All` to the full universe
    pub fn members(&self) -> BTreeSet<T> {
        match self {
            Selection::All => T::ALL.iter().copied().collect(),
            Selection::Only(set) => set.clone(),
        }
    }

    fn toggled(&self, bucket: T) -> Result<Self, FilterError> {
        let mut set = self.members();
        if set.contains(&bucket) {
            if set.len() == 1 {
                return Err(FilterError::LastSelection {
                    facet: T::FACET,
                    value: bucket.to_string(),
                });
            }
            set.remove(&bucket);
        } else {
            set.insert(bucket);
        }

        if set.len() == T::ALL.len() {
            Ok(Selection::All)
        } else {
            Ok(Selection::Only(set))
        }
    }
}

impl Selection<String> {
    /// Airline toggling: an empty selection collapses back to `All`
    fn toggled_airline(&self, code: &str) -> Self {
        let mut set = match self {
            Selection::All => BTreeSet::new(),
            Selection::Only(set) => set.clone(),
        };
        if !set.remove(code) {
            set.insert(code.to_string());
        }
        if set.is_empty() {
            Selection::All
        } else {
            Selection::Only(set)
        }
    }
}

/// Inclusive price window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Used when there are no flights to derive bounds from
    pub const FALLBACK: PriceRange = PriceRange { min: 0.0, max: 2000.0 };

    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.min <= amount && amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::FALLBACK
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Cannot deselect the last {facet} option ({value})")]
    LastSelection { facet: &'static str, value: String },
    #[error("No {0} option selected")]
    EmptySelection(&'static str),
    #[error("Invalid price range: {0}")]
    InvalidPriceRange(String),
}

/// A single user edit to the filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum FilterAction {
    ToggleStops(StopsBucket),
    ToggleTimeSlot(TimeSlot),
    ToggleAirline(String),
    ClearAirlines,
    SetPriceRange { min: f64, max: f64 },
    SetSortBy(SortBy),
    /// Back to all-inclusive facets over the given bounds; sort order is kept
    Reset(PriceRange),
}

/// Filter and sort configuration for one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub stops: Selection<StopsBucket>,
    pub price_range: PriceRange,
    pub airlines: Selection<String>,
    pub time_slots: Selection<TimeSlot>,
    pub sort_by: SortBy,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(PriceRange::FALLBACK)
    }
}

impl FilterState {
    /// All-inclusive filters over the given price bounds
    pub fn new(bounds: PriceRange) -> Self {
        Self {
            stops: Selection::All,
            price_range: bounds,
            airlines: Selection::All,
            time_slots: Selection::All,
            sort_by: SortBy::default(),
        }
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Pure reducer: returns the next state, leaving `self` untouched
    pub fn apply(&self, action: FilterAction) -> Result<FilterState, FilterError> {
        let mut next = self.clone();
        match action {
            FilterAction::ToggleStops(bucket) => {
                next.stops = self.stops.toggled(bucket)?;
            }
            FilterAction::ToggleTimeSlot(slot) => {
                next.time_slots = self.time_slots.toggled(slot)?;
            }
            FilterAction::ToggleAirline(code) => {
                next.airlines = self.airlines.toggled_airline(&code);
            }
            FilterAction::ClearAirlines => {
                next.airlines = Selection::All;
            }
            FilterAction::SetPriceRange { min, max } => {
                if min.is_nan() || max.is_nan() {
                    return Err(FilterError::InvalidPriceRange("bounds must be numbers".to_string()));
                }
                next.price_range = PriceRange::new(min, max);
            }
            FilterAction::SetSortBy(sort_by) => {
                next.sort_by = sort_by;
            }
            FilterAction::Reset(bounds) => {
                next = FilterState::new(bounds).with_sort(self.sort_by);
            }
        }
        Ok(next)
    }

    /// Closed facets must keep at least one bucket selected
    pub fn validate(&self) -> Result<(), FilterError> {
        if matches!(&self.stops, Selection::Only(set) if set.is_empty()) {
            return Err(FilterError::EmptySelection(StopsBucket::FACET));
        }
        if matches!(&self.time_slots, Selection::Only(set) if set.is_empty()) {
            return Err(FilterError::EmptySelection(TimeSlot::FACET));
        }
        Ok(())
    }

    /// Number of facets currently restricting results, for the filter badge
    pub fn active_count(&self, bounds: &PriceRange) -> usize {
        let airlines_active = matches!(&self.airlines, Selection::Only(set) if !set.is_empty());
        [
            !self.stops.is_all(),
            airlines_active,
            !self.time_slots.is_all(),
            self.price_range.min > bounds.min || self.price_range.max < bounds.max,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}
