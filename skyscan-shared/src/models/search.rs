use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the user asked for. Immutable once a search is issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

fn default_passengers() -> u32 { 1 }

impl SearchParams {
    pub fn one_way(origin: &str, destination: &str, departure_date: NaiveDate) -> Self {
        Self {
            origin: origin.to_uppercase(),
            destination: destination.to_uppercase(),
            departure_date,
            return_date: None,
            passengers: 1,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}
