use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating or marketing carrier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airline {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub code: String, // IATA
    pub city: String,
    pub name: String,
    pub country: String,
}

/// One end of a flight or segment: where and when
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Endpoint {
    pub airport: Airport,
    pub at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub amount: f64,
    pub currency: String, // ISO 4217
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration_minutes: i64,
    pub flight_number: String,
    pub airline: Airline,
}

/// A priced flight offer as returned by a provider.
///
/// Offers are immutable once received; every derived view (filtered list,
/// stats, facets) is recomputed from the raw list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: String,
    pub airline: Airline,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration_minutes: i64,
    pub stops: u32,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats_remaining: Option<u32>,
    pub segments: Vec<Segment>,
}

impl Flight {
    pub fn origin(&self) -> &Airport {
        &self.departure.airport
    }

    pub fn destination(&self) -> &Airport {
        &self.arrival.airport
    }

    pub fn departure_time(&self) -> DateTime<FixedOffset> {
        self.departure.at
    }

    /// Human readable duration, e.g. `2h 05m`
    pub fn duration_label(&self) -> String {
        format!("{}h {:02}m", self.duration_minutes / 60, self.duration_minutes % 60)
    }
}
