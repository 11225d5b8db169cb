use async_trait::async_trait;
use chrono::{FixedOffset, Offset, Utc};
use skyscan_core::AirportDirectory;
use skyscan_shared::Airport;

/// Built-in airport record with the standard-time UTC offset used for schedules
#[derive(Debug, Clone, Copy)]
pub struct AirportRecord {
    pub code: &'static str,
    pub city: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub utc_offset_minutes: i32,
}

impl AirportRecord {
    pub fn to_airport(&self) -> Airport {
        Airport {
            code: self.code.to_string(),
            city: self.city.to_string(),
            name: self.name.to_string(),
            country: self.country.to_string(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

pub static AIRPORTS: &[AirportRecord] = &[
    AirportRecord { code: "LHR", city: "London", name: "Heathrow", country: "GB", utc_offset_minutes: 0 },
    AirportRecord { code: "LGW", city: "London", name: "Gatwick", country: "GB", utc_offset_minutes: 0 },
    AirportRecord { code: "STN", city: "London", name: "Stansted", country: "GB", utc_offset_minutes: 0 },
    AirportRecord { code: "DUB", city: "Dublin", name: "Dublin", country: "IE", utc_offset_minutes: 0 },
    AirportRecord { code: "CDG", city: "Paris", name: "Charles de Gaulle", country: "FR", utc_offset_minutes: 60 },
    AirportRecord { code: "ORY", city: "Paris", name: "Orly", country: "FR", utc_offset_minutes: 60 },
    AirportRecord { code: "FRA", city: "Frankfurt", name: "Frankfurt am Main", country: "DE", utc_offset_minutes: 60 },
    AirportRecord { code: "MUC", city: "Munich", name: "Franz Josef Strauss", country: "DE", utc_offset_minutes: 60 },
    AirportRecord { code: "AMS", city: "Amsterdam", name: "Schiphol", country: "NL", utc_offset_minutes: 60 },
    AirportRecord { code: "MAD", city: "Madrid", name: "Adolfo Suarez Madrid-Barajas", country: "ES", utc_offset_minutes: 60 },
    AirportRecord { code: "BCN", city: "Barcelona", name: "El Prat", country: "ES", utc_offset_minutes: 60 },
    AirportRecord { code: "FCO", city: "Rome", name: "Fiumicino", country: "IT", utc_offset_minutes: 60 },
    AirportRecord { code: "ZRH", city: "Zurich", name: "Zurich", country: "CH", utc_offset_minutes: 60 },
    AirportRecord { code: "IST", city: "Istanbul", name: "Istanbul", country: "TR", utc_offset_minutes: 180 },
    AirportRecord { code: "DXB", city: "Dubai", name: "Dubai International", country: "AE", utc_offset_minutes: 240 },
    AirportRecord { code: "JFK", city: "New York", name: "John F. Kennedy", country: "US", utc_offset_minutes: -300 },
    AirportRecord { code: "EWR", city: "Newark", name: "Newark Liberty", country: "US", utc_offset_minutes: -300 },
    AirportRecord { code: "ORD", city: "Chicago", name: "O'Hare", country: "US", utc_offset_minutes: -360 },
    AirportRecord { code: "LAX", city: "Los Angeles", name: "Los Angeles International", country: "US", utc_offset_minutes: -480 },
    AirportRecord { code: "SIN", city: "Singapore", name: "Changi", country: "SG", utc_offset_minutes: 480 },
    AirportRecord { code: "HND", city: "Tokyo", name: "Haneda", country: "JP", utc_offset_minutes: 540 },
];

pub fn find_record(code: &str) -> Option<&'static AirportRecord> {
    AIRPORTS.iter().find(|a| a.code.eq_ignore_ascii_case(code))
}

/// Airport lookup over the built-in table
#[derive(Debug, Clone, Default)]
pub struct StaticAirportDirectory;

impl StaticAirportDirectory {
    pub fn new() -> Self {
        Self
    }

    fn rank(record: &AirportRecord, query: &str) -> Option<u8> {
        let starts = |field: &str| field.to_lowercase().starts_with(query);
        if record.code.eq_ignore_ascii_case(query) {
            Some(0)
        } else if starts(record.code) {
            Some(1)
        } else if starts(record.city) {
            Some(2)
        } else if starts(record.name) {
            Some(3)
        } else {
            None
        }
    }
}

#[async_trait]
impl AirportDirectory for StaticAirportDirectory {
    async fn search(
        &self,
        query: &str,
        exclude_code: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Airport>, Box<dyn std::error::Error + Send + Sync>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<(u8, &AirportRecord)> = AIRPORTS
            .iter()
            .filter(|a| exclude_code.map_or(true, |ex| !a.code.eq_ignore_ascii_case(ex)))
            .filter_map(|a| Self::rank(a, &query).map(|rank| (rank, a)))
            .collect();
        matches.sort_by_key(|(rank, _)| *rank);

        Ok(matches.into_iter().take(limit).map(|(_, a)| a.to_airport()).collect())
    }

    async fn by_code(
        &self,
        code: &str,
    ) -> Result<Option<Airport>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(find_record(code).map(AirportRecord::to_airport))
    }
}
