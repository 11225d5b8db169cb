use crate::airports::{find_record, AirportRecord, AIRPORTS};
use crate::app_config::ProviderConfig;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyscan_core::search::validate_search;
use skyscan_core::{FlightProvider, ProviderError};
use skyscan_shared::{Airline, Endpoint, Flight, Price, SearchParams, Segment};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

struct Carrier {
    code: &'static str,
    name: &'static str,
    hubs: &'static [&'static str],
}

static CARRIERS: &[Carrier] = &[
    Carrier { code: "FR", name: "Ryanair", hubs: &["STN", "DUB", "BCN"] },
    Carrier { code: "LH", name: "Lufthansa", hubs: &["FRA", "MUC"] },
    Carrier { code: "BA", name: "British Airways", hubs: &["LHR"] },
    Carrier { code: "AF", name: "Air France", hubs: &["CDG"] },
    Carrier { code: "KL", name: "KLM", hubs: &["AMS"] },
    Carrier { code: "IB", name: "Iberia", hubs: &["MAD"] },
    Carrier { code: "TK", name: "Turkish Airlines", hubs: &["IST"] },
    Carrier { code: "EK", name: "Emirates", hubs: &["DXB"] },
    Carrier { code: "UA", name: "United Airlines", hubs: &["EWR", "ORD"] },
];

impl Carrier {
    fn airline(&self) -> Airline {
        Airline {
            code: self.code.to_string(),
            name: self.name.to_string(),
            logo: Some(format!("/logos/{}.svg", self.code.to_lowercase())),
        }
    }
}

/// Generates plausible offers for any pair of known airports.
///
/// Output is a deterministic function of the configured seed and the search
/// parameters, so repeated searches return the same list.
pub struct MockFlightProvider {
    seed: u64,
    offers_per_search: usize,
    currency: String,
    latency: std::time::Duration,
    failure: Option<ProviderError>,
}

impl MockFlightProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            seed: config.seed,
            offers_per_search: config.offers_per_search,
            currency: config.currency.clone(),
            latency: std::time::Duration::from_millis(config.latency_ms),
            failure: None,
        }
    }

    /// Make every search fail with `error`
    pub fn with_failure(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    fn rng_for(&self, params: &SearchParams) -> StdRng {
        let mut hasher = DefaultHasher::new();
        params.hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }

    /// Synchronous generation, the body of `search`
    pub fn generate(&self, params: &SearchParams) -> Result<Vec<Flight>, ProviderError> {
        let origin = find_record(&params.origin)
            .ok_or_else(|| ProviderError::InvalidRequest(format!("Unknown airport {}", params.origin)))?;
        let destination = find_record(&params.destination)
            .ok_or_else(|| ProviderError::InvalidRequest(format!("Unknown airport {}", params.destination)))?;

        if params.is_round_trip() {
            tracing::debug!("Mock provider returns outbound offers only for round trips");
        }

        let mut rng = self.rng_for(params);
        let mut flights = Vec::with_capacity(self.offers_per_search);
        for index in 0..self.offers_per_search {
            flights.push(self.build_offer(&mut rng, index, origin, destination, params)?);
        }
        Ok(flights)
    }

    fn pick_route(
        &self,
        rng: &mut StdRng,
        carrier: &Carrier,
        origin: &'static AirportRecord,
        destination: &'static AirportRecord,
        stops: u32,
    ) -> Vec<&'static AirportRecord> {
        let mut route = vec![origin];
        for _ in 0..stops {
            let used = |code: &str| code == destination.code || route.iter().any(|r| r.code == code);
            let hub = carrier
                .hubs
                .iter()
                .filter(|code| !used(**code))
                .find_map(|code| find_record(code));
            let next = match hub {
                Some(record) => record,
                None => {
                    let candidates: Vec<&'static AirportRecord> =
                        AIRPORTS.iter().filter(|a| !used(a.code)).collect();
                    candidates[rng.gen_range(0..candidates.len())]
                }
            };
            route.push(next);
        }
        route.push(destination);
        route
    }

    fn build_offer(
        &self,
        rng: &mut StdRng,
        index: usize,
        origin: &'static AirportRecord,
        destination: &'static AirportRecord,
        params: &SearchParams,
    ) -> Result<Flight, ProviderError> {
        let carrier = &CARRIERS[rng.gen_range(0..CARRIERS.len())];
        let stops = match rng.gen_range(0..100) {
            0..=49 => 0,
            50..=84 => 1,
            _ => 2,
        };
        let route = self.pick_route(rng, carrier, origin, destination, stops);

        let local_time = NaiveTime::from_hms_opt(rng.gen_range(5..=22), [0, 15, 30, 45][rng.gen_range(0..4)], 0)
            .ok_or_else(|| ProviderError::InvalidResponse("generated an invalid time".to_string()))?;
        let mut at: DateTime<FixedOffset> = origin
            .offset()
            .from_local_datetime(&params.departure_date.and_time(local_time))
            .single()
            .ok_or_else(|| ProviderError::InvalidResponse("ambiguous local departure".to_string()))?;

        let mut segments = Vec::with_capacity(route.len() - 1);
        for (leg, pair) in route.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let minutes = rng.gen_range(55..=300);
            let arrival = (at + Duration::minutes(minutes)).with_timezone(&to.offset());
            segments.push(Segment {
                departure: Endpoint { airport: from.to_airport(), at },
                arrival: Endpoint { airport: to.to_airport(), at: arrival },
                duration_minutes: minutes,
                flight_number: format!("{}{}", carrier.code, rng.gen_range(100..9999) + leg),
                airline: carrier.airline(),
            });
            at = arrival + Duration::minutes(rng.gen_range(45..=150));
        }

        let departure = segments[0].departure.clone();
        let arrival = segments[segments.len() - 1].arrival.clone();
        let duration_minutes = (arrival.at - departure.at).num_minutes();

        let per_passenger = (29.0 + duration_minutes as f64 * rng.gen_range(0.35..0.9)
            - stops as f64 * 15.0)
            .max(19.0);
        let amount = (per_passenger * params.passengers as f64 * 100.0).round() / 100.0;

        let seats_remaining = if rng.gen_bool(0.4) { Some(rng.gen_range(1..=9)) } else { None };

        Ok(Flight {
            id: format!("{}-{}-{:03}", carrier.code, params.departure_date.format("%Y%m%d"), index),
            airline: carrier.airline(),
            departure,
            arrival,
            duration_minutes,
            stops,
            price: Price { amount, currency: self.currency.clone() },
            seats_remaining,
            segments,
        })
    }
}

#[async_trait]
impl FlightProvider for MockFlightProvider {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Flight>, ProviderError> {
        if let Some(error) = &self.failure {
            tracing::warn!("Mock provider configured to fail: {}", error);
            return Err(error.clone());
        }
        validate_search(params).map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let flights = self.generate(params)?;
        tracing::info!(
            "Mock provider generated {} offers for {} -> {}",
            flights.len(),
            params.origin,
            params.destination
        );
        Ok(flights)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
