//! Flight builders shared by unit tests.

use chrono::{DateTime, Duration};
use skyscan_shared::{Airline, Airport, Endpoint, Flight, Price, Segment};

pub fn airline(code: &str) -> Airline {
    let name = match code {
        "FR" => "Ryanair",
        "LH" => "Lufthansa",
        "BA" => "British Airways",
        "AF" => "Air France",
        other => other,
    };
    Airline { code: code.to_string(), name: name.to_string(), logo: None }
}

fn airport(code: &str) -> Airport {
    Airport {
        code: code.to_string(),
        city: code.to_string(),
        name: format!("{} International", code),
        country: "XX".to_string(),
    }
}

/// A well-formed flight departing on 2025-06-01 at `hour` local time (+02:00).
///
/// Each leg is 60 minutes with a 30 minute connection.
pub fn flight(id: &str, carrier: &str, price: f64, stops: u32, hour: u32) -> Flight {
    let start = DateTime::parse_from_rfc3339(&format!("2025-06-01T{:02}:00:00+02:00", hour))
        .expect("valid fixture timestamp");

    let mut segments = Vec::new();
    let mut at = start;
    for leg in 0..=stops {
        let from = if leg == 0 { "ORG".to_string() } else { format!("HB{}", leg - 1) };
        let to = if leg == stops { "DST".to_string() } else { format!("HB{}", leg) };
        let arrive = at + Duration::minutes(60);
        segments.push(Segment {
            departure: Endpoint { airport: airport(&from), at },
            arrival: Endpoint { airport: airport(&to), at: arrive },
            duration_minutes: 60,
            flight_number: format!("{}{}", carrier, 100 + leg),
            airline: airline(carrier),
        });
        at = arrive + Duration::minutes(30);
    }

    let departure = segments[0].departure.clone();
    let arrival = segments[segments.len() - 1].arrival.clone();
    Flight {
        id: id.to_string(),
        airline: airline(carrier),
        duration_minutes: (arrival.at - departure.at).num_minutes(),
        departure,
        arrival,
        stops,
        price: Price { amount: price, currency: "EUR".to_string() },
        seats_remaining: None,
        segments,
    }
}
