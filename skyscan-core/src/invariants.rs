use skyscan_shared::Flight;

/// Structural problems found in a provider supplied flight
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlightInvariant {
    #[error("Flight {0} has no segments")]
    NoSegments(String),
    #[error("Flight {id} reports {stops} stops but has {segments} segments")]
    StopsMismatch { id: String, stops: u32, segments: usize },
    #[error("Flight {id} reports {reported} minutes but departure to arrival is {actual}")]
    DurationMismatch { id: String, reported: i64, actual: i64 },
    #[error("Flight {id} segment {index} departs from {found}, expected {expected}")]
    BrokenChain { id: String, index: usize, expected: String, found: String },
    #[error("Flight {id} segment {index} departs before the previous segment arrives")]
    OutOfOrder { id: String, index: usize },
}

/// Check the shape invariants of a single offer.
///
/// Reports the first violation found; callers decide whether to keep the flight.
pub fn check_flight(flight: &Flight) -> Result<(), FlightInvariant> {
    let id = flight.id.clone();

    if flight.segments.is_empty() {
        return Err(FlightInvariant::NoSegments(id));
    }
    if flight.stops as usize != flight.segments.len() - 1 {
        return Err(FlightInvariant::StopsMismatch {
            id,
            stops: flight.stops,
            segments: flight.segments.len(),
        });
    }

    let actual = (flight.arrival.at - flight.departure.at).num_minutes();
    if actual != flight.duration_minutes {
        return Err(FlightInvariant::DurationMismatch {
            id,
            reported: flight.duration_minutes,
            actual,
        });
    }

    for (index, pair) in flight.segments.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.arrival.airport.code != next.departure.airport.code {
            return Err(FlightInvariant::BrokenChain {
                id,
                index: index + 1,
                expected: prev.arrival.airport.code.clone(),
                found: next.departure.airport.code.clone(),
            });
        }
        if next.departure.at < prev.arrival.at {
            return Err(FlightInvariant::OutOfOrder { id, index: index + 1 });
        }
    }

    Ok(())
}
