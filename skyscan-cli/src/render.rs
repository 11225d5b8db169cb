use skyscan_results::{AirlineFacet, ComparisonRow, ComparisonSet, ResultStats, StopsBucket, TimeSlot};
use skyscan_shared::{Flight, SearchParams};
use std::collections::HashSet;

pub fn header(params: &SearchParams, origin: &str, destination: &str) -> String {
    let trip = match params.return_date {
        Some(back) => format!("{} / {}", params.departure_date, back),
        None => params.departure_date.to_string(),
    };
    let travellers = if params.passengers == 1 { "passenger" } else { "passengers" };
    format!("{} -> {}  {}  {} {}\n", origin, destination, trip, params.passengers, travellers)
}

pub fn error_banner(reason: &str) -> String {
    format!("!! Search failed: {}\n", reason)
}

pub fn stats_line(stats: &ResultStats, currency: &str, active_filters: usize) -> String {
    let filters = match active_filters {
        0 => String::new(),
        1 => "  (1 filter active)".to_string(),
        n => format!("  ({} filters active)", n),
    };

    if stats.visible_count == 0 {
        return format!("0 of {} flights, prices: no data{}\n", stats.total_count, filters);
    }

    format!(
        "{} of {} flights, {:.2}-{:.2} {} (avg {:.2}){}\n",
        stats.visible_count,
        stats.total_count,
        stats.min_price,
        stats.max_price,
        currency,
        stats.avg_price,
        filters
    )
}

/// One row per flight; `*` marks favorites and `=` marks comparison picks
pub fn flights_table(
    flights: &[Flight],
    favorites: &HashSet<String>,
    compared: &ComparisonSet,
    limit: usize,
) -> String {
    if flights.is_empty() {
        return "No flights match the current filters.\n".to_string();
    }

    let mut out = format!(
        "   {:<16} {:<4} {:>5} {:>5} {:>8} {:>5} {:>12}\n",
        "ID", "AIR", "DEP", "ARR", "TIME", "STOPS", "PRICE"
    );
    for flight in flights.iter().take(limit) {
        let marks = format!(
            "{}{}",
            if favorites.contains(&flight.id) { '*' } else { ' ' },
            if compared.contains(&flight.id) { '=' } else { ' ' },
        );
        out.push_str(&format!(
            "{} {:<16} {:<4} {:>5} {:>5} {:>8} {:>5} {:>12}\n",
            marks,
            flight.id,
            flight.airline.code,
            flight.departure.at.format("%H:%M"),
            flight.arrival.at.format("%H:%M"),
            flight.duration_label(),
            flight.stops,
            flight.price.to_string(),
        ));
    }
    if flights.len() > limit {
        out.push_str(&format!("   ... {} more\n", flights.len() - limit));
    }
    out
}

pub fn facets_block(
    airlines: &[AirlineFacet],
    stops: &[(StopsBucket, usize)],
    slots: &[(TimeSlot, usize)],
) -> String {
    let airlines = airlines
        .iter()
        .map(|facet| format!("{} {}", facet.code, facet.count))
        .collect::<Vec<_>>()
        .join(", ");
    let stops = stops
        .iter()
        .map(|(bucket, count)| format!("{} {}", bucket, count))
        .collect::<Vec<_>>()
        .join(", ");
    let slots = slots
        .iter()
        .map(|(slot, count)| format!("{} {}", slot, count))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Airlines: {}\nStops: {}\nDeparture: {}\n", airlines, stops, slots)
}

pub fn comparison_table(rows: &[ComparisonRow<'_>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::from("Compare:\n");
    for row in rows {
        let mut badges = Vec::new();
        if row.best_price {
            badges.push("best price");
        }
        if row.best_duration {
            badges.push("fastest");
        }
        out.push_str(&format!(
            "  {:<16} {:>12} {:>8}  {}\n",
            row.flight.id,
            row.flight.price.to_string(),
            row.flight.duration_label(),
            badges.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skyscan_results::compare;
    use skyscan_shared::{Airline, Airport, Endpoint, Price};

    fn flight(id: &str, amount: f64, duration_minutes: i64) -> Flight {
        let airport = |code: &str| Airport {
            code: code.to_string(),
            city: code.to_string(),
            name: code.to_string(),
            country: "XX".to_string(),
        };
        let at = chrono::DateTime::parse_from_rfc3339("2025-06-01T08:15:00+01:00").unwrap();
        Flight {
            id: id.to_string(),
            airline: Airline { code: "BA".to_string(), name: "British Airways".to_string(), logo: None },
            departure: Endpoint { airport: airport("LHR"), at },
            arrival: Endpoint {
                airport: airport("JFK"),
                at: at + chrono::Duration::minutes(duration_minutes),
            },
            duration_minutes,
            stops: 0,
            price: Price { amount, currency: "EUR".to_string() },
            seats_remaining: None,
            segments: Vec::new(),
        }
    }

    #[test]
    fn test_stats_line_without_visible_flights_says_no_data() {
        let stats = ResultStats { total_count: 12, ..ResultStats::default() };
        assert_eq!(stats_line(&stats, "EUR", 2), "0 of 12 flights, prices: no data  (2 filters active)\n");
    }

    #[test]
    fn test_stats_line_with_prices() {
        let stats = ResultStats {
            min_price: 40.0,
            max_price: 100.0,
            avg_price: 60.0,
            total_count: 5,
            visible_count: 3,
        };
        assert_eq!(stats_line(&stats, "EUR", 0), "3 of 5 flights, 40.00-100.00 EUR (avg 60.00)\n");
    }

    #[test]
    fn test_flights_table_marks_and_truncates() {
        let flights = vec![flight("BA-1", 100.0, 60), flight("BA-2", 90.0, 75), flight("BA-3", 80.0, 90)];
        let favorites: HashSet<String> = ["BA-2".to_string()].into_iter().collect();
        let mut compared = ComparisonSet::new();
        compared.toggle("BA-1");

        let table = flights_table(&flights, &favorites, &compared, 2);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with(" = BA-1"));
        assert!(lines[2].starts_with("*  BA-2"));
        assert!(lines[1].contains("08:15"));
        assert_eq!(lines[3].trim(), "... 1 more");
    }

    #[test]
    fn test_empty_table_message() {
        let table = flights_table(&[], &HashSet::new(), &ComparisonSet::new(), 10);
        assert_eq!(table, "No flights match the current filters.\n");
    }

    #[test]
    fn test_comparison_table_badges() {
        let cheap = flight("A", 50.0, 300);
        let fast = flight("B", 80.0, 120);
        let rows = compare(&[&cheap, &fast]);
        let out = comparison_table(&rows);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].ends_with("best price"));
        assert!(lines[2].ends_with("fastest"));
    }

    #[test]
    fn test_header_round_trip_and_passengers() {
        let mut params = SearchParams::one_way("LHR", "JFK", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        params.return_date = NaiveDate::from_ymd_opt(2025, 6, 8);
        params.passengers = 2;
        assert_eq!(
            header(&params, "London (LHR)", "New York (JFK)"),
            "London (LHR) -> New York (JFK)  2025-06-01 / 2025-06-08  2 passengers\n"
        );
    }
}
