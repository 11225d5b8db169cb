use crate::{CoreError, CoreResult};
use skyscan_shared::SearchParams;

pub const MAX_PASSENGERS: u32 = 9;

fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Validate user supplied search parameters before they reach a provider
pub fn validate_search(params: &SearchParams) -> CoreResult<()> {
    if !is_iata_code(&params.origin) {
        return Err(CoreError::ValidationError(format!(
            "Origin '{}' is not a 3-letter IATA code",
            params.origin
        )));
    }
    if !is_iata_code(&params.destination) {
        return Err(CoreError::ValidationError(format!(
            "Destination '{}' is not a 3-letter IATA code",
            params.destination
        )));
    }
    if params.origin == params.destination {
        return Err(CoreError::ValidationError(
            "Origin and destination must differ".to_string(),
        ));
    }
    if params.passengers == 0 || params.passengers > MAX_PASSENGERS {
        return Err(CoreError::ValidationError(format!(
            "Passenger count must be between 1 and {}, got {}",
            MAX_PASSENGERS, params.passengers
        )));
    }
    if let Some(return_date) = params.return_date {
        if return_date < params.departure_date {
            return Err(CoreError::ValidationError(format!(
                "Return date {} is before departure date {}",
                return_date, params.departure_date
            )));
        }
    }

    tracing::debug!(
        "Search params valid: {} -> {} on {}",
        params.origin,
        params.destination,
        params.departure_date
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params() -> SearchParams {
        SearchParams::one_way("LHR", "JFK", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn test_valid_one_way() {
        assert!(validate_search(&params()).is_ok());
    }

    #[test]
    fn test_rejects_same_airports() {
        let mut p = params();
        p.destination = "LHR".to_string();
        assert!(matches!(validate_search(&p), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_bad_codes() {
        let mut p = params();
        p.origin = "London".to_string();
        assert!(validate_search(&p).is_err());

        let mut p = params();
        p.destination = "jfk".to_string();
        assert!(validate_search(&p).is_err());
    }

    #[test]
    fn test_passenger_bounds() {
        let mut p = params();
        p.passengers = 0;
        assert!(validate_search(&p).is_err());
        p.passengers = MAX_PASSENGERS;
        assert!(validate_search(&p).is_ok());
        p.passengers = MAX_PASSENGERS + 1;
        assert!(validate_search(&p).is_err());
    }

    #[test]
    fn test_return_before_departure() {
        let mut p = params();
        p.return_date = NaiveDate::from_ymd_opt(2025, 5, 31);
        let err = validate_search(&p).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Return date 2025-05-31 is before departure date 2025-06-01"
        );

        p.return_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(validate_search(&p).is_ok());
    }
}
