use crate::filters::PriceRange;
use serde::{Deserialize, Serialize};
use skyscan_shared::Flight;

/// Summary figures shown above the result list.
///
/// Zeroes mean "no data" when `visible_count` is 0, not a real zero fare.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultStats {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub total_count: usize,
    pub visible_count: usize,
}

/// Stats over the post-filter list; `total_count` is the raw list size
pub fn compute_stats(total_count: usize, visible: &[Flight]) -> ResultStats {
    if visible.is_empty() {
        return ResultStats { total_count, ..ResultStats::default() };
    }

    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for flight in visible {
        let amount = flight.price.amount;
        min_price = min_price.min(amount);
        max_price = max_price.max(amount);
        sum += amount;
    }

    ResultStats {
        min_price,
        max_price,
        avg_price: (sum / visible.len() as f64).round(),
        total_count,
        visible_count: visible.len(),
    }
}

/// Price extent of the raw list, if there is one
pub fn observed_price_range(flights: &[Flight]) -> Option<PriceRange> {
    let mut amounts = flights.iter().map(|f| f.price.amount);
    let first = amounts.next()?;
    let (min, max) = amounts.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)));
    Some(PriceRange::new(min, max))
}

/// Bounds used to initialise the price slider; `[0, 2000]` for an empty list
pub fn compute_price_bounds(flights: &[Flight]) -> PriceRange {
    observed_price_range(flights).unwrap_or(PriceRange::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::flight;

    #[test]
    fn test_stats_over_three_flights() {
        let flights = vec![
            flight("a", "FR", 40.0, 0, 8),
            flight("b", "FR", 40.0, 0, 9),
            flight("c", "LH", 100.0, 1, 10),
        ];
        let stats = compute_stats(5, &flights);
        assert_eq!(stats.min_price, 40.0);
        assert_eq!(stats.max_price, 100.0);
        assert_eq!(stats.avg_price, 60.0);
        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.visible_count, 3);
    }

    #[test]
    fn test_average_rounds_to_nearest_integer() {
        let flights = vec![flight("a", "FR", 10.0, 0, 8), flight("b", "FR", 11.0, 0, 9)];
        assert_eq!(compute_stats(2, &flights).avg_price, 11.0);

        let flights = vec![flight("a", "FR", 10.0, 0, 8), flight("b", "FR", 10.4, 0, 9)];
        assert_eq!(compute_stats(2, &flights).avg_price, 10.0);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        assert_eq!(compute_stats(0, &[]), ResultStats::default());

        let stats = compute_stats(7, &[]);
        assert_eq!(stats.min_price, 0.0);
        assert_eq!(stats.avg_price, 0.0);
        assert_eq!(stats.visible_count, 0);
        assert_eq!(stats.total_count, 7);
    }

    #[test]
    fn test_price_bounds() {
        let flights = vec![
            flight("a", "FR", 125.0, 0, 8),
            flight("b", "FR", 35.0, 0, 9),
            flight("c", "LH", 99.5, 1, 10),
        ];
        assert_eq!(compute_price_bounds(&flights), PriceRange::new(35.0, 125.0));
        assert_eq!(compute_price_bounds(&[]), PriceRange::new(0.0, 2000.0));
        assert_eq!(observed_price_range(&[]), None);
    }
}
