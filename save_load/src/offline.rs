/// Minimum time away before catch-up earnings are computed at all.
pub const MIN_OFFLINE_SECONDS: f64 = 60.0;
/// The catch-up window never exceeds this many hours.
pub const MAX_OFFLINE_HOURS: f64 = 24.0;

/// Earnings for `elapsed_seconds` of absence at `rate` per second, capped
/// at `max_hours` worth of production. Negative elapsed time (clock skew)
/// earns nothing.
pub fn calculate_offline_earnings(rate: f64, elapsed_seconds: f64, max_hours: f64) -> f64 {
    if rate <= 0.0 || !rate.is_finite() {
        return 0.0;
    }
    let elapsed = elapsed_seconds.max(0.0).min(max_hours * 3600.0);
    (rate * elapsed).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earnings_scale_with_elapsed_time() {
        assert_eq!(calculate_offline_earnings(10.0, 120.0, MAX_OFFLINE_HOURS), 1_200.0);
    }

    #[test]
    fn test_earnings_capped_at_window() {
        // 48 hours away, 24 hour cap.
        let earnings = calculate_offline_earnings(10.0, 48.0 * 3600.0, MAX_OFFLINE_HOURS);
        assert_eq!(earnings, 10.0 * 24.0 * 3600.0);
    }

    #[test]
    fn test_negative_elapsed_earns_nothing() {
        assert_eq!(calculate_offline_earnings(10.0, -5.0, MAX_OFFLINE_HOURS), 0.0);
    }

    #[test]
    fn test_zero_rate_earns_nothing() {
        assert_eq!(calculate_offline_earnings(0.0, 10_000.0, MAX_OFFLINE_HOURS), 0.0);
    }
}
