/// Profiles with fewer reports than this carry no relative value.
pub const SMALL_PROFILE_THRESHOLD: u64 = 3;
/// Relative value assigned to the profile average.
pub const RV_AT_AVERAGE: f64 = 90.0;
/// Distance between the average and the high on the RV scale.
pub const RV_SPAN: f64 = 10.0;
/// Lowest relative value a report can receive.
pub const RV_FLOOR: f64 = 80.0;
/// High and average closer than this are treated as equal.
pub const SPREAD_TOLERANCE: f64 = 0.0001;

/// Relative value of a report against a profile's high and one average bound.
///
/// Linear in `report_average`, anchored at 90 for the average and 100 for the
/// high, floored at 80. There is no ceiling: a report above `high` scores
/// above 100.
pub fn compute_rv(report_average: f64, count: u64, high: f64, average_bound: f64) -> f64 {
    if count < SMALL_PROFILE_THRESHOLD {
        return 0.0;
    }

    let spread = high - average_bound;
    if spread.abs() < SPREAD_TOLERANCE {
        return RV_AT_AVERAGE;
    }

    let value = RV_AT_AVERAGE + RV_SPAN * (report_average - average_bound) / spread;
    value.max(RV_FLOOR)
}
