//! Day-of-week activity profile.

use crate::types::ActivityDay;

/// Sentinel used when a pattern cannot be determined from the data.
pub const UNKNOWN: &str = "Unknown";

/// Get day name from index (0 = Sunday).
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => UNKNOWN,
    }
}

/// Sum of counts per weekday, index 0 = Sunday.
///
/// Entries with a weekday outside 0-6 are skipped.
pub fn weekday_totals(days: &[ActivityDay]) -> [u64; 7] {
    let mut totals = [0u64; 7];
    for day in days {
        if let Some(slot) = totals.get_mut(day.weekday as usize) {
            *slot += u64::from(day.count);
        }
    }
    totals
}

/// Name of the weekday with the highest total.
///
/// Ties go to the lowest weekday index. Returns [`UNKNOWN`] when there is no
/// activity to rank.
pub fn most_productive_weekday(days: &[ActivityDay]) -> &'static str {
    let totals = weekday_totals(days);

    let mut best: Option<(u8, u64)> = None;
    for (weekday, &total) in totals.iter().enumerate() {
        if total > best.map_or(0, |(_, t)| t) {
            best = Some((weekday as u8, total));
        }
    }

    best.map_or(UNKNOWN, |(weekday, _)| day_name(weekday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, count: u32) -> ActivityDay {
        ActivityDay::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), count)
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(most_productive_weekday(&[]), UNKNOWN);
        assert_eq!(most_productive_weekday(&[day(1, 0)]), UNKNOWN);
    }

    #[test]
    fn test_uniform_week_picks_sunday() {
        // 2024-01-07 (Sunday) .. 2024-01-13 (Saturday)
        let days: Vec<ActivityDay> = (7..=13).map(|d| day(d, 4)).collect();
        assert_eq!(most_productive_weekday(&days), "Sunday");
    }

    #[test]
    fn test_sums_across_weeks() {
        // Two Wednesdays beat one big Monday
        let days = vec![day(1, 9), day(3, 5), day(10, 5)];
        assert_eq!(weekday_totals(&days)[3], 10);
        assert_eq!(most_productive_weekday(&days), "Wednesday");
    }

    #[test]
    fn test_out_of_range_weekday_ignored() {
        let mut odd = day(2, 100);
        odd.weekday = 9;
        let days = vec![odd, day(5, 1)];
        assert_eq!(most_productive_weekday(&days), "Friday");
    }

    #[test]
    fn test_day_name() {
        assert_eq!(day_name(0), "Sunday");
        assert_eq!(day_name(6), "Saturday");
        assert_eq!(day_name(7), UNKNOWN);
    }
}
