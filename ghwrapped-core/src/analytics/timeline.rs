//! Monthly timeline
//!
//! Buckets the per-day series into calendar months and annotates each month
//! with short highlights for the slideshow.

use crate::types::{ActivityDay, MonthBucket};
use chrono::Datelike;

/// Month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MOST_PRODUCTIVE_HIGHLIGHT: &str = "Your most productive month! 🔥";
pub const BREAK_HIGHLIGHT: &str = "Taking a break?";
pub const MACHINE_HIGHLIGHT: &str = "Coding machine! 💪";
pub const SOLID_HIGHLIGHT: &str = "Solid month! 👍";

/// Build the 12-month timeline for `year`.
///
/// Days outside `year` are ignored. When `authoritative_total` is given and
/// both it and the per-day sum are nonzero, every month is rescaled by
/// `authoritative_total / per_day_sum` and rounded, since the per-day source
/// undercounts relative to the search total.
pub fn generate_timeline(
    days: &[ActivityDay],
    year: i32,
    authoritative_total: Option<u64>,
) -> Vec<MonthBucket> {
    let mut monthly = [0u64; 12];
    let mut raw_sum = 0u64;

    for day in days.iter().filter(|d| d.date.year() == year) {
        monthly[day.date.month0() as usize] += u64::from(day.count);
        raw_sum += u64::from(day.count);
    }

    if let Some(total) = authoritative_total.filter(|&t| t > 0) {
        if raw_sum > 0 {
            let scale = total as f64 / raw_sum as f64;
            for commits in monthly.iter_mut() {
                *commits = (*commits as f64 * scale).round() as u64;
            }
            tracing::debug!(raw_sum, total, scale, "Rescaled monthly timeline");
        }
    }

    // Strict comparison keeps the earliest month on ties
    let mut peak_month = 0usize;
    let mut peak_commits = 0u64;
    for (month, &commits) in monthly.iter().enumerate() {
        if commits > peak_commits {
            peak_commits = commits;
            peak_month = month;
        }
    }

    monthly
        .iter()
        .enumerate()
        .map(|(month, &commits)| {
            let mut highlights = Vec::new();

            if month == peak_month && peak_commits > 0 {
                highlights.push(MOST_PRODUCTIVE_HIGHLIGHT.to_string());
            }

            if commits == 0 {
                highlights.push(BREAK_HIGHLIGHT.to_string());
            } else if commits > 100 {
                highlights.push(MACHINE_HIGHLIGHT.to_string());
            } else if commits > 50 {
                highlights.push(SOLID_HIGHLIGHT.to_string());
            }

            MonthBucket {
                month: MONTH_NAMES[month].to_string(),
                year,
                commits,
                highlights,
            }
        })
        .collect()
}

/// The month carrying the most-productive highlight, if any month had activity.
pub fn most_productive_month(timeline: &[MonthBucket]) -> Option<&MonthBucket> {
    timeline
        .iter()
        .find(|m| m.highlights.iter().any(|h| h == MOST_PRODUCTIVE_HIGHLIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(year: i32, month: u32, d: u32, count: u32) -> ActivityDay {
        ActivityDay::new(NaiveDate::from_ymd_opt(year, month, d).unwrap(), count)
    }

    #[test]
    fn test_always_twelve_buckets() {
        let timeline = generate_timeline(&[], 2024, None);
        assert_eq!(timeline.len(), 12);
        assert_eq!(timeline[0].month, "January");
        assert_eq!(timeline[11].month, "December");
        assert!(timeline.iter().all(|m| m.commits == 0));
        assert!(timeline
            .iter()
            .all(|m| m.highlights == vec![BREAK_HIGHLIGHT.to_string()]));
        assert!(most_productive_month(&timeline).is_none());
    }

    #[test]
    fn test_filters_other_years() {
        let days = vec![day(2023, 12, 31, 40), day(2024, 1, 1, 5), day(2025, 1, 1, 9)];
        let timeline = generate_timeline(&days, 2024, None);
        assert_eq!(timeline[0].commits, 5);
        assert_eq!(timeline.iter().map(|m| m.commits).sum::<u64>(), 5);
    }

    #[test]
    fn test_rescale_doubles() {
        let days = vec![
            day(2024, 1, 10, 50),
            day(2024, 3, 3, 70),
            day(2024, 7, 4, 80),
        ];
        let timeline = generate_timeline(&days, 2024, Some(400));
        assert_eq!(timeline[0].commits, 100);
        assert_eq!(timeline[2].commits, 140);
        assert_eq!(timeline[6].commits, 160);
        assert_eq!(timeline.iter().map(|m| m.commits).sum::<u64>(), 400);
    }

    #[test]
    fn test_rescale_within_rounding() {
        let days: Vec<ActivityDay> = (1..=12).map(|m| day(2024, m, 1, 1)).collect();
        let timeline = generate_timeline(&days, 2024, Some(100));
        let sum: u64 = timeline.iter().map(|m| m.commits).sum();
        assert!(sum.abs_diff(100) <= 11, "sum was {}", sum);
    }

    #[test]
    fn test_zero_raw_sum_skips_rescale() {
        let days = vec![day(2024, 2, 1, 0)];
        let timeline = generate_timeline(&days, 2024, Some(500));
        assert!(timeline.iter().all(|m| m.commits == 0));
    }

    #[test]
    fn test_highlights() {
        let days = vec![
            day(2024, 1, 1, 120),
            day(2024, 2, 1, 60),
            day(2024, 3, 1, 10),
            day(2024, 4, 1, 120),
        ];
        let timeline = generate_timeline(&days, 2024, None);

        // January wins the tie with April and carries both highlights
        assert_eq!(
            timeline[0].highlights,
            vec![MOST_PRODUCTIVE_HIGHLIGHT, MACHINE_HIGHLIGHT]
        );
        assert_eq!(timeline[1].highlights, vec![SOLID_HIGHLIGHT]);
        assert!(timeline[2].highlights.is_empty());
        assert_eq!(timeline[3].highlights, vec![MACHINE_HIGHLIGHT]);
        assert_eq!(timeline[4].highlights, vec![BREAK_HIGHLIGHT]);
        assert_eq!(most_productive_month(&timeline).unwrap().month, "January");
    }
}
