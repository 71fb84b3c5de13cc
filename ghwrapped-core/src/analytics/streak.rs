//! Streak calculation over a day-indexed activity series.

use crate::types::{ActivityDay, StreakResult};
use chrono::NaiveDate;

/// Find the longest and the current run of active days.
///
/// The series does not need to be sorted. Days are walked chronologically and
/// any zero-count day breaks the run; gaps in the series (missing dates) do
/// not. The first maximal run wins on ties. The current streak is the run
/// ending at the chronologically last entry.
pub fn calculate_streak(days: &[ActivityDay]) -> StreakResult {
    if days.is_empty() {
        return StreakResult::default();
    }

    let mut sorted: Vec<&ActivityDay> = days.iter().collect();
    sorted.sort_by_key(|d| d.date);

    let mut result = StreakResult::default();
    let mut run = 0u32;
    let mut run_start: Option<NaiveDate> = None;

    for day in &sorted {
        if day.is_active() {
            if run == 0 {
                run_start = Some(day.date);
            }
            run += 1;

            if run > result.longest_streak {
                result.longest_streak = run;
                result.longest_streak_start = run_start;
                result.longest_streak_end = Some(day.date);
            }
        } else {
            run = 0;
            run_start = None;
        }
    }

    result.current_streak = sorted
        .iter()
        .rev()
        .take_while(|d| d.is_active())
        .count() as u32;

    result
}
