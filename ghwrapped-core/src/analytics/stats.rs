//! Aggregate statistics for the year.

use super::streak::calculate_streak;
use crate::types::{ActivityDay, DayRecord, DiverseDay, PrCounts, Repository, WrappedStats};
use chrono::NaiveDate;

/// Inputs for [`calculate_total_stats`].
#[derive(Debug, Clone, Copy)]
pub struct StatsInput<'a> {
    pub contributions: &'a [ActivityDay],
    pub prs: PrCounts,
    pub issues: u64,
    pub repos: &'a [Repository],
    /// Commit total from the search API; used instead of the per-day sum when nonzero
    pub authoritative_commits: Option<u64>,
    /// Cap on languages listed for the most diverse day
    pub max_diverse_languages: usize,
}

/// Combine the activity series, PR/issue totals and repositories into one summary.
pub fn calculate_total_stats(input: &StatsInput<'_>) -> WrappedStats {
    let total_commits = match input.authoritative_commits {
        Some(total) if total > 0 => total,
        _ => input
            .contributions
            .iter()
            .map(|d| u64::from(d.count))
            .sum(),
    };

    let streak = calculate_streak(input.contributions);
    let most_commits_day = most_active_day(input.contributions);
    let total_stars = input.repos.iter().map(|r| r.stars).sum();

    // Per-day language data needs per-commit fetches, so the repository
    // language set stands in for it.
    let languages = distinct_languages(input.repos, input.max_diverse_languages);

    WrappedStats {
        total_commits,
        total_prs: input.prs.total,
        total_prs_merged: input.prs.merged,
        total_issues: input.issues,
        total_reviews: 0,
        total_stars,
        longest_streak: streak.longest_streak,
        current_streak: streak.current_streak,
        most_diverse_day: DiverseDay {
            date: most_commits_day.date,
            languages,
        },
        most_commits_day,
        days_coded_this_year: days_coded(input.contributions),
    }
}

/// The entry with the highest count; the first one wins on ties.
pub fn most_active_day(days: &[ActivityDay]) -> DayRecord {
    let mut best: Option<&ActivityDay> = None;
    for day in days {
        if best.map_or(true, |b| day.count > b.count) {
            best = Some(day);
        }
    }
    best.map(|d| DayRecord {
        date: Some(d.date),
        count: d.count,
    })
    .unwrap_or_default()
}

/// Number of days with any activity.
pub fn days_coded(days: &[ActivityDay]) -> u32 {
    days.iter().filter(|d| d.is_active()).count() as u32
}

/// Distinct repository languages in first-seen order, at most `limit`.
fn distinct_languages(repos: &[Repository], limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for lang in repos.iter().filter_map(|r| r.language.as_deref()) {
        if seen.len() >= limit {
            break;
        }
        if !seen.iter().any(|l| l == lang) {
            seen.push(lang.to_string());
        }
    }
    seen
}

/// Repositories ranked by stars, descending. Equal star counts keep input order.
pub fn top_repositories(repos: &[Repository], limit: usize) -> Vec<Repository> {
    let mut ranked = repos.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| b.stars.cmp(&a.stars));
    ranked.truncate(limit);
    ranked
}

/// Whole years between account creation and `today` (365-day years).
pub fn coding_age(join_date: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - join_date).num_days();
    if days <= 0 {
        0
    } else {
        (days / 365) as u32
    }
}
