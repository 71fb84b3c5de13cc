//! Level / XP scoring for the shareable card.
//!
//! Each statistic contributes XP through its own fixed formula; commits and
//! stars are log-damped so every order of magnitude adds a constant amount.
//! The level is `floor(sqrt(total_xp * 1.5) + 1)`, clamped to `1..=999`.

use crate::types::WrappedStats;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 999;

/// Everything the scorer looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelInput {
    pub commits: u64,
    pub prs: u64,
    pub prs_merged: u64,
    pub longest_streak: u32,
    pub stars: u64,
    pub issues: u64,
    pub languages: usize,
    pub badges: usize,
    pub coding_age: u32,
    pub days_active: u32,
}

impl LevelInput {
    /// Collect scorer inputs from a stats record plus the counts kept beside it.
    pub fn from_stats(stats: &WrappedStats, languages: usize, badges: usize, coding_age: u32) -> Self {
        Self {
            commits: stats.total_commits,
            prs: stats.total_prs,
            prs_merged: stats.total_prs_merged,
            longest_streak: stats.longest_streak,
            stars: stats.total_stars,
            issues: stats.total_issues,
            languages,
            badges,
            coding_age,
            days_active: stats.days_coded_this_year,
        }
    }
}

/// XP per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XpBreakdown {
    pub commits: u64,
    pub prs: u64,
    pub streak: u64,
    pub stars: u64,
    pub issues: u64,
    pub languages: u64,
    pub badges: u64,
    pub coding_age: u64,
    pub consistency: u64,
}

impl XpBreakdown {
    pub fn total(&self) -> u64 {
        self.commits
            + self.prs
            + self.streak
            + self.stars
            + self.issues
            + self.languages
            + self.badges
            + self.coding_age
            + self.consistency
    }
}

fn log_damped(value: u64, weight: f64) -> u64 {
    ((value as f64 + 1.0).log10() * weight).floor() as u64
}

/// Compute XP contributions.
pub fn calculate_xp(input: &LevelInput) -> XpBreakdown {
    let unmerged = input.prs.saturating_sub(input.prs_merged);

    XpBreakdown {
        commits: log_damped(input.commits, 100.0),
        prs: input.prs_merged * 15 + unmerged * 5,
        streak: (u64::from(input.longest_streak) * 3).min(300),
        stars: log_damped(input.stars, 80.0),
        issues: (input.issues * 5).min(150),
        languages: (input.languages as u64 * 15).min(150),
        badges: input.badges as u64 * 20,
        coding_age: (u64::from(input.coding_age) * 25).min(250),
        consistency: (f64::from(input.days_active) / 365.0 * 200.0).floor() as u64,
    }
}

/// Level for a total XP value.
pub fn level_for_xp(total_xp: u64) -> u32 {
    let raw = ((total_xp as f64) * 1.5).sqrt() + 1.0;
    (raw.floor() as u32).clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Level for the given inputs.
pub fn calculate_level(input: &LevelInput) -> u32 {
    level_for_xp(calculate_xp(input).total())
}
