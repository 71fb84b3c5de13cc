//! Core domain types for gh-wrapped
//!
//! These types describe the raw inputs handed over by the fetch layer and the
//! derived records produced by the analytics engine.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Activity day** | One calendar day's count of qualifying actions (commits, PRs, issues) |
//! | **Streak** | A maximal run of consecutive activity days with a nonzero count |
//! | **Title** | A named badge awarded when a statistic clears a threshold |
//! | **Predicted age** | A heuristic score derived from starred-repository taste |
//! | **Level** | A single number combining several statistics via fixed XP formulas |
//!
//! All serialized field names are camelCase so stored records keep the shape
//! the presentation layer reads.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Raw inputs
// ============================================

/// One calendar day of activity.
///
/// The weekday is always derived from the date; a `weekday` supplied in
/// serialized input is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawActivityDay")]
pub struct ActivityDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Number of qualifying actions on this day
    pub count: u32,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
}

impl ActivityDay {
    /// Build a day, deriving the weekday from the date.
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            weekday: date.weekday().num_days_from_sunday() as u8,
        }
    }

    /// Whether anything happened on this day.
    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

#[derive(Deserialize)]
struct RawActivityDay {
    date: NaiveDate,
    count: u32,
}

impl From<RawActivityDay> for ActivityDay {
    fn from(raw: RawActivityDay) -> Self {
        Self::new(raw.date, raw.count)
    }
}

/// A repository owned by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    /// Commits by the user in this repository, when known
    #[serde(default)]
    pub commits: u64,
    pub url: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Share of the user's code written in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStat {
    pub name: String,
    /// Percentage of total bytes, one decimal place
    pub percentage: f64,
    /// Display colour (hex)
    pub color: String,
    pub bytes: u64,
}

/// Metadata of a repository the user starred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StarredRepo {
    pub full_name: String,
    /// When the starred repository itself was created
    pub created_at: Option<NaiveDate>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
}

impl StarredRepo {
    /// Creation year, if the creation date is known.
    pub fn created_year(&self) -> Option<i32> {
        self.created_at.map(|d| d.year())
    }
}

/// Public profile of the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Account creation date
    pub join_date: NaiveDate,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
}

/// Pull request totals for the year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrCounts {
    pub total: u64,
    pub merged: u64,
}

/// How a squad member is connected to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationType {
    /// Owns a repository the user got PRs merged into
    Maintainer,
    /// Contributes to the same repositories as the user
    Contributor,
    Reviewer,
}

impl CollaborationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollaborationType::Maintainer => "maintainer",
            CollaborationType::Contributor => "contributor",
            CollaborationType::Reviewer => "reviewer",
        }
    }
}

/// One observed link between the user and another account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    /// Contributor to one of the user's own repositories
    OwnRepoContributor,
    /// Owner of a repository the user had a PR merged into
    MergedPrOwner,
    /// Fellow contributor on a repository the user contributed to
    CoContributor,
}

/// A collaboration signal as fetched, one per (account, repository) sighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationSignal {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    pub kind: SignalKind,
}

/// A frequent collaborator shown in the "squad" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadMember {
    pub username: String,
    pub avatar_url: String,
    pub shared_projects: u32,
    pub collaboration_type: CollaborationType,
}

/// Everything the fetch layer hands over for one user and year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedInput {
    pub year: i32,
    /// Absent when the profile fetch failed
    pub profile: Option<Profile>,
    #[serde(default)]
    pub contributions: Vec<ActivityDay>,
    #[serde(default)]
    pub repos: Vec<Repository>,
    /// Bytes per language, summed over the user's repositories
    #[serde(default)]
    pub language_bytes: Vec<(String, u64)>,
    #[serde(default)]
    pub prs: PrCounts,
    #[serde(default)]
    pub issues: u64,
    /// Commit total from the search API, more accurate than the per-day series
    #[serde(default)]
    pub total_commits: Option<u64>,
    #[serde(default)]
    pub starred: Vec<StarredRepo>,
    #[serde(default)]
    pub collaborators: Vec<CollaborationSignal>,
}

impl WrappedInput {
    /// Parse and validate an input bundle from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let input: Self = serde_json::from_str(json)?;
        input.validate()?;
        Ok(input)
    }

    /// Check invariants serde cannot express: no two contribution entries
    /// share a date.
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.contributions.len());
        match self.contributions.iter().find(|d| !seen.insert(d.date)) {
            Some(dup) => Err(crate::Error::InvalidInput(format!(
                "duplicate contribution date {}",
                dup.date
            ))),
            None => Ok(()),
        }
    }
}

// ============================================
// Derived records
// ============================================

/// Longest and current runs of active days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResult {
    pub longest_streak: u32,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
    pub current_streak: u32,
}

/// Activity for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    pub month: String,
    pub year: i32,
    pub commits: u64,
    pub highlights: Vec<String>,
}

/// A single day and its count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// `None` only when there was no activity series at all
    pub date: Option<NaiveDate>,
    pub count: u32,
}

/// The day with the widest language spread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiverseDay {
    pub date: Option<NaiveDate>,
    pub languages: Vec<String>,
}

/// Aggregate statistics for the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedStats {
    pub total_commits: u64,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    #[serde(rename = "totalPRsMerged")]
    pub total_prs_merged: u64,
    pub total_issues: u64,
    /// Reviews are not fetched; always zero
    pub total_reviews: u64,
    pub total_stars: u64,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub most_commits_day: DayRecord,
    pub most_diverse_day: DiverseDay,
    pub days_coded_this_year: u32,
}

/// An earned badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementTitle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Light-hearted facts shown near the end of the wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFacts {
    /// Whole years since account creation
    pub coding_age: u32,
    pub predicted_age: i32,
    pub predicted_age_reason: String,
    pub oldest_starred_repo_year: Option<i32>,
    pub oldest_starred_repo_name: Option<String>,
    /// Day-level data only; always the "Unknown" sentinel
    pub favorite_time_of_day: String,
    pub most_productive_day: String,
    pub quote: String,
    pub roast: String,
}

// ============================================
// Job status
// ============================================

/// Lifecycle state of a wrapped computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrappedStatus {
    /// Inputs are being fetched or derived
    Processing,
    /// Record is stored and readable
    Completed,
    /// Computation stopped with an error
    Failed,
}

impl WrappedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrappedStatus::Processing => "processing",
            WrappedStatus::Completed => "completed",
            WrappedStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for WrappedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WrappedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(WrappedStatus::Processing),
            "completed" => Ok(WrappedStatus::Completed),
            "failed" => Ok(WrappedStatus::Failed),
            _ => Err(format!("unknown wrapped status: {}", s)),
        }
    }
}

/// Progress of a wrapped computation for one user and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub username: String,
    pub year: i32,
    pub status: WrappedStatus,
    /// 0-100, advanced by the pipeline
    pub progress: u8,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// The assembled year-in-review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedRecord {
    pub username: String,
    pub year: i32,
    pub status: WrappedStatus,
    pub error: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub profile: Profile,
    pub stats: WrappedStats,
    pub streak: StreakResult,
    pub languages: Vec<LanguageStat>,
    pub top_repos: Vec<Repository>,
    pub timeline: Vec<MonthBucket>,
    pub titles: Vec<AchievementTitle>,
    #[serde(default)]
    pub squad: Vec<SquadMember>,
    pub fun_facts: FunFacts,
    pub level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_day_weekday() {
        // 2024-01-07 was a Sunday
        let day = ActivityDay::new(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(), 3);
        assert_eq!(day.weekday, 0);
        let day = ActivityDay::new(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(), 0);
        assert_eq!(day.weekday, 6);
        assert!(!day.is_active());
    }

    #[test]
    fn test_status_roundtrip_str() {
        for status in [
            WrappedStatus::Processing,
            WrappedStatus::Completed,
            WrappedStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<WrappedStatus>().unwrap(), status);
        }
        assert!("done".parse::<WrappedStatus>().is_err());
    }

    #[test]
    fn test_stats_field_names() {
        let json = serde_json::to_value(WrappedStats::default()).unwrap();
        assert!(json.get("totalPRsMerged").is_some());
        assert!(json.get("daysCodedThisYear").is_some());
        assert!(json.get("mostCommitsDay").is_some());
    }

    #[test]
    fn test_weekday_derived_from_date() {
        // 2024-06-15 was a Saturday; the bundle claims Monday
        let input = WrappedInput::from_json(
            r#"{"year": 2024, "contributions": [{"date": "2024-06-15", "count": 4, "weekday": 1}]}"#,
        )
        .unwrap();
        assert_eq!(input.contributions[0].weekday, 6);

        let input = WrappedInput::from_json(
            r#"{"year": 2024, "contributions": [{"date": "2024-06-16", "count": 1}]}"#,
        )
        .unwrap();
        assert_eq!(input.contributions[0].weekday, 0);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let err = WrappedInput::from_json(
            r#"{"year": 2024, "contributions": [
                {"date": "2024-06-15", "count": 1},
                {"date": "2024-06-16", "count": 1},
                {"date": "2024-06-15", "count": 2}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(ref m) if m.contains("2024-06-15")));
    }

    #[test]
    fn test_collaboration_signal_json() {
        let input = WrappedInput::from_json(
            r#"{"year": 2024, "collaborators": [
                {"login": "hubot", "avatarUrl": "a", "kind": "mergedPrOwner"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(input.collaborators[0].kind, SignalKind::MergedPrOwner);

        for kind in [
            CollaborationType::Maintainer,
            CollaborationType::Contributor,
            CollaborationType::Reviewer,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn test_input_from_json_defaults() {
        let input = WrappedInput::from_json(r#"{"year": 2024}"#).unwrap();
        assert_eq!(input.year, 2024);
        assert!(input.profile.is_none());
        assert!(input.contributions.is_empty());
        assert_eq!(input.total_commits, None);
    }
}
