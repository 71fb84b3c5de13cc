//! Wrapped - Year in Review
//!
//! Runs every engine over one user's input bundle and assembles the
//! [`WrappedRecord`]. [`generate_wrapped`] is pure apart from the injected
//! [`Picker`]; [`run_pipeline`] adds status tracking and persistence.

use chrono::{NaiveDate, Utc};

use super::achievements::generate_titles;
use super::funfacts::{
    generate_fun_facts, oldest_starred_repo, predict_age, AgeBounds, FunFactsInput, Picker,
};
use super::languages::rank_languages;
use super::level::{calculate_level, LevelInput};
use super::squad::rank_squad;
use super::stats::{calculate_total_stats, coding_age, top_repositories, StatsInput};
use super::streak::calculate_streak;
use super::timeline::generate_timeline;
use crate::config::ScoringConfig;
use crate::error::{Error, Result};
use crate::types::{WrappedInput, WrappedRecord, WrappedStatus};
use crate::Database;

/// Configuration for wrapped generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedConfig {
    /// Number of top repositories to include
    pub top_repos: usize,
    /// Cap on languages listed for the most diverse day
    pub max_diverse_languages: usize,
    /// Cap on ranked languages
    pub max_languages: usize,
    /// Number of collaborators kept in the squad
    pub squad_size: usize,
    /// Predicted age baseline and clamp
    pub age_bounds: AgeBounds,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

impl From<&ScoringConfig> for WrappedConfig {
    fn from(scoring: &ScoringConfig) -> Self {
        Self {
            top_repos: scoring.top_repos,
            max_diverse_languages: scoring.max_diverse_languages,
            max_languages: scoring.max_languages,
            squad_size: scoring.squad_size,
            age_bounds: AgeBounds::from(scoring),
        }
    }
}

/// Checkpoints reported while a record is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Stats,
    Timeline,
    Achievements,
}

impl Stage {
    /// Progress percentage reached once this stage is done.
    pub fn progress(&self) -> u8 {
        match self {
            Stage::Stats => 70,
            Stage::Timeline => 80,
            Stage::Achievements => 90,
        }
    }
}

/// Assemble the year-in-review for `input`.
///
/// `today` anchors the account age. The predicted age is anchored to the
/// wrapped year so a stored bundle always yields the same prediction.
pub fn generate_wrapped<P: Picker + ?Sized>(
    input: &WrappedInput,
    config: &WrappedConfig,
    today: NaiveDate,
    picker: &mut P,
) -> Result<WrappedRecord> {
    generate_with_stages(input, config, today, picker, |_| Ok(()))
}

fn generate_with_stages<P, F>(
    input: &WrappedInput,
    config: &WrappedConfig,
    today: NaiveDate,
    picker: &mut P,
    mut on_stage: F,
) -> Result<WrappedRecord>
where
    P: Picker + ?Sized,
    F: FnMut(Stage) -> Result<()>,
{
    let profile = input
        .profile
        .clone()
        .ok_or_else(|| Error::MissingInput("profile".to_string()))?;
    if profile.username.trim().is_empty() {
        return Err(Error::InvalidInput("profile username is empty".to_string()));
    }
    input.validate()?;

    let stats = calculate_total_stats(&StatsInput {
        contributions: &input.contributions,
        prs: input.prs,
        issues: input.issues,
        repos: &input.repos,
        authoritative_commits: input.total_commits,
        max_diverse_languages: config.max_diverse_languages,
    });
    let streak = calculate_streak(&input.contributions);
    on_stage(Stage::Stats)?;

    let timeline = generate_timeline(&input.contributions, input.year, input.total_commits);
    let top_repos = top_repositories(&input.repos, config.top_repos);
    let languages = rank_languages(&input.language_bytes, config.max_languages);
    let squad = rank_squad(&profile.username, &input.collaborators, config.squad_size);
    on_stage(Stage::Timeline)?;

    let titles = generate_titles(&stats, &languages, &input.repos);
    let account_age = coding_age(profile.join_date, today);
    let prediction = predict_age(&input.starred, input.year, &config.age_bounds);
    let fun_facts = generate_fun_facts(
        FunFactsInput {
            coding_age: account_age,
            oldest_starred: oldest_starred_repo(&input.starred),
            prediction,
            contributions: &input.contributions,
        },
        picker,
    );
    let level = calculate_level(&LevelInput::from_stats(
        &stats,
        languages.len(),
        titles.len(),
        account_age,
    ));
    on_stage(Stage::Achievements)?;

    tracing::debug!(
        commits = stats.total_commits,
        titles = titles.len(),
        level,
        predicted_age = fun_facts.predicted_age,
        "Assembled wrapped record"
    );

    Ok(WrappedRecord {
        username: profile.username.clone(),
        year: input.year,
        status: WrappedStatus::Completed,
        error: None,
        generated_at: Utc::now(),
        profile,
        stats,
        streak,
        languages,
        top_repos,
        timeline,
        titles,
        squad,
        fun_facts,
        level,
    })
}

/// Generate, track and store the wrapped record for `username`.
///
/// The status row moves through `processing` at each [`Stage`] and ends
/// `completed` at 100 once the record is saved. On any error the status is
/// marked `failed` with the error message and the error is returned.
pub fn run_pipeline<P: Picker + ?Sized>(
    db: &Database,
    username: &str,
    input: &WrappedInput,
    config: &WrappedConfig,
    today: NaiveDate,
    picker: &mut P,
) -> Result<WrappedRecord> {
    let year = input.year;
    let trace_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("wrapped", username, year, %trace_id);
    let _enter = span.enter();

    tracing::info!("Starting wrapped generation");
    db.reset_status(username, year)?;
    db.set_status(username, year, WrappedStatus::Processing, 0, None)?;

    let mut progress = 0u8;
    let result = generate_with_stages(input, config, today, picker, |stage| {
        progress = stage.progress();
        tracing::debug!(?stage, progress, "Stage complete");
        db.set_status(username, year, WrappedStatus::Processing, progress, None)
    })
    .and_then(|record| {
        db.save_wrapped(&record)?;
        db.set_status(username, year, WrappedStatus::Completed, 100, None)?;
        Ok(record)
    });

    match result {
        Ok(record) => {
            tracing::info!(
                commits = record.stats.total_commits,
                level = record.level,
                "Wrapped generation completed"
            );
            Ok(record)
        }
        Err(e) => {
            let message = e.to_string();
            tracing::error!(error = %message, progress, "Wrapped generation failed");
            if let Err(status_err) =
                db.set_status(username, year, WrappedStatus::Failed, progress, Some(&message))
            {
                tracing::warn!(error = %status_err, "Failed to record failure status");
            }
            Err(e)
        }
    }
}
