//! Analytics module for gh-wrapped
//!
//! Every engine is a pure function over the fetched inputs:
//! - Streaks and the monthly timeline
//! - Weekday profile and aggregate stats
//! - Language ranking
//! - Achievement titles
//! - Fun facts and the predicted "developer age"
//! - Level / XP
//! - Squad (top collaborators)
//!
//! [`wrapped`] runs them in order and assembles the stored record.

pub mod achievements;
pub mod funfacts;
pub mod languages;
pub mod level;
pub mod squad;
pub mod stats;
pub mod streak;
pub mod timeline;
pub mod weekday;
pub mod wrapped;

pub use achievements::{generate_titles, main_title};
pub use funfacts::{
    generate_fun_facts, predict_age, AgeBounds, AgePrediction, FixedPicker, Picker,
};
pub use languages::rank_languages;
pub use level::{calculate_level, calculate_xp, LevelInput, XpBreakdown};
pub use squad::rank_squad;
pub use stats::{calculate_total_stats, StatsInput};
pub use streak::calculate_streak;
pub use timeline::generate_timeline;
pub use weekday::most_productive_weekday;
pub use wrapped::{generate_wrapped, run_pipeline, Stage, WrappedConfig};
