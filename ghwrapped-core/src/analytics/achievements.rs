//! Achievement titles
//!
//! Rule-based badges. Every category is a ladder of thresholds checked from
//! the top; a category contributes at most one title, the highest rung the
//! user clears. Categories are evaluated in a fixed order so the resulting
//! list is stable:
//!
//! commits, merged PRs, issues, longest streak, language count, top language,
//! days coded, stars, weekend pattern.

use crate::types::{AchievementTitle, LanguageStat, Repository, WrappedStats};
use chrono::{Datelike, Weekday};

/// One rung of a category ladder.
struct Tier {
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    /// Whether the statistic clears this rung
    clears: fn(u64) -> bool,
    description: fn(u64) -> String,
}

const COMMIT_TIERS: &[Tier] = &[
    Tier {
        id: "commit-god",
        title: "Commit God",
        icon: "🌟",
        clears: |n| n > 2000,
        description: |n| format!("{}+ commits! Are you okay?", n),
    },
    Tier {
        id: "commit-legend",
        title: "Commit Legend",
        icon: "🏅",
        clears: |n| n > 1000,
        description: |n| format!("{}+ commits this year!", n),
    },
    Tier {
        id: "serial-committer",
        title: "Serial Committer",
        icon: "🔥",
        clears: |n| n > 500,
        description: |_| "Committing like there's no tomorrow".to_string(),
    },
    Tier {
        id: "loyal-committer",
        title: "Loyal Committer",
        icon: "⭐",
        clears: |n| n > 100,
        description: |_| "Consistent and dedicated".to_string(),
    },
    Tier {
        id: "casual-coder",
        title: "Casual Coder",
        icon: "🌱",
        clears: |n| n > 0,
        description: |_| "Quality over quantity, right?".to_string(),
    },
];

const PR_TIERS: &[Tier] = &[
    Tier {
        id: "pr-overlord",
        title: "PR Overlord",
        icon: "👑",
        clears: |n| n > 100,
        description: |_| "The ultimate merger of worlds".to_string(),
    },
    Tier {
        id: "pr-master",
        title: "Pull Request Master",
        icon: "🎯",
        clears: |n| n > 50,
        description: |_| "The merger of worlds".to_string(),
    },
    Tier {
        id: "pr-warrior",
        title: "PR Warrior",
        icon: "⚔️",
        clears: |n| n > 20,
        description: |_| "Fighting the good fight, one PR at a time".to_string(),
    },
];

const ISSUE_TIERS: &[Tier] = &[
    Tier {
        id: "issuer-supreme",
        title: "Issuer Supreme",
        icon: "🐛",
        clears: |n| n > 50,
        description: |_| "You found ALL the bugs".to_string(),
    },
    Tier {
        id: "bug-hunter",
        title: "Bug Hunter",
        icon: "🔍",
        clears: |n| n > 20,
        description: |_| "No bug escapes your watchful eye".to_string(),
    },
    Tier {
        id: "issuer",
        title: "The Issuer",
        icon: "📝",
        clears: |n| n > 5,
        description: |_| "Reporting problems like a pro".to_string(),
    },
];

const STREAK_TIERS: &[Tier] = &[
    Tier {
        id: "streak-immortal",
        title: "Streak Immortal",
        icon: "🔥",
        clears: |n| n > 100,
        description: |n| format!("{} days! Do you even sleep?", n),
    },
    Tier {
        id: "streak-warrior",
        title: "Streak Warrior",
        icon: "⚔️",
        clears: |n| n > 30,
        description: |n| format!("{} days of pure dedication", n),
    },
    Tier {
        id: "week-warrior",
        title: "Week Warrior",
        icon: "💪",
        clears: |n| n > 7,
        description: |_| "A solid week of coding!".to_string(),
    },
];

const LANGUAGE_COUNT_TIERS: &[Tier] = &[
    Tier {
        id: "language-collector",
        title: "Language Collector",
        icon: "📚",
        clears: |n| n >= 10,
        description: |n| format!("Fluent in {} languages! Overachiever much?", n),
    },
    Tier {
        id: "polyglot",
        title: "Polyglot Programmer",
        icon: "🌍",
        clears: |n| n >= 5,
        description: |n| format!("Fluent in {} languages", n),
    },
    Tier {
        id: "trilingual",
        title: "Trilingual Coder",
        icon: "🗣️",
        clears: |n| n >= 3,
        description: |_| "Diversity is your strength".to_string(),
    },
];

const DAYS_CODED_TIERS: &[Tier] = &[
    Tier {
        id: "no-life",
        title: "No Life Achievement",
        icon: "🏠",
        clears: |n| n > 350,
        description: |_| "You coded almost every single day".to_string(),
    },
    Tier {
        id: "code-everyday",
        title: "Code Every Day",
        icon: "🏠",
        clears: |n| n > 300,
        description: |_| "You basically live on GitHub".to_string(),
    },
    Tier {
        id: "dedicated-dev",
        title: "Dedicated Developer",
        icon: "💻",
        clears: |n| n > 200,
        description: |_| "More than half the year spent coding".to_string(),
    },
];

const STAR_TIERS: &[Tier] = &[
    Tier {
        id: "star-collector",
        title: "Star Collector",
        icon: "⭐",
        clears: |n| n > 1000,
        description: |_| "Your repos are famous!".to_string(),
    },
    Tier {
        id: "rising-star",
        title: "Rising Star",
        icon: "🌟",
        clears: |n| n > 100,
        description: |_| "People are noticing your work".to_string(),
    },
];

/// Title and icon for a top language, if it has one.
pub fn language_title(language: &str) -> Option<(&'static str, &'static str)> {
    let entry = match language {
        "JavaScript" => ("JavaScript Jedi", "⚡"),
        "TypeScript" => ("TypeScript Titan", "💎"),
        "Python" => ("Python Charmer", "🐍"),
        "Rust" => ("Rustacean", "🦀"),
        "Go" => ("Gopher", "🐹"),
        "Java" => ("Java Juggler", "☕"),
        "C++" => ("C++ Champion", "🏆"),
        "C" => ("C Veteran", "🎖️"),
        "Ruby" => ("Ruby Royalty", "💎"),
        "PHP" => ("PHP Warrior", "🐘"),
        "Swift" => ("Swift Ninja", "🍎"),
        "Kotlin" => ("Kotlin Knight", "🤖"),
        "Shell" => ("Shell Wizard", "🧙"),
        "HTML" => ("HTML Hero", "🌐"),
        "CSS" => ("CSS Sorcerer", "🎨"),
        "Vue" => ("Vue Virtuoso", "💚"),
        "Dart" => ("Dart Master", "🎯"),
        _ => return None,
    };
    Some(entry)
}

fn highest_tier(tiers: &[Tier], value: u64) -> Option<AchievementTitle> {
    tiers.iter().find(|t| (t.clears)(value)).map(|t| AchievementTitle {
        id: t.id.to_string(),
        title: t.title.to_string(),
        description: (t.description)(value),
        icon: t.icon.to_string(),
    })
}

fn top_language_title(languages: &[LanguageStat]) -> Option<AchievementTitle> {
    let top = languages.first()?;
    let (title, icon) = language_title(&top.name)?;
    Some(AchievementTitle {
        id: format!("lang-{}", top.name.to_lowercase()),
        title: title.to_string(),
        description: format!("{}% of your code is {}", top.percentage, top.name),
        icon: icon.to_string(),
    })
}

fn weekend_title(stats: &WrappedStats) -> Option<AchievementTitle> {
    let day = &stats.most_commits_day;
    let date = day.date.filter(|_| day.count > 0)?;
    if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return None;
    }
    Some(AchievementTitle {
        id: "weekend-warrior".to_string(),
        title: "Weekend Warrior".to_string(),
        description: "Your best day was on a weekend!".to_string(),
        icon: "🎮".to_string(),
    })
}

/// Award titles for the year.
///
/// `languages` is expected ranked by bytes, top language first.
/// `_repos` is accepted for parity with the stored inputs; no current
/// category reads it.
pub fn generate_titles(
    stats: &WrappedStats,
    languages: &[LanguageStat],
    _repos: &[Repository],
) -> Vec<AchievementTitle> {
    let titles: Vec<AchievementTitle> = [
        highest_tier(COMMIT_TIERS, stats.total_commits),
        highest_tier(PR_TIERS, stats.total_prs_merged),
        highest_tier(ISSUE_TIERS, stats.total_issues),
        highest_tier(STREAK_TIERS, u64::from(stats.longest_streak)),
        highest_tier(LANGUAGE_COUNT_TIERS, languages.len() as u64),
        top_language_title(languages),
        highest_tier(DAYS_CODED_TIERS, u64::from(stats.days_coded_this_year)),
        highest_tier(STAR_TIERS, stats.total_stars),
        weekend_title(stats),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(count = titles.len(), "Generated achievement titles");
    titles
}

/// The title shown on the card and badge: the first one awarded.
pub fn main_title(titles: &[AchievementTitle]) -> Option<&AchievementTitle> {
    titles.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DayRecord;
    use chrono::NaiveDate;

    fn lang(name: &str, percentage: f64) -> LanguageStat {
        LanguageStat {
            name: name.to_string(),
            percentage,
            color: "#000000".to_string(),
            bytes: 1,
        }
    }

    fn langs(n: usize) -> Vec<LanguageStat> {
        let names = ["Rust", "Go", "C", "Zig", "Python", "Ruby", "Lua", "Nim", "OCaml", "Elm"];
        names.iter().take(n).map(|l| lang(l, 10.0)).collect()
    }

    fn ids(titles: &[AchievementTitle]) -> Vec<&str> {
        titles.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_example_profile() {
        let stats = WrappedStats {
            total_commits: 1500,
            total_prs_merged: 60,
            longest_streak: 45,
            days_coded_this_year: 310,
            total_stars: 150,
            ..Default::default()
        };
        let titles = generate_titles(&stats, &langs(6), &[]);

        assert_eq!(
            ids(&titles),
            vec![
                "commit-legend",
                "pr-master",
                "streak-warrior",
                "polyglot",
                "lang-rust",
                "code-everyday",
                "rising-star",
            ]
        );
        assert_eq!(titles[0].description, "1500+ commits this year!");
        assert_eq!(titles[2].description, "45 days of pure dedication");
        assert_eq!(titles[3].description, "Fluent in 6 languages");
    }

    #[test]
    fn test_one_title_per_category() {
        let stats = WrappedStats {
            total_commits: 5000,
            total_prs_merged: 500,
            total_issues: 500,
            longest_streak: 366,
            days_coded_this_year: 366,
            total_stars: 50_000,
            ..Default::default()
        };
        let titles = generate_titles(&stats, &langs(10), &[]);
        assert_eq!(
            ids(&titles),
            vec![
                "commit-god",
                "pr-overlord",
                "issuer-supreme",
                "streak-immortal",
                "language-collector",
                "lang-rust",
                "no-life",
                "star-collector",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let stats = WrappedStats {
            total_commits: 100,
            total_prs_merged: 20,
            total_issues: 5,
            longest_streak: 7,
            days_coded_this_year: 200,
            total_stars: 100,
            ..Default::default()
        };
        let titles = generate_titles(&stats, &langs(2), &[]);
        assert_eq!(ids(&titles), vec!["casual-coder", "lang-rust"]);
    }

    #[test]
    fn test_nothing_earned() {
        let titles = generate_titles(&WrappedStats::default(), &[], &[]);
        assert!(titles.is_empty());
        assert!(main_title(&titles).is_none());
    }

    #[test]
    fn test_top_language_unmapped() {
        let titles = generate_titles(&WrappedStats::default(), &[lang("Zig", 80.0)], &[]);
        assert!(titles.is_empty());

        let titles = generate_titles(&WrappedStats::default(), &[lang("C++", 42.5)], &[]);
        assert_eq!(titles[0].id, "lang-c++");
        assert_eq!(titles[0].title, "C++ Champion");
        assert_eq!(titles[0].description, "42.5% of your code is C++");
    }

    #[test]
    fn test_weekend_warrior() {
        let mut stats = WrappedStats {
            most_commits_day: DayRecord {
                // Saturday
                date: NaiveDate::from_ymd_opt(2024, 6, 15),
                count: 12,
            },
            ..Default::default()
        };
        assert_eq!(ids(&generate_titles(&stats, &[], &[])), vec!["weekend-warrior"]);

        // Monday
        stats.most_commits_day.date = NaiveDate::from_ymd_opt(2024, 6, 17);
        assert!(generate_titles(&stats, &[], &[]).is_empty());

        // A Sunday with no activity does not count
        stats.most_commits_day = DayRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 16),
            count: 0,
        };
        assert!(generate_titles(&stats, &[], &[]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let stats = WrappedStats {
            total_commits: 742,
            total_issues: 21,
            longest_streak: 9,
            ..Default::default()
        };
        let languages = langs(4);
        let first = generate_titles(&stats, &languages, &[]);
        let second = generate_titles(&stats, &languages, &[]);
        assert_eq!(first, second);
        assert_eq!(main_title(&first).unwrap().id, "serial-committer");
    }
}
