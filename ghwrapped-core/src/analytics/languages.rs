//! Language ranking from per-repository byte counts.

use crate::types::LanguageStat;

/// Colour used for languages missing from [`language_color`].
pub const DEFAULT_COLOR: &str = "#858585";

/// Display colour for a language.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#178600",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Swift" => "#F05138",
        "Kotlin" => "#A97BFF",
        "Scala" => "#c22d40",
        "Shell" => "#89e051",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Vue" => "#41b883",
        "Dart" => "#00B4AB",
        "Lua" => "#000080",
        "R" => "#198CE7",
        "MATLAB" => "#e16737",
        "Perl" => "#0298c3",
        "Haskell" => "#5e5086",
        "Elixir" => "#6e4a7e",
        "Clojure" => "#db5855",
        "Dockerfile" => "#384d54",
        "Makefile" => "#427819",
        _ => DEFAULT_COLOR,
    }
}

/// Merge byte counts per language and rank them.
///
/// The same language may appear several times (once per repository); counts
/// are summed. Percentages are of the grand total, rounded to one decimal.
/// Sorted by bytes descending, ties keep first-seen order, truncated to `limit`.
pub fn rank_languages(byte_counts: &[(String, u64)], limit: usize) -> Vec<LanguageStat> {
    let mut merged: Vec<(String, u64)> = Vec::new();
    for (name, bytes) in byte_counts {
        match merged.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total += bytes,
            None => merged.push((name.clone(), *bytes)),
        }
    }

    let grand_total: u64 = merged.iter().map(|(_, b)| b).sum();
    merged.sort_by(|a, b| b.1.cmp(&a.1));

    merged
        .into_iter()
        .take(limit)
        .map(|(name, bytes)| {
            let percentage = if grand_total > 0 {
                (bytes as f64 / grand_total as f64 * 1000.0).round() / 10.0
            } else {
                0.0
            };
            LanguageStat {
                color: language_color(&name).to_string(),
                name,
                percentage,
                bytes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(n, b)| (n.to_string(), *b)).collect()
    }

    #[test]
    fn test_rank_languages() {
        let ranked = rank_languages(
            &counts(&[("Python", 100), ("Rust", 600), ("Python", 200), ("Nim", 100)]),
            10,
        );
        let names: Vec<&str> = ranked.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python", "Nim"]);
        assert_eq!(ranked[0].percentage, 60.0);
        assert_eq!(ranked[1].bytes, 300);
        assert_eq!(ranked[1].percentage, 30.0);
        assert_eq!(ranked[0].color, "#dea584");
        assert_eq!(ranked[2].color, DEFAULT_COLOR);
    }

    #[test]
    fn test_rank_languages_rounding_and_limit() {
        let ranked = rank_languages(&counts(&[("Go", 1), ("C", 2)]), 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "C");
        assert_eq!(ranked[0].percentage, 66.7);
    }

    #[test]
    fn test_rank_languages_empty() {
        assert!(rank_languages(&[], 10).is_empty());
        let ranked = rank_languages(&counts(&[("Go", 0)]), 10);
        assert_eq!(ranked[0].percentage, 0.0);
    }
}
