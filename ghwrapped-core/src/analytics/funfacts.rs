//! Fun facts and "GitHub age" prediction
//!
//! The predicted age is a gag: a baseline score nudged up or down by what the
//! user stars. Old repositories, legacy languages and old-school topics push
//! it up; fresh repositories and trendy stacks pull it down. Only the first
//! adjustment that produces a justification gets to explain the number.

use super::weekday::{most_productive_weekday, UNKNOWN};
use crate::types::{ActivityDay, FunFacts, StarredRepo};
use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, HashSet};

const CODER_QUOTES: &[&str] = &[
    "Touch some grass dude 🌱",
    "Have you tried turning yourself off and on again?",
    "Your code works, but at what cost?",
    "Sleep is for people without deadlines",
    "Documentation? What's that?",
    "Works on my machine ¯\\_(ツ)_/¯",
    "console.log is a valid debugging strategy",
    "git push --force is a lifestyle choice",
    "The bug is a feature",
    "May your builds be ever green",
    "Remember: it's not a bug, it's an undocumented feature",
    "Your keyboard needs a vacation",
    "Coffee.exe has stopped working",
    "404: Social life not found",
    "sudo touch grass",
];

const ROASTS: &[&str] = &[
    "You really said 'I'll fix it tomorrow' every day this year",
    "Your commit graph looks like a cry for help",
    "Even your IDE is tired of you",
    "You've got more abandoned projects than finished ones",
    "Your GitHub says 'developer', your code says 'learning'",
    "You commit more to GitHub than your relationships",
    "Your code has more bugs than a rainforest",
    "You probably google 'how to center a div' weekly",
    "Your git history is basically a diary of regrets",
    "You've mass-produced more TODOs than actual code",
    "Your README has more promises than your code delivers",
    "You've starred more repos than you've finished projects",
];

// ============================================
// Randomness
// ============================================

/// Source of choices for quote and roast selection.
pub trait Picker {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng + ?Sized> Picker for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Picker that always returns the same index (clamped to the pool size).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl Picker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

fn choose<'a, P: Picker + ?Sized>(picker: &mut P, pool: &[&'a str]) -> &'a str {
    pool[picker.pick(pool.len())]
}

// ============================================
// Age prediction
// ============================================

/// Clamp bounds and starting point for [`predict_age`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBounds {
    pub baseline: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self {
            baseline: 25,
            min: 16,
            max: 70,
        }
    }
}

impl AgeBounds {
    /// Clamp range with the ends in order, whichever way round they were given.
    pub fn range(&self) -> (i32, i32) {
        (self.min.min(self.max), self.min.max(self.max))
    }
}

impl From<&crate::config::ScoringConfig> for AgeBounds {
    fn from(config: &crate::config::ScoringConfig) -> Self {
        Self {
            baseline: config.baseline_age,
            min: config.min_age,
            max: config.max_age,
        }
    }
}

/// Predicted age with its justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgePrediction {
    pub age: i32,
    pub reason: String,
}

/// Running score that remembers only the first reason given.
struct AgeScore {
    age: i32,
    reason: Option<String>,
}

impl AgeScore {
    fn adjust(&mut self, delta: i32, reason: impl FnOnce() -> String) {
        self.age += delta;
        if self.reason.is_none() {
            self.reason = Some(reason());
        }
    }
}

/// Predict how old the user "feels" from their starred repositories.
///
/// `reference_year` is the year repository ages are measured against (the
/// wrapped year). Adjustments are applied in a fixed order: repository
/// creation years, legacy languages, modern languages, topics, star count.
pub fn predict_age(starred: &[StarredRepo], reference_year: i32, bounds: &AgeBounds) -> AgePrediction {
    let mut score = AgeScore {
        age: bounds.baseline,
        reason: None,
    };

    let mut lang_counts: HashMap<&str, usize> = HashMap::new();
    for lang in starred.iter().filter_map(|r| r.language.as_deref()) {
        *lang_counts.entry(lang).or_default() += 1;
    }
    let count = |lang: &str| lang_counts.get(lang).copied().unwrap_or(0);

    let topics: HashSet<String> = starred
        .iter()
        .flat_map(|r| r.topics.iter())
        .map(|t| t.to_lowercase())
        .collect();
    let has_topic = |t: &str| topics.contains(t);

    // Repository creation years
    let years: Vec<i32> = starred.iter().filter_map(StarredRepo::created_year).collect();
    if let Some(&oldest) = years.iter().min() {
        let avg_year =
            (years.iter().map(|&y| f64::from(y)).sum::<f64>() / years.len() as f64).round() as i32;

        if oldest <= 2009 {
            score.adjust(25, || format!("You star repos from {}... mass respect 🧓", oldest));
        } else if oldest <= 2012 {
            score.adjust(15, || format!("Repos from {}? You've seen things.", oldest));
        } else if oldest <= 2015 {
            score.adjust(8, || format!("Your oldest starred repo is from {}", oldest));
        } else if oldest >= 2023 {
            score.adjust(-8, || {
                format!("Only stars fresh repos ({}+) - zoomer energy", oldest)
            });
        }

        // Average age only counts when the oldest repo said nothing
        let avg_age = reference_year - avg_year;
        if score.reason.is_none() {
            if avg_age > 10 {
                score.adjust(12, || {
                    format!("Avg starred repo is {} years old - vintage taste", avg_age)
                });
            } else if avg_age < 2 {
                score.adjust(-5, || {
                    "Chasing the new hotness (avg repo < 2 years old)".to_string()
                });
            }
        }
    }

    // Legacy languages
    if count("COBOL") > 0 || count("Fortran") > 0 || count("Pascal") > 0 {
        score.adjust(30, || "COBOL/Fortran? Are you a time traveler? 👴".to_string());
    }
    if count("Perl") > 0 {
        score.adjust(15, || "Perl lover - you've seen the regex wars".to_string());
    }
    if count("PHP") > 5 {
        score.adjust(10, || "Heavy PHP energy - WordPress flashbacks?".to_string());
    }
    if count("Ruby") > 3 {
        score.adjust(5, || "Ruby fan - 2010 called, they want their gems back".to_string());
    }
    if count("Java") > 5 {
        score.adjust(8, || "Java enthusiast - enterprise soul".to_string());
    }
    if count("Objective-C") > 0 {
        score.adjust(10, || "Objective-C? Pre-Swift iOS veteran".to_string());
    }

    // Modern languages
    if let Some(lang) = ["Zig", "Gleam", "Mojo"].into_iter().find(|&l| count(l) > 0) {
        score.adjust(-10, || format!("{}? Bleeding edge zoomer", lang));
    }
    if count("Rust") > 5 {
        score.adjust(-3, || "Rust evangelist energy 🦀".to_string());
    }
    if count("TypeScript") > 10 {
        score.adjust(-2, || "TypeScript maximalist".to_string());
    }

    // Old-school topics
    if has_topic("vim") || has_topic("emacs") {
        let editor = if has_topic("vim") { "Vim" } else { "Emacs" };
        score.adjust(12, || format!("{} user - a person of culture", editor));
    }
    if has_topic("jquery") {
        score.adjust(15, || "Still starring jQuery? Respect the classics 📜".to_string());
    }
    if has_topic("xml") || has_topic("soap") {
        score.adjust(18, || "XML/SOAP enthusiast - enterprise PTSD".to_string());
    }

    // Trendy topics
    if has_topic("web3") || has_topic("blockchain") || has_topic("nft") {
        score.adjust(-5, || "Web3 interests - wagmi energy".to_string());
    }
    if ["ai", "llm", "gpt", "machine-learning"].iter().any(|&t| has_topic(t)) {
        score.adjust(-3, || "AI/ML hypetrain passenger 🚂".to_string());
    }
    if has_topic("tiktok") || has_topic("discord-bot") {
        score.adjust(-8, || "TikTok/Discord era developer".to_string());
    }
    if has_topic("linux") || has_topic("kernel") {
        score.adjust(5, || "Linux/kernel interest - respects the foundations".to_string());
    }

    // Star count
    let total = starred.len();
    if total > 500 {
        score.adjust(8, || format!("{} starred repos - you've been around", total));
    } else if total < 5 {
        score.adjust(-5, || "Minimalist starrer - just got here?".to_string());
    }

    let (lo, hi) = bounds.range();
    let age = score.age.clamp(lo, hi);
    let reason = score.reason.unwrap_or_else(|| {
        if total > 0 {
            format!("Based on your {} starred repos", total)
        } else {
            "Not enough data to judge you 😅".to_string()
        }
    });

    AgePrediction { age, reason }
}

/// Name and creation year of the oldest starred repository.
///
/// Repositories without a creation date are skipped; the first one wins on ties.
pub fn oldest_starred_repo(starred: &[StarredRepo]) -> Option<(String, i32)> {
    starred
        .iter()
        .filter_map(|r| r.created_at.map(|date| (date, r)))
        .fold(None, |oldest: Option<(NaiveDate, &StarredRepo)>, (date, repo)| match oldest {
            Some((best, _)) if best <= date => oldest,
            _ => Some((date, repo)),
        })
        .map(|(date, repo)| (repo.full_name.clone(), date.year()))
}

// ============================================
// Roasts and fun facts
// ============================================

/// Age bracket used to flavour roasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Young,
    Experienced,
    Veteran,
    Ancient,
}

impl AgeBracket {
    pub fn from_age(age: i32) -> Self {
        if age >= 50 {
            AgeBracket::Ancient
        } else if age >= 35 {
            AgeBracket::Veteran
        } else if age >= 25 {
            AgeBracket::Experienced
        } else {
            AgeBracket::Young
        }
    }

    /// Roasts written for this bracket.
    pub fn roasts(&self) -> &'static [&'static str] {
        match self {
            AgeBracket::Ancient => &[
                "You've been coding since dinosaurs roamed the earth",
                "Your first commit was probably on punch cards",
                "You remember when JavaScript was just a twinkle in Brendan's eye",
                "You're basically a living fossil of the tech world",
            ],
            AgeBracket::Veteran => &[
                "You've seen frameworks rise and fall like empires",
                "Your Stack Overflow account is old enough to vote",
                "You've survived more JavaScript framework wars than most",
            ],
            AgeBracket::Experienced => &[
                "You've been around the block a few times",
                "You've accumulated enough tech debt to buy a house",
                "Your GitHub is entering its teenage years",
            ],
            AgeBracket::Young => &[
                "Still fresh, but the burnout is coming",
                "You sweet summer child",
                "The imposter syndrome hasn't fully kicked in yet",
            ],
        }
    }
}

/// Pick a random coder quote.
pub fn pick_quote<P: Picker + ?Sized>(picker: &mut P) -> &'static str {
    choose(picker, CODER_QUOTES)
}

/// Pick a roast: either one for the age bracket or a general one.
pub fn pick_roast<P: Picker + ?Sized>(picker: &mut P, predicted_age: i32) -> &'static str {
    let age_roast = choose(picker, AgeBracket::from_age(predicted_age).roasts());
    let general_roast = choose(picker, ROASTS);
    if picker.pick(2) == 0 {
        age_roast
    } else {
        general_roast
    }
}

/// Inputs for [`generate_fun_facts`].
#[derive(Debug, Clone)]
pub struct FunFactsInput<'a> {
    pub coding_age: u32,
    pub oldest_starred: Option<(String, i32)>,
    pub prediction: AgePrediction,
    pub contributions: &'a [ActivityDay],
}

/// Assemble the fun facts.
pub fn generate_fun_facts<P: Picker + ?Sized>(input: FunFactsInput<'_>, picker: &mut P) -> FunFacts {
    let quote = pick_quote(picker);
    let roast = pick_roast(picker, input.prediction.age);
    let (oldest_name, oldest_year) = input.oldest_starred.unzip();

    FunFacts {
        coding_age: input.coding_age,
        predicted_age: input.prediction.age,
        predicted_age_reason: input.prediction.reason,
        oldest_starred_repo_year: oldest_year,
        oldest_starred_repo_name: oldest_name,
        favorite_time_of_day: UNKNOWN.to_string(),
        most_productive_day: most_productive_weekday(input.contributions).to_string(),
        quote: quote.to_string(),
        roast: roast.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn starred(year: i32, language: Option<&str>, topics: &[&str]) -> StarredRepo {
        StarredRepo {
            full_name: format!("someone/repo-{}", year),
            created_at: NaiveDate::from_ymd_opt(year, 6, 1),
            language: language.map(str::to_string),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn many(n: usize, year: i32, language: Option<&str>) -> Vec<StarredRepo> {
        (0..n).map(|_| starred(year, language, &[])).collect()
    }

    #[test]
    fn test_no_stars() {
        let p = predict_age(&[], 2024, &AgeBounds::default());
        // Baseline 25, minimalist starrer -5
        assert_eq!(p.age, 20);
        assert_eq!(p.reason, "Minimalist starrer - just got here?");
    }

    #[test]
    fn test_first_reason_wins() {
        let mut repos = many(10, 2011, Some("Perl"));
        repos[0].topics = vec!["Vim".to_string()];
        let p = predict_age(&repos, 2024, &AgeBounds::default());

        // 25 + 15 (2011) + 15 (Perl) + 12 (vim)
        assert_eq!(p.age, 67);
        assert_eq!(p.reason, "Repos from 2011? You've seen things.");
    }

    #[test]
    fn test_average_age_when_oldest_is_neutral() {
        // Oldest 2016 is neutral, avg 2016 is 8 years old: no creation-year reason
        let repos = many(10, 2016, Some("Rust"));
        let p = predict_age(&repos, 2024, &AgeBounds::default());
        assert_eq!(p.age, 22);
        assert_eq!(p.reason, "Rust evangelist energy 🦀");

        // All fresh, but only counts once the oldest check is silent
        let repos = many(10, 2024, None);
        let p = predict_age(&repos, 2024, &AgeBounds::default());
        assert_eq!(p.age, 17);
        assert_eq!(p.reason, "Only stars fresh repos (2024+) - zoomer energy");

        let repos = many(10, 2022, None);
        let p = predict_age(&repos, 2023, &AgeBounds::default());
        assert_eq!(p.age, 20);
        assert_eq!(p.reason, "Chasing the new hotness (avg repo < 2 years old)");
    }

    #[test]
    fn test_modern_language_reason_names_language() {
        let repos = many(6, 2019, Some("Gleam"));
        let p = predict_age(&repos, 2024, &AgeBounds::default());
        assert_eq!(p.age, 16);
        assert_eq!(p.reason, "Gleam? Bleeding edge zoomer");
    }

    #[test]
    fn test_fallback_reason() {
        let repos = many(8, 2018, Some("Go"));
        let p = predict_age(&repos, 2024, &AgeBounds::default());
        assert_eq!(p.age, 25);
        assert_eq!(p.reason, "Based on your 8 starred repos");
    }

    #[test]
    fn test_clamped_upper() {
        let mut repos = many(10_000, 1995, Some("COBOL"));
        repos[0].topics = vec!["xml".into(), "jquery".into(), "emacs".into(), "linux".into()];
        let p = predict_age(&repos, 2024, &AgeBounds::default());
        assert_eq!(p.age, 70);

        let wide = AgeBounds {
            baseline: 25,
            min: 12,
            max: 99,
        };
        assert_eq!(predict_age(&repos, 2024, &wide).age, 99);
    }

    #[test]
    fn test_clamped_lower() {
        let mut repos = many(3, 2024, Some("Zig"));
        repos[0].topics = vec!["web3".into(), "llm".into(), "discord-bot".into()];
        let p = predict_age(&repos, 2024, &AgeBounds::default());
        assert_eq!(p.age, 16);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let inverted = AgeBounds {
            baseline: 25,
            min: 70,
            max: 16,
        };
        assert_eq!(inverted.range(), (16, 70));

        let old = many(10_000, 1995, Some("COBOL"));
        assert_eq!(predict_age(&old, 2024, &inverted).age, 70);
        let young = many(3, 2024, Some("Zig"));
        assert_eq!(predict_age(&young, 2024, &inverted).age, 16);
    }

    #[test]
    fn test_oldest_starred_repo() {
        let mut repos = vec![
            starred(2015, None, &[]),
            starred(2008, None, &[]),
            starred(2019, None, &[]),
        ];
        repos.push(StarredRepo {
            full_name: "undated/repo".into(),
            ..Default::default()
        });
        assert_eq!(
            oldest_starred_repo(&repos),
            Some(("someone/repo-2008".to_string(), 2008))
        );
        assert_eq!(oldest_starred_repo(&[]), None);
    }

    #[test]
    fn test_age_bracket() {
        assert_eq!(AgeBracket::from_age(16), AgeBracket::Young);
        assert_eq!(AgeBracket::from_age(25), AgeBracket::Experienced);
        assert_eq!(AgeBracket::from_age(35), AgeBracket::Veteran);
        assert_eq!(AgeBracket::from_age(50), AgeBracket::Ancient);
    }

    #[test]
    fn test_fixed_picker_is_deterministic() {
        let mut picker = FixedPicker(0);
        assert_eq!(pick_quote(&mut picker), "Touch some grass dude 🌱");
        assert_eq!(pick_roast(&mut picker, 60), "You've been coding since dinosaurs roamed the earth");

        let mut picker = FixedPicker(1);
        assert_eq!(
            pick_roast(&mut picker, 20),
            "Your commit graph looks like a cry for help"
        );

        // Index past the end clamps to the last entry
        let mut picker = FixedPicker(usize::MAX);
        assert_eq!(pick_quote(&mut picker), "sudo touch grass");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let mut b = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        for age in [18, 30, 40, 65] {
            assert_eq!(pick_roast(&mut a, age), pick_roast(&mut b, age));
            assert_eq!(pick_quote(&mut a), pick_quote(&mut b));
        }
    }

    #[test]
    fn test_generate_fun_facts() {
        let days = vec![ActivityDay::new(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), 4)];
        let facts = generate_fun_facts(
            FunFactsInput {
                coding_age: 7,
                oldest_starred: Some(("torvalds/linux".to_string(), 2011)),
                prediction: AgePrediction {
                    age: 40,
                    reason: "Repos from 2011? You've seen things.".to_string(),
                },
                contributions: &days,
            },
            &mut FixedPicker(0),
        );

        assert_eq!(facts.coding_age, 7);
        assert_eq!(facts.predicted_age, 40);
        assert_eq!(facts.oldest_starred_repo_year, Some(2011));
        assert_eq!(facts.oldest_starred_repo_name.as_deref(), Some("torvalds/linux"));
        assert_eq!(facts.favorite_time_of_day, "Unknown");
        assert_eq!(facts.most_productive_day, "Wednesday");
        assert_eq!(facts.quote, CODER_QUOTES[0]);
        assert_eq!(facts.roast, AgeBracket::Veteran.roasts()[0]);
    }
}
