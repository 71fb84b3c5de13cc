//! ghwrapped - GitHub Year in Review CLI
//!
//! Turn a fetched GitHub activity bundle into a Spotify Wrapped-style summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use ghwrapped_core::analytics::{generate_wrapped, main_title, run_pipeline, Picker, WrappedConfig};
use ghwrapped_core::format::{format_number, format_relative_time_opt};
use ghwrapped_core::{Config, Database, MonthBucket, StatusRecord, WrappedInput, WrappedRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(name = "ghwrapped")]
#[command(about = "GitHub Wrapped - Your Year in Review")]
#[command(version)]
struct Args {
    /// Input bundle (JSON) with the fetched profile, activity and repositories
    #[arg(long, conflicts_with_all = ["show", "status"])]
    input: Option<PathBuf>,

    /// Username to store the result under (default: the bundle's profile)
    #[arg(long, requires = "input")]
    user: Option<String>,

    /// Print the stored wrapped for a user instead of generating one
    #[arg(long, value_name = "USERNAME", conflicts_with = "status")]
    show: Option<String>,

    /// Print the generation status for a user
    #[arg(long, value_name = "USERNAME")]
    status: Option<String>,

    /// Year to generate or show (default: the bundle's year, or the latest stored)
    #[arg(long)]
    year: Option<i32>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Seed for quote and roast selection (reproducible output)
    #[arg(long)]
    seed: Option<u64>,

    /// Do not store the result
    #[arg(long, requires = "input")]
    no_save: bool,

    /// Also print log output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    config.logging.stderr |= args.verbose;
    let _log_guard = match ghwrapped_core::logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {}", e);
            None
        }
    };

    if let Some(username) = &args.status {
        let db = open_database()?;
        let year = args.year.unwrap_or_else(current_year);
        let status = db
            .get_status(username, year)
            .context("failed to read status")?;
        print_status(username, year, status.as_ref());
        return Ok(());
    }

    let record = if let Some(username) = &args.show {
        let db = open_database()?;
        let year = match args.year {
            Some(year) => year,
            None => db
                .latest_wrapped_year(username)?
                .with_context(|| format!("no wrapped stored for {}", username))?,
        };
        db.require_wrapped(username, year)
            .context("failed to load wrapped")?
    } else if let Some(path) = &args.input {
        generate(&args, &config, path)?
    } else {
        anyhow::bail!("Nothing to do. Use --input <bundle.json>, --show <user> or --status <user>");
    };

    match args.export.as_deref() {
        Some("json") => print_json(&record)?,
        Some("md") => print_markdown(&record),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&record),
    }

    Ok(())
}

fn open_database() -> Result<Database> {
    let db = Database::open(&Config::database_path()).context("failed to open database")?;
    db.migrate().context("failed to run migrations")?;
    Ok(db)
}

fn current_year() -> i32 {
    use chrono::Datelike;
    Local::now().year()
}

fn generate(args: &Args, config: &Config, path: &Path) -> Result<WrappedRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut input = WrappedInput::from_json(&json)
        .with_context(|| format!("invalid input bundle {}", path.display()))?;
    if let Some(year) = args.year {
        input.year = year;
    }

    let wrapped_config = WrappedConfig::from(&config.scoring);
    let today: NaiveDate = Local::now().date_naive();
    let mut picker: Box<dyn Picker> = match args.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    if args.no_save {
        return generate_wrapped(&input, &wrapped_config, today, picker.as_mut())
            .context("failed to generate wrapped");
    }

    let username = args
        .user
        .clone()
        .or_else(|| input.profile.as_ref().map(|p| p.username.clone()))
        .context("bundle has no profile; pass --user to record the failure")?;

    let db = open_database()?;
    run_pipeline(
        &db,
        &username,
        &input,
        &wrapped_config,
        today,
        picker.as_mut(),
    )
    .context("failed to generate wrapped")
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

fn print_status(username: &str, year: i32, status: Option<&StatusRecord>) {
    let Some(status) = status else {
        println!("No wrapped generation recorded for {} in {}.", username, year);
        return;
    };

    println!("{} {}: {} ({}%)", status.username, status.year, status.status, status.progress);
    println!("   Started:   {}", format_relative_time_opt(status.started_at));
    println!("   Completed: {}", format_relative_time_opt(status.completed_at));
    if let Some(error) = &status.error {
        println!("   Error:     {}", error);
    }
}

fn print_terminal(record: &WrappedRecord) {
    let title = format!("🎉 @{}'s {} GITHUB WRAPPED 🎉", record.username, record.year);
    let stats = &record.stats;

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if let Some(main) = main_title(&record.titles) {
        println!("{} {} · Level {}", main.icon, main.title, record.level);
    } else {
        println!("Level {}", record.level);
    }
    println!();

    // The Numbers
    println!("📊 THE NUMBERS");
    println!(
        "   Commits:  {:<12} Pull requests: {} ({} merged)",
        format_number(stats.total_commits),
        format_number(stats.total_prs),
        format_number(stats.total_prs_merged)
    );
    println!(
        "   Issues:   {:<12} Stars earned:  {}",
        format_number(stats.total_issues),
        format_number(stats.total_stars)
    );
    println!("   Days coded: {}", stats.days_coded_this_year);
    if let Some(date) = stats.most_commits_day.date {
        println!(
            "   Best day:   {} ({} contribution{})",
            date.format("%b %d"),
            stats.most_commits_day.count,
            plural(u64::from(stats.most_commits_day.count))
        );
    }
    println!();

    // Streaks
    println!("🔥 STREAKS");
    println!(
        "   Current:  {} day{}",
        record.streak.current_streak,
        plural(u64::from(record.streak.current_streak))
    );
    if record.streak.longest_streak > 0 {
        let streak_dates = match (record.streak.longest_streak_start, record.streak.longest_streak_end) {
            (Some(start), Some(end)) => {
                format!(" ({} - {})", start.format("%b %d"), end.format("%b %d"))
            }
            _ => String::new(),
        };
        println!(
            "   Longest:  {} day{}{}",
            record.streak.longest_streak,
            plural(u64::from(record.streak.longest_streak)),
            streak_dates
        );
    }
    println!();

    // Languages
    if !record.languages.is_empty() {
        println!("💻 TOP LANGUAGES");
        for lang in record.languages.iter().take(5) {
            println!(
                "   {:<12} {:>5.1}%  {}",
                lang.name,
                lang.percentage,
                bar(lang.percentage.round() as u64, 100, 30)
            );
        }
        println!();
    }

    // Repositories
    if !record.top_repos.is_empty() {
        println!("⭐ TOP REPOSITORIES");
        for (i, repo) in record.top_repos.iter().enumerate() {
            let rank = match i {
                0 => "🥇".to_string(),
                1 => "🥈".to_string(),
                2 => "🥉".to_string(),
                _ => format!("{}.", i + 1),
            };
            println!(
                "   {} {:<30} {:>6} ★",
                rank,
                repo.full_name,
                format_number(repo.stars)
            );
        }
        println!();
    }

    // Timeline
    print_timeline(&record.timeline);

    // Titles
    if !record.titles.is_empty() {
        println!("🏆 TITLES");
        for t in &record.titles {
            println!("   {} {} - {}", t.icon, t.title, t.description);
        }
        println!();
    }

    // Squad
    if !record.squad.is_empty() {
        println!("👥 YOUR SQUAD");
        for member in &record.squad {
            println!(
                "   @{:<24} {:<12} {} shared project{}",
                member.username,
                member.collaboration_type.as_str(),
                member.shared_projects,
                plural(u64::from(member.shared_projects))
            );
        }
        println!();
    }

    // Fun facts
    let facts = &record.fun_facts;
    println!("🎭 FUN FACTS");
    println!(
        "   On GitHub for {} year{}",
        facts.coding_age,
        plural(u64::from(facts.coding_age))
    );
    println!(
        "   Developer age: {} ({})",
        facts.predicted_age, facts.predicted_age_reason
    );
    if let (Some(name), Some(year)) = (&facts.oldest_starred_repo_name, facts.oldest_starred_repo_year) {
        println!("   Oldest star:   {} ({})", name, year);
    }
    println!("   Favorite day:  {}", facts.most_productive_day);
    println!();
    println!("   \"{}\"", facts.quote);
    println!("   🔥 {}", facts.roast);
    println!();
}

fn print_timeline(timeline: &[MonthBucket]) {
    let max = timeline.iter().map(|m| m.commits).max().unwrap_or(0);
    if max == 0 {
        return;
    }

    println!("📅 TIMELINE");
    for month in timeline {
        let note = month.highlights.first().map(String::as_str).unwrap_or("");
        println!(
            "   {:<4} {:<25} {:>6}  {}",
            month.month.get(..3).unwrap_or(month.month.as_str()),
            bar(month.commits, max, 25),
            format_number(month.commits),
            note
        );
    }
    println!();
}

fn print_markdown(record: &WrappedRecord) {
    let stats = &record.stats;

    println!("# 🎉 @{}'s {} GitHub Wrapped 🎉", record.username, record.year);
    println!();
    if let Some(main) = main_title(&record.titles) {
        println!("**{} {}** · Level {}", main.icon, main.title, record.level);
    } else {
        println!("**Level {}**", record.level);
    }
    println!();

    // Summary table
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Commits | {} |", stats.total_commits);
    println!("| Pull Requests | {} |", stats.total_prs);
    println!("| PRs Merged | {} |", stats.total_prs_merged);
    println!("| Issues | {} |", stats.total_issues);
    println!("| Stars Earned | {} |", stats.total_stars);
    println!("| Days Coded | {} |", stats.days_coded_this_year);
    println!("| Longest Streak | {} days |", record.streak.longest_streak);
    println!("| Current Streak | {} days |", record.streak.current_streak);
    println!();

    if !record.languages.is_empty() {
        println!("## Top Languages");
        println!();
        for lang in &record.languages {
            println!("- **{}** - {}%", lang.name, lang.percentage);
        }
        println!();
    }

    if !record.top_repos.is_empty() {
        println!("## Top Repositories");
        println!();
        for (i, repo) in record.top_repos.iter().enumerate() {
            println!(
                "{}. [{}]({}) - {} stars",
                i + 1,
                repo.full_name,
                repo.url,
                repo.stars
            );
        }
        println!();
    }

    println!("## Timeline");
    println!();
    println!("| Month | Commits | |");
    println!("|-------|---------|---|");
    for month in &record.timeline {
        println!(
            "| {} | {} | {} |",
            month.month,
            month.commits,
            month.highlights.join(" ")
        );
    }
    println!();

    if !record.titles.is_empty() {
        println!("## Titles");
        println!();
        for t in &record.titles {
            println!("- {} **{}** - {}", t.icon, t.title, t.description);
        }
        println!();
    }

    if !record.squad.is_empty() {
        println!("## Squad");
        println!();
        for member in &record.squad {
            println!(
                "- **@{}** ({}) - {} shared projects",
                member.username,
                member.collaboration_type.as_str(),
                member.shared_projects
            );
        }
        println!();
    }

    let facts = &record.fun_facts;
    println!("## Fun Facts");
    println!();
    println!("- **Years on GitHub:** {}", facts.coding_age);
    println!(
        "- **Developer age:** {} *({})*",
        facts.predicted_age, facts.predicted_age_reason
    );
    if let (Some(name), Some(year)) = (&facts.oldest_starred_repo_name, facts.oldest_starred_repo_year) {
        println!("- **Oldest starred repo:** {} ({})", name, year);
    }
    println!("- **Most productive day:** {}", facts.most_productive_day);
    println!();
    println!("> {}", facts.quote);
    println!();
    println!("*{}*", facts.roast);
}

fn print_json(record: &WrappedRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
