mod error;
mod fetcher;
mod parser;
mod roster;
mod settings;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use parser::matchups::Matchup;
use settings::Settings;

#[derive(Parser)]
#[command(name = "pbp_matchups", about = "Basketball play-by-play scraper and lineup matchup splitter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch play-by-play lines from a game page and save them
    Fetch {
        /// Play-by-play page URL (default: configured game_url)
        #[arg(long)]
        url: Option<String>,
        /// Output text file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Split saved play lines into matchups
    Segment {
        /// Play-by-play text file
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Starting lineups (JSON with team1/team2)
        #[arg(short, long)]
        rosters: Option<PathBuf>,
        /// Output JSON file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Fetch + segment in one pipeline (lines are still saved)
    Run {
        #[arg(long)]
        url: Option<String>,
        #[arg(short, long)]
        rosters: Option<PathBuf>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Matchups overview table
    Summary {
        /// Matchups JSON file
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match Settings::load() {
        Ok(settings) => dispatch(cli.command, &settings).await,
        Err(e) => Err(e),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Fetch { url, out } => {
            let url = url.unwrap_or_else(|| settings.game_url.clone());
            let out = out.unwrap_or_else(|| settings.lines_path.clone());
            let lines = fetcher::fetch_play_by_play(settings, &url).await?;
            println!("Fetched {} entries.", lines.len());
            store::save_lines(&out, &lines)?;
            println!("Play-by-play saved to {}", out.display());
            Ok(())
        }
        Commands::Segment { input, rosters, out } => {
            let input = input.unwrap_or_else(|| settings.lines_path.clone());
            let rosters = rosters.unwrap_or_else(|| settings.rosters_path.clone());
            let out = out.unwrap_or_else(|| settings.matchups_path.clone());
            let text = store::load_text(&input)?;
            let starters = store::load_rosters(&rosters)?;
            println!("Processing play-by-play data from {}...", input.display());
            let matchups = parser::parse_play_by_play(&text, &starters);
            store::save_matchups(&out, &matchups)?;
            println!("Saved {} matchups to {}", matchups.len(), out.display());
            Ok(())
        }
        Commands::Run { url, rosters, out } => {
            let url = url.unwrap_or_else(|| settings.game_url.clone());
            let rosters = rosters.unwrap_or_else(|| settings.rosters_path.clone());
            let out = out.unwrap_or_else(|| settings.matchups_path.clone());

            // Fail on bad lineups before spending a browser session
            let starters = store::load_rosters(&rosters)?;

            // Phase 1: Fetch
            let t_fetch = Instant::now();
            let lines = fetcher::fetch_play_by_play(settings, &url).await?;
            store::save_lines(&settings.lines_path, &lines)?;
            println!(
                "Fetched {} entries in {:.1}s",
                lines.len(),
                t_fetch.elapsed().as_secs_f64()
            );

            // Phase 2: Segment from the saved artifact
            let lines = store::load_lines(&settings.lines_path)?;
            let matchups = parser::matchups::segment(&lines, &starters);
            store::save_matchups(&out, &matchups)?;
            println!("Saved {} matchups to {}", matchups.len(), out.display());
            Ok(())
        }
        Commands::Summary { input, limit } => {
            let input = input.unwrap_or_else(|| settings.matchups_path.clone());
            let matchups = store::load_matchups(&input)?;
            if matchups.is_empty() {
                println!("No matchups found.");
                return Ok(());
            }
            print_summary(&matchups, limit);
            Ok(())
        }
    }
}

fn print_summary(matchups: &[Matchup], limit: usize) {
    println!(
        "{:>3} | {:>5} | {:>6} | {:<40} | {:<40}",
        "#", "Time", "Events", "Team 1", "Team 2"
    );
    println!("{}", "-".repeat(106));

    for (i, m) in matchups.iter().take(limit).enumerate() {
        println!(
            "{:>3} | {:>5} | {:>6} | {:<40} | {:<40}",
            i + 1,
            format_clock(m.duration_seconds),
            m.events.len(),
            truncate(&lineup(m.rosters.team1()), 40),
            truncate(&lineup(m.rosters.team2()), 40),
        );
    }

    let total: u32 = matchups.iter().map(|m| m.duration_seconds).sum();
    println!(
        "\n{} matchups | {} tracked",
        matchups.len(),
        format_clock(total)
    );
}

/// Last names only, to keep the table narrow.
fn lineup(players: &[String]) -> String {
    players
        .iter()
        .map(|p| p.split_whitespace().nth(1).unwrap_or(p.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(165), "2:45");
        assert_eq!(format_clock(7), "0:07");
        assert_eq!(format_clock(930), "15:30");
    }

    #[test]
    fn lineup_uses_second_word() {
        let players = vec!["P.J. Washington".to_string(), "Dereck Lively II".to_string(), "Nene".to_string()];
        assert_eq!(lineup(&players), "Washington, Lively, Nene");
    }

    #[test]
    fn truncate_long() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
