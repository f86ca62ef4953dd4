use env_logger::Env;
use log::{info, warn};
use season_core::utils::TimeEstimation;
use season_core::{CancellationToken, RosterGenerator, RosterProvider, Season, SeasonSettings};
use std::env;
use std::str::FromStr;

const LEAGUE: &str = "premier_league";
const DEFAULT_TEAMS: usize = 20;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default()
        .default_filter_or("info")
    ).init();

    let mut settings = SeasonSettings::default();

    if let Some(seed) = env_value::<u64>("SEASON_SEED") {
        settings.seed = seed;
    }

    let teams = env_value::<usize>("SEASON_TEAMS").unwrap_or(DEFAULT_TEAMS);

    let generator = RosterGenerator::new(settings.seed, teams);
    let (roster, estimated) = TimeEstimation::estimate(|| generator.load_league(LEAGUE));
    let roster = roster?;

    info!("roster generated: {} teams, {} ms", roster.teams.len(), estimated);

    let mut season = Season::from_roster(settings, roster)?;
    let summary = season.simulate_season(&CancellationToken::new())?;

    info!("final table {}", summary.season_year);

    for (idx, row) in summary.table.iter().enumerate() {
        info!(
            "{:>2}. {:<24} {:>2} {:>2} {:>2} {:>2} {:>3}:{:<3} {:>+4} {:>3}",
            idx + 1,
            row.team_name,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_difference(),
            row.points
        );
    }

    info!(
        "{} matches, {} goals ({:.2} per match)",
        summary.total_matches, summary.total_goals, summary.goals_per_match
    );

    if let Some(best_attack) = &summary.best_attack {
        info!("best attack: {} ({} goals)", best_attack.team_name, best_attack.goals_for);
    }

    if let Some(best_defense) = &summary.best_defense {
        info!("best defense: {} ({} conceded)", best_defense.team_name, best_defense.goals_against);
    }

    for (idx, scorer) in summary.top_scorers.iter().enumerate() {
        info!(
            "⚽ {:>2}. {} ({}) {} goals, {} assists",
            idx + 1,
            scorer.name,
            scorer.team,
            scorer.statistics.goals,
            scorer.statistics.assists
        );
    }

    Ok(())
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;

    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring {}={}, not a valid number", name, value);
            None
        }
    }
}
