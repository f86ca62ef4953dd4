use crate::club::TeamLineup;
use crate::error::{SimulationError, SimulationResult};
use crate::league::{
    LeagueTable, LeagueTableEntry, PlayerSeasonStats, PlayerStatTracker, SeasonCalendar,
    SeasonSettings,
};
use crate::r#match::{MatchEvent, MatchResult, MatchSimulator};
use crate::roster::LeagueRoster;
use crate::utils::{mix_seed, Logging, TimeEstimation};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop signal, checked between matchweeks only.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchLog {
    pub fixture_id: u32,
    pub matchweek: u32,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u8,
    pub away_goals: u8,
    pub events: Vec<MatchEvent>,
}

impl MatchLog {
    fn new(fixture_id: u32, matchweek: u32, result: &MatchResult) -> Self {
        MatchLog {
            fixture_id,
            matchweek,
            date: result.date,
            home_team: result.home_team.clone(),
            away_team: result.away_team.clone(),
            home_goals: result.home_goals,
            away_goals: result.away_goals,
            events: result.events.clone(),
        }
    }
}

impl Display for MatchLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MW{} {}: {} {} - {} {}",
            self.matchweek,
            self.date,
            self.home_team,
            self.home_goals,
            self.away_goals,
            self.away_team
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchweekReport {
    pub matchweek: u32,
    pub date: Option<NaiveDate>,
    pub played: u32,
    pub goals: u32,
    pub skipped: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonSummary {
    pub season_year: String,
    pub champion: Option<String>,
    pub runner_up: Option<String>,
    pub table: Vec<LeagueTableEntry>,
    pub total_matches: u32,
    pub total_goals: u32,
    pub goals_per_match: f32,
    pub best_attack: Option<LeagueTableEntry>,
    pub best_defense: Option<LeagueTableEntry>,
    pub matches: Vec<MatchLog>,
    pub player_stats: Vec<PlayerSeasonStats>,
    pub top_scorers: Vec<PlayerSeasonStats>,
    pub top_assisters: Vec<PlayerSeasonStats>,
    pub skipped_fixtures: u32,
    pub cancelled: bool,
}

// one fixture with both squads moved out of the season for the parallel pass
struct FixtureJob {
    fixture_id: u32,
    date: NaiveDate,
    home_key: String,
    away_key: String,
    home: TeamLineup,
    away: TeamLineup,
}

pub struct Season {
    pub settings: SeasonSettings,
    pub calendar: SeasonCalendar,
    pub table: LeagueTable,
    pub statistics: PlayerStatTracker,

    lineups: BTreeMap<String, TeamLineup>,
    simulator: MatchSimulator,
    match_logs: Vec<MatchLog>,
    skipped_fixtures: u32,
    last_matchday: Option<NaiveDate>,
}

impl Season {
    /// Schedules a season for every team in the roster, in alphabetical order.
    pub fn new(
        settings: SeasonSettings,
        roster: BTreeMap<String, TeamLineup>,
    ) -> SimulationResult<Self> {
        settings.validate()?;

        for (name, lineup) in &roster {
            if *name != lineup.team_name {
                return Err(SimulationError::Configuration(format!(
                    "roster key '{}' does not match lineup team '{}'",
                    name, lineup.team_name
                )));
            }
        }

        let teams: Vec<String> = roster.keys().cloned().collect();

        let calendar = SeasonCalendar::generate(
            &settings.season_year,
            &teams,
            settings.start_date,
            settings.winter_break,
        )?;

        Ok(Self::assemble(settings, calendar, roster))
    }

    /// Builds every lineup from roster data, seeded from the season seed.
    pub fn from_roster(settings: SeasonSettings, roster: LeagueRoster) -> SimulationResult<Self> {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let lineups = roster.into_lineups(&mut rng)?;

        Self::new(settings, lineups)
    }

    /// Uses a prepared calendar; fixtures whose teams have no lineup are skipped when reached.
    pub fn from_calendar(
        settings: SeasonSettings,
        calendar: SeasonCalendar,
        lineups: BTreeMap<String, TeamLineup>,
    ) -> SimulationResult<Self> {
        settings.validate()?;

        Ok(Self::assemble(settings, calendar, lineups))
    }

    fn assemble(
        settings: SeasonSettings,
        calendar: SeasonCalendar,
        lineups: BTreeMap<String, TeamLineup>,
    ) -> Self {
        Season {
            simulator: MatchSimulator::new(settings.home_advantage),
            table: LeagueTable::new(&calendar.teams),
            statistics: PlayerStatTracker::new(),
            settings,
            calendar,
            lineups,
            match_logs: Vec::new(),
            skipped_fixtures: 0,
            last_matchday: None,
        }
    }

    pub fn lineup(&self, team: &str) -> Option<&TeamLineup> {
        self.lineups.get(team)
    }

    pub fn lineups(&self) -> impl Iterator<Item = &TeamLineup> {
        self.lineups.values()
    }

    pub fn match_logs(&self) -> &[MatchLog] {
        &self.match_logs
    }

    pub fn skipped_fixtures(&self) -> u32 {
        self.skipped_fixtures
    }

    pub fn is_finished(&self) -> bool {
        self.calendar.is_finished()
    }

    pub fn simulate_next_matchweek(&mut self) -> SimulationResult<MatchweekReport> {
        self.simulate_matchweek(self.calendar.current_matchweek)
    }

    /// Plays one matchweek. Only the next unplayed matchweek is accepted.
    pub fn simulate_matchweek(&mut self, matchweek: u32) -> SimulationResult<MatchweekReport> {
        let expected = self.calendar.current_matchweek;

        if matchweek != expected || matchweek > self.calendar.total_matchweeks() {
            return Err(SimulationError::OutOfOrder {
                requested: matchweek,
                expected,
            });
        }

        let date = self.calendar.matchweek_date(matchweek);

        if let Some(date) = date {
            self.prepare_lineups(date);
            self.last_matchday = Some(date);
        }

        let (jobs, mut skipped) = self.take_jobs(matchweek);

        let mut report = MatchweekReport {
            matchweek,
            date,
            played: 0,
            goals: 0,
            skipped: 0,
        };

        let seed = self.settings.seed;
        let simulator = &self.simulator;

        let played: Vec<(FixtureJob, SimulationResult<MatchResult>)> = jobs
            .into_par_iter()
            .map(|mut job| {
                let mut rng = StdRng::seed_from_u64(mix_seed(seed, job.fixture_id));
                let message = format!("play match: {} vs {}", job.home_key, job.away_key);

                let result = Logging::estimate_result(
                    || simulator.simulate(&mut job.home, &mut job.away, job.date, &mut rng),
                    &message,
                );

                (job, result)
            })
            .collect();

        // squads go back before any result is applied
        let mut outcomes = Vec::with_capacity(played.len());
        for (job, result) in played {
            self.lineups.insert(job.home_key, job.home);
            self.lineups.insert(job.away_key, job.away);
            outcomes.push((job.fixture_id, result));
        }

        // every result is checked before the first one is recorded
        let mut results = Vec::with_capacity(outcomes.len());
        for (fixture_id, result) in outcomes {
            match result {
                Ok(result) => {
                    self.check_result(fixture_id, &result)?;
                    results.push((fixture_id, result));
                }
                Err(err) if err.is_recoverable() => {
                    warn!("fixture {} skipped: {}", fixture_id, err);
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        for (fixture_id, result) in results {
            report.played += 1;
            report.goals += result.total_goals();
            self.record_result(fixture_id, matchweek, result)?;
        }

        self.skipped_fixtures += skipped;
        report.skipped = skipped;

        self.calendar.finish_matchweek(matchweek);

        info!(
            "📅 {} matchweek {}/{}: {} matches, {} goals, {} skipped, leader {}",
            self.settings.season_year,
            matchweek,
            self.calendar.total_matchweeks(),
            report.played,
            report.goals,
            report.skipped,
            self.table
                .leader()
                .map(|row| row.team_name)
                .unwrap_or_else(|| "-".to_string())
        );

        Ok(report)
    }

    /// Runs the remaining matchweeks, stopping early when `token` is cancelled.
    pub fn simulate_season(
        &mut self,
        token: &CancellationToken,
    ) -> SimulationResult<SeasonSummary> {
        info!(
            "🏁 season {} started: {} teams, {} fixtures, seed {}",
            self.settings.season_year,
            self.calendar.teams.len(),
            self.calendar.fixtures.len(),
            self.settings.seed
        );

        let (cancelled, elapsed) = TimeEstimation::estimate(|| self.run_matchweeks(token));
        let cancelled = cancelled?;

        let summary = self.summary(cancelled);

        if cancelled {
            info!(
                "⏹️ season {} cancelled after {} matches ({} ms)",
                summary.season_year, summary.total_matches, elapsed
            );
        } else {
            info!(
                "🏆 season {} finished in {} ms: champion {}, {} goals in {} matches",
                summary.season_year,
                elapsed,
                summary.champion.as_deref().unwrap_or("-"),
                summary.total_goals,
                summary.total_matches
            );
        }

        Ok(summary)
    }

    fn run_matchweeks(&mut self, token: &CancellationToken) -> SimulationResult<bool> {
        while !self.calendar.is_finished() {
            if token.is_cancelled() {
                return Ok(true);
            }

            self.simulate_next_matchweek()?;
        }

        Ok(false)
    }

    pub fn summary(&self, cancelled: bool) -> SeasonSummary {
        let table = self.table.sorted_table();
        let total_matches = self.match_logs.len() as u32;
        let total_goals: u32 = self
            .match_logs
            .iter()
            .map(|log| log.home_goals as u32 + log.away_goals as u32)
            .sum();

        let has_champion = !cancelled && total_matches > 0;
        let top = self.settings.top_players;

        SeasonSummary {
            season_year: self.settings.season_year.clone(),
            champion: table
                .first()
                .filter(|_| has_champion)
                .map(|row| row.team_name.clone()),
            runner_up: table
                .get(1)
                .filter(|_| has_champion)
                .map(|row| row.team_name.clone()),
            total_matches,
            total_goals,
            goals_per_match: if total_matches == 0 {
                0.0
            } else {
                total_goals as f32 / total_matches as f32
            },
            best_attack: self.table.best_attack(),
            best_defense: self.table.best_defense(),
            table,
            matches: self.match_logs.clone(),
            player_stats: self.statistics.all(),
            top_scorers: self.statistics.top_scorers(top),
            top_assisters: self.statistics.top_assisters(top),
            skipped_fixtures: self.skipped_fixtures,
            cancelled,
        }
    }

    fn prepare_lineups(&mut self, date: NaiveDate) {
        let rest_days = self
            .last_matchday
            .map(|previous| (date - previous).num_days().clamp(0, u16::MAX as i64) as u16)
            .unwrap_or(0);

        let adaptive = self.settings.adaptive_formations;

        self.lineups.par_iter_mut().for_each(|(_, lineup)| {
            if rest_days > 0 {
                lineup.rest(rest_days);
            }

            if adaptive {
                let tactic = lineup.recommend_formation();
                lineup.set_tactic(tactic);
            }

            lineup.select_starters();
        });
    }

    /// Moves both squads of every scheduled fixture out of the roster, in fixture id order.
    /// Also returns how many fixtures had no lineup to move.
    fn take_jobs(&mut self, matchweek: u32) -> (Vec<FixtureJob>, u32) {
        let mut fixtures: Vec<(u32, String, String, NaiveDate)> = self
            .calendar
            .matchweek_fixtures(matchweek)
            .into_iter()
            .filter(|fixture| fixture.is_scheduled())
            .map(|f| (f.id, f.home_team.clone(), f.away_team.clone(), f.date))
            .collect();

        fixtures.sort_by_key(|(id, ..)| *id);

        let mut jobs = Vec::with_capacity(fixtures.len());
        let mut skipped = 0;

        for (fixture_id, home_key, away_key, date) in fixtures {
            let home = self.lineups.remove(&home_key);
            let away = self.lineups.remove(&away_key);

            match (home, away) {
                (Some(home), Some(away)) => jobs.push(FixtureJob {
                    fixture_id,
                    date,
                    home_key,
                    away_key,
                    home,
                    away,
                }),
                (home, away) => {
                    let missing = if home.is_none() { &home_key } else { &away_key };
                    let err = SimulationError::MissingLineup {
                        fixture_id,
                        team: missing.clone(),
                    };

                    warn!("fixture {} skipped: {}", fixture_id, err);
                    skipped += 1;

                    if let Some(home) = home {
                        self.lineups.insert(home_key, home);
                    }
                    if let Some(away) = away {
                        self.lineups.insert(away_key, away);
                    }
                }
            }
        }

        (jobs, skipped)
    }

    fn check_result(&self, fixture_id: u32, result: &MatchResult) -> SimulationResult<()> {
        match self.calendar.fixture(fixture_id) {
            Some(fixture) if fixture.is_scheduled() => self.table.check(result),
            Some(fixture) => Err(SimulationError::Invariant(format!(
                "fixture {} is {:?}, it cannot take a result",
                fixture_id, fixture.status
            ))),
            None => Err(SimulationError::Invariant(format!(
                "fixture {} disappeared from the calendar",
                fixture_id
            ))),
        }
    }

    fn record_result(
        &mut self,
        fixture_id: u32,
        matchweek: u32,
        result: MatchResult,
    ) -> SimulationResult<()> {
        self.check_result(fixture_id, &result)?;

        self.table.update(&result)?;
        self.statistics.update(&result);
        self.match_logs.push(MatchLog::new(fixture_id, matchweek, &result));

        debug!("MW{} #{}: {}", matchweek, fixture_id, result.score_line());

        match self.calendar.fixture_mut(fixture_id) {
            Some(fixture) => fixture.complete(result),
            None => Err(SimulationError::Invariant(format!(
                "fixture {} disappeared from the calendar",
                fixture_id
            ))),
        }
    }
}
