use crate::error::{invariant, SimulationError, SimulationResult};
use crate::r#match::MatchResult;
use chrono::{Duration, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DAYS_BETWEEN_MATCHWEEKS: i64 = 7;
const INTERNATIONAL_BREAK_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinterBreak {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WinterBreak {
    /// `[start, end)`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FixtureStatus {
    Scheduled,
    Completed,
    Postponed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fixture {
    pub id: u32,
    pub matchweek: u32,
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDate,
    pub status: FixtureStatus,
    pub result: Option<MatchResult>,
}

impl Fixture {
    pub fn new(id: u32, matchweek: u32, home_team: &str, away_team: &str, date: NaiveDate) -> Self {
        Fixture {
            id,
            matchweek,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            date,
            status: FixtureStatus::Scheduled,
            result: None,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == FixtureStatus::Completed
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.status == FixtureStatus::Scheduled
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Attaches the result. A fixture can only be completed once.
    pub fn complete(&mut self, result: MatchResult) -> SimulationResult<()> {
        invariant(self.is_scheduled(), || {
            format!("fixture {} completed while {:?}", self.id, self.status)
        })?;

        self.result = Some(result);
        self.status = FixtureStatus::Completed;

        Ok(())
    }

    /// Returns false when the fixture has already been played.
    pub fn postpone(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }

        self.status = FixtureStatus::Postponed;
        true
    }
}

/// Double round-robin calendar for one season.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonCalendar {
    pub season_year: String,
    pub teams: Vec<String>,
    pub fixtures: Vec<Fixture>,
    pub start_date: NaiveDate,
    pub winter_break: Option<WinterBreak>,

    pub current_matchweek: u32,
    pub completed_matchweeks: u32,
}

impl SeasonCalendar {
    pub fn generate(
        season_year: &str,
        teams: &[String],
        start_date: NaiveDate,
        winter_break: Option<WinterBreak>,
    ) -> SimulationResult<Self> {
        validate_teams(teams)?;

        let first_round = round_robin(teams);
        let second_round: Vec<Vec<(usize, usize)>> = first_round
            .iter()
            .map(|round| round.iter().map(|&(home, away)| (away, home)).collect())
            .collect();

        let mut fixtures = Vec::with_capacity(teams.len() * (teams.len() - 1));
        let mut date = start_date;

        for (round_idx, round) in first_round.iter().chain(second_round.iter()).enumerate() {
            let matchweek = round_idx as u32 + 1;

            if let Some(winter_break) = winter_break
                && winter_break.contains(date)
            {
                date = winter_break.end;
            }

            for &(home, away) in round {
                let id = fixtures.len() as u32 + 1;
                fixtures.push(Fixture::new(id, matchweek, &teams[home], &teams[away], date));
            }

            date = next_matchweek_date(date, matchweek);
        }

        debug!(
            "generated {} fixtures over {} matchweeks for {} teams",
            fixtures.len(),
            2 * (teams.len() - 1),
            teams.len()
        );

        Ok(SeasonCalendar {
            season_year: season_year.to_string(),
            teams: teams.to_vec(),
            fixtures,
            start_date,
            winter_break,
            current_matchweek: 1,
            completed_matchweeks: 0,
        })
    }

    /// Builds a calendar from already existing fixtures.
    pub fn from_fixtures(season_year: &str, teams: Vec<String>, fixtures: Vec<Fixture>) -> Self {
        let start_date = fixtures
            .iter()
            .map(|f| f.date)
            .min()
            .unwrap_or_default();

        SeasonCalendar {
            season_year: season_year.to_string(),
            teams,
            fixtures,
            start_date,
            winter_break: None,
            current_matchweek: 1,
            completed_matchweeks: 0,
        }
    }

    pub fn total_matchweeks(&self) -> u32 {
        self.fixtures.iter().map(|f| f.matchweek).max().unwrap_or(0)
    }

    pub fn matchweek_fixtures(&self, matchweek: u32) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.matchweek == matchweek)
            .collect()
    }

    pub fn team_fixtures(&self, team: &str, completed_only: bool) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.involves(team))
            .filter(|f| !completed_only || f.is_completed())
            .collect()
    }

    pub fn next_fixtures(&self, team: &str, count: usize) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.involves(team) && f.is_scheduled())
            .take(count)
            .collect()
    }

    pub fn is_matchweek_complete(&self, matchweek: u32) -> bool {
        self.fixtures
            .iter()
            .filter(|f| f.matchweek == matchweek)
            .all(|f| f.is_completed())
    }

    pub fn matchweek_date(&self, matchweek: u32) -> Option<NaiveDate> {
        self.fixtures
            .iter()
            .find(|f| f.matchweek == matchweek)
            .map(|f| f.date)
    }

    pub fn fixture(&self, id: u32) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    pub fn fixture_mut(&mut self, id: u32) -> Option<&mut Fixture> {
        self.fixtures.iter_mut().find(|f| f.id == id)
    }

    pub fn is_finished(&self) -> bool {
        self.current_matchweek > self.total_matchweeks()
    }

    /// Moves the pointer past `matchweek` once it has been processed.
    pub(crate) fn finish_matchweek(&mut self, matchweek: u32) {
        if self.is_matchweek_complete(matchweek) {
            self.completed_matchweeks += 1;
        }

        self.current_matchweek = matchweek + 1;
    }
}

fn validate_teams(teams: &[String]) -> SimulationResult<()> {
    if teams.len() < 2 {
        return Err(SimulationError::Configuration(format!(
            "at least 2 teams are required, got {}",
            teams.len()
        )));
    }

    if teams.len() % 2 != 0 {
        return Err(SimulationError::Configuration(format!(
            "team count must be even, got {}",
            teams.len()
        )));
    }

    let mut seen = HashSet::with_capacity(teams.len());
    if let Some(duplicate) = teams.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(SimulationError::Configuration(format!(
            "team '{}' is listed more than once",
            duplicate
        )));
    }

    Ok(())
}

/// Circle method over team indices: the first team stays, the rest rotate.
/// Pairing `i` with `n - 1 - i`, home side swapped on odd rounds.
fn round_robin(teams: &[String]) -> Vec<Vec<(usize, usize)>> {
    let n = teams.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rounds = Vec::with_capacity(n - 1);

    for round in 0..n - 1 {
        let pairs: Vec<(usize, usize)> = (0..n / 2)
            .map(|i| {
                let (a, b) = (order[i], order[n - 1 - i]);
                if round % 2 == 0 { (a, b) } else { (b, a) }
            })
            .collect();

        rounds.push(pairs);

        order[1..].rotate_right(1);
    }

    rounds
}

fn next_matchweek_date(date: NaiveDate, matchweek: u32) -> NaiveDate {
    let mut next = date + Duration::days(DAYS_BETWEEN_MATCHWEEKS);

    if (matchweek + 1) % INTERNATIONAL_BREAK_EVERY == 0 {
        next += Duration::days(DAYS_BETWEEN_MATCHWEEKS);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn teams(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Team {}", i + 1)).collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 17).unwrap()
    }

    #[test]
    fn test_four_team_scenario() {
        let names: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let calendar = SeasonCalendar::generate("2024-25", &names, start(), None).unwrap();

        assert_eq!(calendar.fixtures.len(), 12);
        assert_eq!(calendar.total_matchweeks(), 6);

        for team in &names {
            let home = calendar.fixtures.iter().filter(|f| &f.home_team == team).count();
            let away = calendar.fixtures.iter().filter(|f| &f.away_team == team).count();
            assert_eq!(home, 3, "{}", team);
            assert_eq!(away, 3, "{}", team);
        }
    }

    #[test]
    fn test_first_rounds_follow_rotation() {
        let names: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let calendar = SeasonCalendar::generate("2024-25", &names, start(), None).unwrap();

        let pairs = |m: u32| -> Vec<(String, String)> {
            calendar
                .matchweek_fixtures(m)
                .iter()
                .map(|f| (f.home_team.clone(), f.away_team.clone()))
                .collect()
        };

        let p = |h: &str, a: &str| (h.to_string(), a.to_string());

        assert_eq!(pairs(1), vec![p("A", "D"), p("B", "C")]);
        // order is now A, D, B, C and home sides swap
        assert_eq!(pairs(2), vec![p("C", "A"), p("B", "D")]);
        assert_eq!(pairs(3), vec![p("A", "B"), p("C", "D")]);
        // second half mirrors the first
        assert_eq!(pairs(4), vec![p("D", "A"), p("C", "B")]);
    }

    #[test]
    fn test_rejects_odd_and_tiny_leagues() {
        for n in [0, 1, 3, 5] {
            let result = SeasonCalendar::generate("2024-25", &teams(n), start(), None);
            assert!(matches!(result, Err(SimulationError::Configuration(_))), "n = {}", n);
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let names = vec!["A".to_string(), "B".to_string(), "A".to_string(), "C".to_string()];
        let result = SeasonCalendar::generate("2024-25", &names, start(), None);

        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_dates_add_international_breaks() {
        let calendar = SeasonCalendar::generate("2024-25", &teams(6), start(), None).unwrap();
        let date = |m| calendar.matchweek_date(m).unwrap();

        assert_eq!(date(1), start());
        assert_eq!(date(2), start() + Duration::days(7));
        assert_eq!(date(3), start() + Duration::days(14));
        // matchweek 4 comes after an extra week
        assert_eq!(date(4), start() + Duration::days(28));
        assert_eq!(date(5), start() + Duration::days(35));
        assert_eq!(date(8), start() + Duration::days(63));
    }

    #[test]
    fn test_winter_break_moves_dates_once() {
        let winter_break = WinterBreak {
            start: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 9, 20).unwrap(),
        };
        let calendar =
            SeasonCalendar::generate("2024-25", &teams(6), start(), Some(winter_break)).unwrap();

        for fixture in &calendar.fixtures {
            assert!(!winter_break.contains(fixture.date));
        }

        // 08-17, 08-24, 08-31, then 09-14 falls in the break
        assert_eq!(calendar.matchweek_date(4), Some(winter_break.end));
        assert_eq!(calendar.matchweek_date(5), Some(winter_break.end + Duration::days(7)));

        let dates: Vec<NaiveDate> = (1..=calendar.total_matchweeks())
            .filter_map(|m| calendar.matchweek_date(m))
            .collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_calendar_queries() {
        let mut calendar = SeasonCalendar::generate("2024-25", &teams(4), start(), None).unwrap();

        assert_eq!(calendar.team_fixtures("Team 1", false).len(), 6);
        assert!(calendar.team_fixtures("Team 1", true).is_empty());
        assert_eq!(calendar.next_fixtures("Team 1", 2).len(), 2);
        assert!(!calendar.is_matchweek_complete(1));

        let first_id = calendar.next_fixtures("Team 1", 1)[0].id;
        assert!(calendar.fixture_mut(first_id).unwrap().postpone());

        let next = calendar.next_fixtures("Team 1", 1);
        assert_ne!(next[0].id, first_id);
        assert_eq!(calendar.fixture(first_id).unwrap().status, FixtureStatus::Postponed);
    }

    proptest! {
        #[test]
        fn prop_every_ordered_pair_once(half in 1usize..=8) {
            let n = half * 2;
            let calendar = SeasonCalendar::generate("2024-25", &teams(n), start(), None).unwrap();

            prop_assert_eq!(calendar.fixtures.len(), n * (n - 1));
            prop_assert_eq!(calendar.total_matchweeks() as usize, 2 * (n - 1));

            let mut pairs = HashSet::new();
            for fixture in &calendar.fixtures {
                prop_assert_ne!(&fixture.home_team, &fixture.away_team);
                prop_assert!(pairs.insert((fixture.home_team.clone(), fixture.away_team.clone())));
            }
        }

        #[test]
        fn prop_each_team_once_per_matchweek(half in 1usize..=8) {
            let n = half * 2;
            let calendar = SeasonCalendar::generate("2024-25", &teams(n), start(), None).unwrap();

            for matchweek in 1..=calendar.total_matchweeks() {
                let fixtures = calendar.matchweek_fixtures(matchweek);
                prop_assert_eq!(fixtures.len(), n / 2);

                let mut appearances: HashMap<&str, usize> = HashMap::new();
                for fixture in fixtures {
                    *appearances.entry(fixture.home_team.as_str()).or_default() += 1;
                    *appearances.entry(fixture.away_team.as_str()).or_default() += 1;
                }

                prop_assert_eq!(appearances.len(), n);
                prop_assert!(appearances.values().all(|&count| count == 1));
            }
        }
    }
}
