use crate::error::{SimulationError, SimulationResult};
use crate::r#match::MatchResult;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

const POINTS_WIN: u32 = 3;
const POINTS_DRAW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueTableEntry {
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl LeagueTableEntry {
    pub fn new(team_name: &str) -> Self {
        LeagueTableEntry {
            team_name: team_name.to_string(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    #[inline]
    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    fn record(&mut self, scored: u8, conceded: u8) {
        self.played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += POINTS_WIN;
            }
            Ordering::Equal => {
                self.draws += 1;
                self.points += POINTS_DRAW;
            }
            Ordering::Less => self.losses += 1,
        }
    }
}

#[derive(Serialize)]
struct LeagueTableRow<'e> {
    team_name: &'e str,
    played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i32,
    points: u32,
}

impl Serialize for LeagueTableEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LeagueTableRow {
            team_name: &self.team_name,
            played: self.played,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            goal_difference: self.goal_difference(),
            points: self.points,
        }
        .serialize(serializer)
    }
}

/// Ranking order: points, goal difference, goals scored, then fewest conceded.
pub fn compare_entries(a: &LeagueTableEntry, b: &LeagueTableEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.goals_against.cmp(&b.goals_against))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeagueTableTotals {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueTable {
    // registration order
    rows: Vec<LeagueTableEntry>,
}

impl LeagueTable {
    pub fn new(teams: &[String]) -> Self {
        LeagueTable {
            rows: teams.iter().map(|team| LeagueTableEntry::new(team)).collect(),
        }
    }

    pub fn rows(&self) -> &[LeagueTableEntry] {
        &self.rows
    }

    pub fn entry(&self, team: &str) -> Option<&LeagueTableEntry> {
        self.rows.iter().find(|row| row.team_name == team)
    }

    fn index_of(&self, team: &str) -> SimulationResult<usize> {
        self.rows
            .iter()
            .position(|row| row.team_name == team)
            .ok_or_else(|| SimulationError::UnknownTeam(team.to_string()))
    }

    /// Applies one result to both teams, or to neither when the result is unusable.
    pub fn update(&mut self, result: &MatchResult) -> SimulationResult<()> {
        let (home_idx, away_idx) = self.resolve(result)?;

        self.apply(home_idx, away_idx, result);

        Ok(())
    }

    /// Applies a batch of results, or none of them when any result is unusable.
    pub fn update_from_results(&mut self, results: &[&MatchResult]) -> SimulationResult<()> {
        let resolved = results
            .iter()
            .map(|result| self.resolve(result))
            .collect::<SimulationResult<Vec<_>>>()?;

        for ((home_idx, away_idx), result) in resolved.into_iter().zip(results) {
            self.apply(home_idx, away_idx, result);
        }

        Ok(())
    }

    /// Fails when `update` would reject the result.
    pub fn check(&self, result: &MatchResult) -> SimulationResult<()> {
        self.resolve(result).map(|_| ())
    }

    fn resolve(&self, result: &MatchResult) -> SimulationResult<(usize, usize)> {
        if result.home_team == result.away_team {
            return Err(SimulationError::Configuration(format!(
                "team '{}' cannot play itself",
                result.home_team
            )));
        }

        Ok((self.index_of(&result.home_team)?, self.index_of(&result.away_team)?))
    }

    fn apply(&mut self, home_idx: usize, away_idx: usize, result: &MatchResult) {
        self.rows[home_idx].record(result.home_goals, result.away_goals);
        self.rows[away_idx].record(result.away_goals, result.home_goals);
    }

    pub fn sorted_table(&self) -> Vec<LeagueTableEntry> {
        let mut sorted = self.rows.clone();
        sorted.sort_by(compare_entries);
        sorted
    }

    /// 1-based rank in the sorted table.
    pub fn position(&self, team: &str) -> Option<usize> {
        self.sorted_table()
            .iter()
            .position(|row| row.team_name == team)
            .map(|idx| idx + 1)
    }

    pub fn leader(&self) -> Option<LeagueTableEntry> {
        self.sorted_table().into_iter().next()
    }

    pub fn best_attack(&self) -> Option<LeagueTableEntry> {
        self.sorted_table()
            .into_iter()
            .min_by_key(|row| std::cmp::Reverse(row.goals_for))
    }

    pub fn best_defense(&self) -> Option<LeagueTableEntry> {
        self.sorted_table()
            .into_iter()
            .min_by_key(|row| row.goals_against)
    }

    pub fn totals(&self) -> LeagueTableTotals {
        self.rows
            .iter()
            .fold(LeagueTableTotals::default(), |mut totals, row| {
                totals.played += row.played;
                totals.wins += row.wins;
                totals.draws += row.draws;
                totals.losses += row.losses;
                totals.goals += row.goals_for;
                totals
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::MatchTacticType;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn teams(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn result(home: &str, away: &str, home_goals: u8, away_goals: u8) -> MatchResult {
        let mut result = MatchResult::new(
            NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            home,
            away,
            MatchTacticType::T442,
            MatchTacticType::T442,
        );
        result.home_goals = home_goals;
        result.away_goals = away_goals;
        result
    }

    #[test]
    fn test_update_win_and_draw() {
        let mut table = LeagueTable::new(&teams(&["A", "B", "C"]));

        table.update(&result("A", "B", 3, 1)).unwrap();
        table.update(&result("C", "A", 2, 2)).unwrap();

        let a = table.entry("A").unwrap();
        assert_eq!((a.played, a.wins, a.draws, a.losses), (2, 1, 1, 0));
        assert_eq!(a.points, 4);
        assert_eq!(a.goal_difference(), 2);

        let b = table.entry("B").unwrap();
        assert_eq!((b.played, b.losses, b.points), (1, 1, 0));
        assert_eq!(b.goal_difference(), -2);

        let c = table.entry("C").unwrap();
        assert_eq!((c.draws, c.points, c.goals_for), (1, 1, 2));
    }

    #[test]
    fn test_update_is_atomic_for_unknown_team() {
        let mut table = LeagueTable::new(&teams(&["A", "B"]));

        let err = table.update(&result("A", "Z", 1, 0)).unwrap_err();

        assert!(matches!(err, SimulationError::UnknownTeam(ref team) if team == "Z"));
        assert_eq!(table.entry("A").unwrap().played, 0);
    }

    #[test]
    fn test_update_rejects_self_match() {
        let mut table = LeagueTable::new(&teams(&["A", "B"]));

        assert!(table.update(&result("A", "A", 1, 0)).is_err());
        assert_eq!(table.totals().played, 0);
    }

    #[test]
    fn test_tie_breakers() {
        let mut table = LeagueTable::new(&teams(&["A", "B", "C", "D"]));

        // A and B level on points and goal difference, B scored more
        table.update(&result("A", "C", 1, 0)).unwrap();
        table.update(&result("B", "D", 3, 2)).unwrap();

        let sorted = table.sorted_table();
        assert_eq!(sorted[0].team_name, "B");
        assert_eq!(sorted[1].team_name, "A");
        assert_eq!(table.position("B"), Some(1));
        assert_eq!(table.position("A"), Some(2));
        assert_eq!(table.position("Z"), None);
    }

    #[test]
    fn test_identical_records_compare_equal() {
        let a = LeagueTableEntry {
            points: 3,
            goals_for: 2,
            goals_against: 2,
            ..LeagueTableEntry::new("A")
        };
        let b = LeagueTableEntry {
            points: 3,
            goals_for: 2,
            goals_against: 2,
            ..LeagueTableEntry::new("B")
        };

        assert_eq!(compare_entries(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_equal_rows_keep_registration_order() {
        let table = LeagueTable::new(&teams(&["Z", "M", "A"]));

        let names: Vec<String> = table.sorted_table().into_iter().map(|r| r.team_name).collect();
        assert_eq!(names, vec!["Z", "M", "A"]);
    }

    #[test]
    fn test_leader_best_attack_and_defense() {
        let mut table = LeagueTable::new(&teams(&["A", "B", "C", "D"]));

        table.update(&result("A", "B", 1, 0)).unwrap();
        table.update(&result("C", "D", 4, 3)).unwrap();
        table.update(&result("A", "D", 0, 0)).unwrap();

        assert_eq!(table.leader().unwrap().team_name, "A");
        assert_eq!(table.best_attack().unwrap().team_name, "C");
        assert_eq!(table.best_defense().unwrap().team_name, "A");

        let totals = table.totals();
        assert_eq!(totals.played, 6);
        assert_eq!(totals.wins, 2);
        assert_eq!(totals.losses, 2);
        assert_eq!(totals.draws, 2);
        assert_eq!(totals.goals, 8);
    }

    #[test]
    fn test_batch_update() {
        let mut table = LeagueTable::new(&teams(&["A", "B", "C", "D"]));

        let first = result("A", "B", 2, 0);
        let second = result("C", "D", 1, 1);
        table.update_from_results(&[&first, &second]).unwrap();

        assert_eq!(table.totals().played, 4);
        assert_eq!(table.leader().unwrap().team_name, "A");

        let unknown = result("A", "Z", 1, 0);
        assert!(table.update_from_results(&[&first, &unknown]).is_err());
        assert_eq!(table.entry("A").unwrap().played, 1);
    }

    #[test]
    fn test_serialized_entry_carries_goal_difference() {
        let mut table = LeagueTable::new(&teams(&["A", "B"]));
        table.update(&result("A", "B", 1, 3)).unwrap();

        let json = serde_json::to_value(table.sorted_table()).unwrap();

        assert_eq!(json[0]["team_name"], "B");
        assert_eq!(json[0]["goal_difference"], 2);
        assert_eq!(json[1]["goal_difference"], -2);
        assert_eq!(json[1]["points"], 0);
    }

    #[test]
    fn test_empty_table() {
        let table = LeagueTable::new(&[]);

        assert!(table.is_empty());
        assert!(table.leader().is_none());
        assert!(table.best_attack().is_none());
    }

    const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

    fn results_strategy() -> impl Strategy<Value = Vec<(usize, usize, u8, u8)>> {
        prop::collection::vec((0..6usize, 0..6usize, 0..6u8, 0..6u8), 0..60)
    }

    fn played_table(results: &[(usize, usize, u8, u8)]) -> LeagueTable {
        let mut table = LeagueTable::new(&teams(&NAMES));

        for &(home, away, home_goals, away_goals) in results {
            if home != away {
                table
                    .update(&result(NAMES[home], NAMES[away], home_goals, away_goals))
                    .unwrap();
            }
        }

        table
    }

    proptest! {
        #[test]
        fn prop_goal_difference_matches_goals(results in results_strategy()) {
            let table = played_table(&results);

            for row in table.rows() {
                prop_assert_eq!(
                    row.goal_difference(),
                    row.goals_for as i32 - row.goals_against as i32
                );
                prop_assert_eq!(row.played, row.wins + row.draws + row.losses);
            }
        }

        #[test]
        fn prop_wins_equal_losses_and_draws_even(results in results_strategy()) {
            let totals = played_table(&results).totals();

            prop_assert_eq!(totals.wins, totals.losses);
            prop_assert_eq!(totals.draws % 2, 0);
        }

        #[test]
        fn prop_sorted_table_is_ordered_and_idempotent(results in results_strategy()) {
            let sorted = played_table(&results).sorted_table();

            for pair in sorted.windows(2) {
                prop_assert_ne!(compare_entries(&pair[0], &pair[1]), Ordering::Greater);
            }

            let mut resorted = sorted.clone();
            resorted.sort_by(compare_entries);
            prop_assert_eq!(resorted, sorted);
        }
    }
}
