use crate::club::PlayerStatistics;
use crate::r#match::{MatchResult, MatchSide};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeasonStats {
    pub player_id: u32,
    pub name: String,
    pub team: String,
    pub statistics: PlayerStatistics,
}

/// Season totals per player, accumulated from match performances.
#[derive(Debug, Clone, Default)]
pub struct PlayerStatTracker {
    // keyed by (team, player id) so ids only need to be unique within a squad
    players: BTreeMap<(String, u32), PlayerSeasonStats>,
}

impl PlayerStatTracker {
    pub fn new() -> Self {
        PlayerStatTracker::default()
    }

    pub fn update(&mut self, result: &MatchResult) {
        for side in [MatchSide::Home, MatchSide::Away] {
            let team = result.team_name(side);

            for performance in result.performances(side).values() {
                let entry = self
                    .players
                    .entry((team.to_string(), performance.player_id))
                    .or_insert_with(|| PlayerSeasonStats {
                        player_id: performance.player_id,
                        name: performance.name.clone(),
                        team: team.to_string(),
                        statistics: PlayerStatistics::default(),
                    });

                entry.statistics.record(performance);
            }
        }
    }

    pub fn get(&self, team: &str, player_id: u32) -> Option<&PlayerSeasonStats> {
        self.players.get(&(team.to_string(), player_id))
    }

    pub fn team_players(&self, team: &str) -> Vec<&PlayerSeasonStats> {
        self.players.values().filter(|p| p.team == team).collect()
    }

    pub fn all(&self) -> Vec<PlayerSeasonStats> {
        self.players.values().cloned().collect()
    }

    pub fn top_scorers(&self, count: usize) -> Vec<PlayerSeasonStats> {
        self.top_by(count, |p| {
            (
                Reverse(p.statistics.goals),
                Reverse(p.statistics.assists),
            )
        })
    }

    pub fn top_assisters(&self, count: usize) -> Vec<PlayerSeasonStats> {
        self.top_by(count, |p| {
            (
                Reverse(p.statistics.assists),
                Reverse(p.statistics.goals),
            )
        })
    }

    fn top_by<K: Ord>(
        &self,
        count: usize,
        key: impl Fn(&PlayerSeasonStats) -> K,
    ) -> Vec<PlayerSeasonStats> {
        let mut players: Vec<&PlayerSeasonStats> = self.players.values().collect();

        // map order already breaks ties by team name, then player id
        players.sort_by_key(|p| key(p));

        players.into_iter().take(count).cloned().collect()
    }

    pub fn total_goals(&self) -> u32 {
        self.players.values().map(|p| p.statistics.goals as u32).sum()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::MatchTacticType;
    use crate::r#match::PlayerMatchPerformance;
    use chrono::NaiveDate;

    fn performance(id: u32, goals: u8, assists: u8) -> PlayerMatchPerformance {
        let mut performance = PlayerMatchPerformance::new(id, &format!("Player {}", id), 90);
        performance.goals = goals;
        performance.assists = assists;
        performance.calculate_rating();
        performance
    }

    fn result(
        home: &str,
        away: &str,
        home_players: Vec<PlayerMatchPerformance>,
        away_players: Vec<PlayerMatchPerformance>,
    ) -> MatchResult {
        let mut result = MatchResult::new(
            NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            home,
            away,
            MatchTacticType::T442,
            MatchTacticType::T442,
        );

        for p in home_players {
            result.home_goals += p.goals;
            result.home_performances.insert(p.player_id, p);
        }
        for p in away_players {
            result.away_goals += p.goals;
            result.away_performances.insert(p.player_id, p);
        }

        result
    }

    #[test]
    fn test_update_accumulates_across_matches() {
        let mut tracker = PlayerStatTracker::new();

        tracker.update(&result("A", "B", vec![performance(1, 2, 0)], vec![performance(2, 0, 1)]));
        tracker.update(&result("C", "A", vec![performance(3, 0, 0)], vec![performance(1, 1, 1)]));

        let striker = tracker.get("A", 1).unwrap();
        assert_eq!(striker.statistics.played, 2);
        assert_eq!(striker.statistics.minutes, 180);
        assert_eq!(striker.statistics.goals, 3);
        assert_eq!(striker.statistics.assists, 1);
        assert!((striker.statistics.goals_per_90() - 1.5).abs() < 1e-6);

        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.total_goals(), 3);
        assert_eq!(tracker.team_players("A").len(), 1);
    }

    #[test]
    fn test_same_id_in_different_teams_is_separate() {
        let mut tracker = PlayerStatTracker::new();

        tracker.update(&result("A", "B", vec![performance(1, 1, 0)], vec![performance(1, 0, 0)]));

        assert_eq!(tracker.get("A", 1).unwrap().statistics.goals, 1);
        assert_eq!(tracker.get("B", 1).unwrap().statistics.goals, 0);
    }

    #[test]
    fn test_top_scorers_order() {
        let mut tracker = PlayerStatTracker::new();

        tracker.update(&result(
            "Zeta",
            "Alpha",
            vec![performance(1, 2, 0), performance(2, 2, 1)],
            vec![performance(3, 2, 0), performance(4, 0, 3)],
        ));

        let ids: Vec<u32> = tracker.top_scorers(3).iter().map(|p| p.player_id).collect();
        // 2 goals + 1 assist first, then the two-goal players by team name
        assert_eq!(ids, vec![2, 3, 1]);

        let assisters: Vec<u32> = tracker.top_assisters(2).iter().map(|p| p.player_id).collect();
        assert_eq!(assisters, vec![4, 2]);
    }

    #[test]
    fn test_top_n_larger_than_tracker() {
        let mut tracker = PlayerStatTracker::new();
        tracker.update(&result("A", "B", vec![performance(1, 0, 0)], vec![]));

        assert_eq!(tracker.top_scorers(10).len(), 1);
        assert!(PlayerStatTracker::new().top_assisters(5).is_empty());
    }
}
