use crate::club::MatchTacticType;
use crate::r#match::{MatchEvent, PlayerMatchPerformance};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchSide {
    Home,
    Away,
}

impl MatchSide {
    pub fn opposite(&self) -> MatchSide {
        match self {
            MatchSide::Home => MatchSide::Away,
            MatchSide::Away => MatchSide::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub date: NaiveDate,

    pub home_team: String,
    pub away_team: String,
    pub home_goals: u8,
    pub away_goals: u8,

    pub home_tactic: MatchTacticType,
    pub away_tactic: MatchTacticType,

    pub home_possession: f32,
    pub away_possession: f32,
    pub home_shots: u8,
    pub away_shots: u8,
    pub home_shots_on_target: u8,
    pub away_shots_on_target: u8,

    pub events: Vec<MatchEvent>,

    pub home_performances: BTreeMap<u32, PlayerMatchPerformance>,
    pub away_performances: BTreeMap<u32, PlayerMatchPerformance>,
}

impl MatchResult {
    pub fn new(
        date: NaiveDate,
        home_team: &str,
        away_team: &str,
        home_tactic: MatchTacticType,
        away_tactic: MatchTacticType,
    ) -> Self {
        MatchResult {
            date,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_goals: 0,
            away_goals: 0,
            home_tactic,
            away_tactic,
            home_possession: 50.0,
            away_possession: 50.0,
            home_shots: 0,
            away_shots: 0,
            home_shots_on_target: 0,
            away_shots_on_target: 0,
            events: Vec::new(),
            home_performances: BTreeMap::new(),
            away_performances: BTreeMap::new(),
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        match self.outcome() {
            MatchOutcome::HomeWin => Some(&self.home_team),
            MatchOutcome::AwayWin => Some(&self.away_team),
            MatchOutcome::Draw => None,
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.home_goals as u32 + self.away_goals as u32
    }

    pub fn team_name(&self, side: MatchSide) -> &str {
        match side {
            MatchSide::Home => &self.home_team,
            MatchSide::Away => &self.away_team,
        }
    }

    pub fn goals(&self, side: MatchSide) -> u8 {
        match side {
            MatchSide::Home => self.home_goals,
            MatchSide::Away => self.away_goals,
        }
    }

    pub fn performances(&self, side: MatchSide) -> &BTreeMap<u32, PlayerMatchPerformance> {
        match side {
            MatchSide::Home => &self.home_performances,
            MatchSide::Away => &self.away_performances,
        }
    }

    pub fn performances_mut(
        &mut self,
        side: MatchSide,
    ) -> &mut BTreeMap<u32, PlayerMatchPerformance> {
        match side {
            MatchSide::Home => &mut self.home_performances,
            MatchSide::Away => &mut self.away_performances,
        }
    }

    pub(crate) fn add_goal(&mut self, side: MatchSide) {
        match side {
            MatchSide::Home => self.home_goals += 1,
            MatchSide::Away => self.away_goals += 1,
        }
    }

    pub(crate) fn set_shots(&mut self, side: MatchSide, shots: u8, on_target: u8) {
        match side {
            MatchSide::Home => {
                self.home_shots = shots;
                self.home_shots_on_target = on_target;
            }
            MatchSide::Away => {
                self.away_shots = shots;
                self.away_shots_on_target = on_target;
            }
        }
    }

    pub fn score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home_team, self.home_goals, self.away_goals, self.away_team
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(home_goals: u8, away_goals: u8) -> MatchResult {
        let mut result = MatchResult::new(
            NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            "Arsenal",
            "Chelsea",
            MatchTacticType::T442,
            MatchTacticType::T433,
        );
        result.home_goals = home_goals;
        result.away_goals = away_goals;
        result
    }

    #[test]
    fn outcome_follows_score() {
        assert_eq!(result(2, 1).outcome(), MatchOutcome::HomeWin);
        assert_eq!(result(1, 1).outcome(), MatchOutcome::Draw);
        assert_eq!(result(0, 3).outcome(), MatchOutcome::AwayWin);
    }

    #[test]
    fn winner_and_totals() {
        assert_eq!(result(0, 3).winner(), Some("Chelsea"));
        assert_eq!(result(2, 2).winner(), None);
        assert_eq!(result(2, 2).total_goals(), 4);
        assert_eq!(result(3, 1).score_line(), "Arsenal 3 - 1 Chelsea");
    }

    #[test]
    fn side_accessors() {
        let mut r = result(0, 0);
        r.add_goal(MatchSide::Away);
        r.set_shots(MatchSide::Home, 12, 4);

        assert_eq!(r.goals(MatchSide::Away), 1);
        assert_eq!(r.team_name(MatchSide::Home.opposite()), "Chelsea");
        assert_eq!(r.home_shots, 12);
        assert_eq!(r.home_shots_on_target, 4);
    }
}
