use crate::r#match::PlayerMatchPerformance;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerStatistics {
    pub played: u16,
    pub minutes: u32,
    pub goals: u16,
    pub assists: u16,
    pub shots: u16,
    pub shots_on_target: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub saves: u16,
    pub injuries: u16,

    total_rating: f32,
}

impl PlayerStatistics {
    pub fn record(&mut self, performance: &PlayerMatchPerformance) {
        self.played += 1;
        self.minutes += performance.minutes as u32;
        self.goals += performance.goals as u16;
        self.assists += performance.assists as u16;
        self.shots += performance.shots as u16;
        self.shots_on_target += performance.shots_on_target as u16;
        self.yellow_cards += performance.yellow_cards as u16;
        self.red_cards += performance.red_cards as u16;
        self.saves += performance.saves as u16;

        if performance.injured {
            self.injuries += 1;
        }

        self.total_rating += performance.rating;
    }

    pub fn average_rating(&self) -> f32 {
        if self.played == 0 {
            return 0.0;
        }

        self.total_rating / self.played as f32
    }

    pub fn goals_per_90(&self) -> f32 {
        per_90(self.goals, self.minutes)
    }

    pub fn assists_per_90(&self) -> f32 {
        per_90(self.assists, self.minutes)
    }

    pub fn shot_accuracy(&self) -> f32 {
        if self.shots == 0 {
            return 0.0;
        }

        self.shots_on_target as f32 / self.shots as f32
    }

    pub fn goal_contributions(&self) -> u16 {
        self.goals + self.assists
    }
}

#[inline]
fn per_90(count: u16, minutes: u32) -> f32 {
    if minutes == 0 {
        return 0.0;
    }

    count as f32 * 90.0 / minutes as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performance(goals: u8, assists: u8, rating: f32) -> PlayerMatchPerformance {
        PlayerMatchPerformance {
            minutes: 90,
            goals,
            assists,
            shots: goals + 1,
            shots_on_target: goals,
            rating,
            ..PlayerMatchPerformance::default()
        }
    }

    #[test]
    fn per_90_uses_goals_not_minutes() {
        let mut stats = PlayerStatistics::default();
        stats.record(&performance(2, 1, 8.0));
        stats.record(&performance(0, 0, 6.0));

        assert_eq!(stats.minutes, 180);
        assert_eq!(stats.goals_per_90(), 1.0);
        assert_eq!(stats.assists_per_90(), 0.5);
    }

    #[test]
    fn empty_statistics_have_zero_rates() {
        let stats = PlayerStatistics::default();

        assert_eq!(stats.goals_per_90(), 0.0);
        assert_eq!(stats.average_rating(), 0.0);
        assert_eq!(stats.shot_accuracy(), 0.0);
    }

    #[test]
    fn average_rating_over_matches() {
        let mut stats = PlayerStatistics::default();
        stats.record(&performance(1, 0, 7.5));
        stats.record(&performance(0, 1, 6.5));

        assert_eq!(stats.played, 2);
        assert_eq!(stats.average_rating(), 7.0);
        assert_eq!(stats.goal_contributions(), 2);
    }
}
