use serde::Serialize;

const BASE_MATCH_RATING: f32 = 6.0;
const MIN_MATCH_RATING: f32 = 0.0;
const MAX_MATCH_RATING: f32 = 10.0;

const GOAL_WEIGHT: f32 = 1.5;
const ASSIST_WEIGHT: f32 = 1.2;
const SHOT_ON_TARGET_WEIGHT: f32 = 0.3;
const SAVE_WEIGHT: f32 = 0.3;
const YELLOW_CARD_WEIGHT: f32 = 0.3;
const RED_CARD_WEIGHT: f32 = 2.0;

const MANY_SAVES_THRESHOLD: u8 = 5;
const MANY_SAVES_BONUS: f32 = 1.0;

/// One player's counters for a single match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerMatchPerformance {
    pub player_id: u32,
    pub name: String,
    pub minutes: u8,
    pub goals: u8,
    pub assists: u8,
    pub shots: u8,
    pub shots_on_target: u8,
    pub yellow_cards: u8,
    pub red_cards: u8,
    pub saves: u8,
    pub injured: bool,
    pub rating: f32,
}

impl PlayerMatchPerformance {
    pub fn new(player_id: u32, name: &str, minutes: u8) -> Self {
        PlayerMatchPerformance {
            player_id,
            name: name.to_string(),
            minutes,
            rating: BASE_MATCH_RATING,
            ..Default::default()
        }
    }

    pub fn calculate_rating(&mut self) -> f32 {
        let mut rating = BASE_MATCH_RATING;

        rating += self.goals as f32 * GOAL_WEIGHT;
        rating += self.assists as f32 * ASSIST_WEIGHT;
        rating += self.shots_on_target as f32 * SHOT_ON_TARGET_WEIGHT;

        if self.saves > 0 {
            rating += self.saves as f32 * SAVE_WEIGHT;

            if self.saves >= MANY_SAVES_THRESHOLD {
                rating += MANY_SAVES_BONUS;
            }
        }

        rating -= self.yellow_cards as f32 * YELLOW_CARD_WEIGHT;
        rating -= self.red_cards as f32 * RED_CARD_WEIGHT;

        self.rating = rating.clamp(MIN_MATCH_RATING, MAX_MATCH_RATING);
        self.rating
    }
}
