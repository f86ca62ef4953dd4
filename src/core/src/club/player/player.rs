use crate::club::player::attributes::{CONDITION_MAX_VALUE, PlayerAttributes};
use crate::club::player::injury::PlayerInjury;
use crate::club::{PlayerPositionType, PlayerSkills, PlayerStatistics};
use rand::RngExt;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

pub const MIN_EFFECTIVE_OVERALL: u8 = 30;
pub const MAX_EFFECTIVE_OVERALL: u8 = 99;

const SECONDARY_POSITION_PENALTY: u8 = 5;

const FORM_BONUS_RANGE: f32 = 10.0;
const MORALE_BONUS_RANGE: f32 = 5.0;
const FITNESS_PENALTY_RANGE: f32 = 15.0;

const FATIGUE_MINUTES_PER_POINT: f32 = 15.0;
const FITNESS_RECOVERY_PER_DAY: f32 = 15.0;

const INJURY_FITNESS_DROP: f32 = 30.0;
const INJURY_FITNESS_FLOOR: f32 = 20.0;
const MAX_INJURY_RISK: f32 = 0.5;

const MIN_MATCH_FITNESS: f32 = 30.0;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub position: PlayerPositionType,
    pub secondary_positions: Vec<PlayerPositionType>,

    pub attributes: PlayerAttributes,
    pub skills: PlayerSkills,

    pub statistics: PlayerStatistics,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: PlayerPositionType) -> Self {
        Player {
            id,
            name: name.into(),
            age: 25,
            position,
            secondary_positions: Vec::new(),
            attributes: PlayerAttributes::default(),
            skills: PlayerSkills::default(),
            statistics: PlayerStatistics::default(),
        }
    }

    /// Base ability adjusted by form, morale and fitness.
    pub fn effective_overall(&self) -> u8 {
        let attributes = &self.attributes;

        let form_bonus = (attributes.form - 50.0) / 50.0 * FORM_BONUS_RANGE;
        let morale_bonus = (attributes.morale - 50.0) / 50.0 * MORALE_BONUS_RANGE;
        let fitness_penalty = (CONDITION_MAX_VALUE - attributes.fitness) / CONDITION_MAX_VALUE
            * FITNESS_PENALTY_RANGE;

        let effective =
            attributes.current_ability as f32 + form_bonus + morale_bonus - fitness_penalty;

        effective
            .round()
            .clamp(MIN_EFFECTIVE_OVERALL as f32, MAX_EFFECTIVE_OVERALL as f32) as u8
    }

    pub fn rating_for_position(&self, position: PlayerPositionType) -> u8 {
        let effective = self.effective_overall();

        if position == self.position {
            return effective;
        }

        let penalty = if self.secondary_positions.contains(&position) {
            SECONDARY_POSITION_PENALTY
        } else {
            self.position
                .position_group()
                .distance_penalty(position.position_group())
        };

        effective.saturating_sub(penalty).max(1)
    }

    pub fn plays_position(&self, position: PlayerPositionType) -> bool {
        self.position == position || self.secondary_positions.contains(&position)
    }

    pub fn apply_fatigue(&mut self, minutes: u8) {
        let fatigue = minutes as f32 / FATIGUE_MINUTES_PER_POINT;
        self.attributes.set_fitness(self.attributes.fitness - fatigue);
    }

    pub fn recover_fitness(&mut self, days: u16) {
        let recovery = days as f32 * FITNESS_RECOVERY_PER_DAY;
        self.attributes.set_fitness(self.attributes.fitness + recovery);
    }

    /// Moves form after a match rated `score` on the 0-10 scale.
    pub fn update_form(&mut self, score: f32, rng: &mut StdRng) {
        let change = if score >= 7.0 {
            rng.random_range(2.0..=5.0)
        } else if score <= 4.0 {
            -rng.random_range(2.0..=5.0)
        } else {
            rng.random_range(-1.0..=1.0)
        };

        self.attributes.set_form(self.attributes.form + change);
    }

    pub fn update_morale(&mut self, delta: f32) {
        self.attributes.set_morale(self.attributes.morale + delta);
    }

    /// Probability of picking up an injury in one match.
    pub fn injury_risk(&self) -> f32 {
        let attributes = &self.attributes;

        let mut risk = attributes.injury_proneness;

        risk += (70.0 - attributes.fitness).max(0.0) / 70.0 * 0.04;

        if self.age > 30 {
            risk += (self.age - 30) as f32 * 0.004;
        }

        risk.clamp(0.0, MAX_INJURY_RISK)
    }

    /// Rolls the per-match injury check, applying and returning the injury on trigger.
    pub fn check_injury(&mut self, rng: &mut StdRng) -> Option<PlayerInjury> {
        if self.is_injured() {
            return None;
        }

        if rng.random::<f32>() >= self.injury_risk() {
            return None;
        }

        let injury = PlayerInjury::random(rng);
        self.injure(injury);

        Some(injury)
    }

    pub fn injure(&mut self, injury: PlayerInjury) {
        self.attributes.set_injury(injury);

        let fitness = self.attributes.fitness;
        if fitness > INJURY_FITNESS_FLOOR {
            self.attributes
                .set_fitness((fitness - INJURY_FITNESS_DROP).max(INJURY_FITNESS_FLOOR));
        }
    }

    #[inline]
    pub fn is_injured(&self) -> bool {
        self.attributes.is_injured()
    }

    pub fn can_play(&self) -> bool {
        !self.is_injured() && self.attributes.fitness > MIN_MATCH_FITNESS
    }

    /// Days between matches: fitness comes back and injuries count down.
    pub fn rest(&mut self, days: u16) {
        if days == 0 {
            return;
        }

        self.recover_fitness(days);
        self.attributes.recover_injury_days(days);
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({}, {})", self.name, self.position, self.effective_overall())
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Arena of players owned by one team, addressed by player id.
#[derive(Debug, Clone, Default)]
pub struct PlayerCollection {
    pub players: Vec<Player>,
}

impl PlayerCollection {
    pub fn new(players: Vec<Player>) -> Self {
        PlayerCollection { players }
    }

    pub fn add(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn get(&self, player_id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn get_mut(&mut self, player_id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: u32) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn by_position(&self, position: PlayerPositionType) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.plays_position(position))
            .collect()
    }

    pub fn available(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.can_play())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn rest(&mut self, days: u16) {
        for player in &mut self.players {
            player.rest(days);
        }
    }
}
