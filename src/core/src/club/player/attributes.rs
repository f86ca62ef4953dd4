use crate::club::player::injury::PlayerInjury;
use serde::Serialize;

pub const CONDITION_MAX_VALUE: f32 = 100.0;
pub const CONDITION_MIN_VALUE: f32 = 0.0;

pub const DEFAULT_INJURY_PRONENESS: f32 = 0.01;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerAttributes {
    //ability
    pub current_ability: u8,
    pub potential_ability: u8,

    // 0-100 scales
    pub form: f32,
    pub morale: f32,
    pub fitness: f32,

    // injury tracking
    pub injury_proneness: f32,
    pub injury: Option<PlayerInjury>,
    pub injury_count: u8,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        PlayerAttributes {
            current_ability: 50,
            potential_ability: 50,
            form: 50.0,
            morale: 50.0,
            fitness: CONDITION_MAX_VALUE,
            injury_proneness: DEFAULT_INJURY_PRONENESS,
            injury: None,
            injury_count: 0,
        }
    }
}

impl PlayerAttributes {
    #[inline]
    pub fn is_injured(&self) -> bool {
        self.injury.is_some()
    }

    pub fn set_form(&mut self, value: f32) {
        self.form = clamp_condition(value);
    }

    pub fn set_morale(&mut self, value: f32) {
        self.morale = clamp_condition(value);
    }

    pub fn set_fitness(&mut self, value: f32) {
        self.fitness = clamp_condition(value);
    }

    pub fn set_injury(&mut self, injury: PlayerInjury) {
        self.injury = Some(injury);
        self.injury_count = self.injury_count.saturating_add(1);
    }

    /// Advance the injury countdown. Returns true when the player became fit on this call.
    pub fn recover_injury_days(&mut self, days: u16) -> bool {
        let recovered = match self.injury.as_mut() {
            Some(injury) => injury.heal(days),
            None => return false,
        };

        if recovered {
            self.injury = None;
        }

        recovered
    }
}

#[inline]
fn clamp_condition(value: f32) -> f32 {
    if value.is_nan() {
        return CONDITION_MIN_VALUE;
    }

    value.clamp(CONDITION_MIN_VALUE, CONDITION_MAX_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::player::injury::InjurySeverity;

    #[test]
    fn setters_clamp_to_condition_scale() {
        let mut attributes = PlayerAttributes::default();

        attributes.set_form(140.0);
        attributes.set_morale(-3.0);
        attributes.set_fitness(f32::NAN);

        assert_eq!(attributes.form, 100.0);
        assert_eq!(attributes.morale, 0.0);
        assert_eq!(attributes.fitness, 0.0);
    }

    #[test]
    fn injury_clears_after_countdown() {
        let mut attributes = PlayerAttributes::default();
        attributes.set_injury(PlayerInjury {
            severity: InjurySeverity::Minor,
            days_remaining: 5,
        });

        assert!(attributes.is_injured());
        assert!(!attributes.recover_injury_days(3));
        assert!(attributes.recover_injury_days(3));
        assert!(!attributes.is_injured());
        assert_eq!(attributes.injury_count, 1);
    }

    #[test]
    fn healthy_player_does_not_report_recovery() {
        let mut attributes = PlayerAttributes::default();
        assert!(!attributes.recover_injury_days(10));
    }
}
