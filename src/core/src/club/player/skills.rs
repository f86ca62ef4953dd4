use serde::{Deserialize, Serialize};

const DEFAULT_SPECIALIZED_RATING: u8 = 50;

/// Six core ratings every player has, plus specialized ratings that only
/// some players carry (goalkeeping is absent for outfield players).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSkills {
    pub pace: u8,
    pub shooting: u8,
    pub passing: u8,
    pub dribbling: u8,
    pub defending: u8,
    pub physical: u8,

    #[serde(default)]
    pub goalkeeping: Option<u8>,
    #[serde(default)]
    pub crossing: Option<u8>,
    #[serde(default)]
    pub finishing: Option<u8>,
    #[serde(default)]
    pub heading: Option<u8>,
}

impl Default for PlayerSkills {
    fn default() -> Self {
        PlayerSkills::uniform(50)
    }
}

impl PlayerSkills {
    pub fn uniform(value: u8) -> Self {
        PlayerSkills {
            pace: value,
            shooting: value,
            passing: value,
            dribbling: value,
            defending: value,
            physical: value,
            goalkeeping: None,
            crossing: None,
            finishing: None,
            heading: None,
        }
    }

    pub fn finishing_or_default(&self) -> u8 {
        self.finishing.unwrap_or(DEFAULT_SPECIALIZED_RATING)
    }

    pub fn goalkeeping_or_default(&self) -> u8 {
        self.goalkeeping.unwrap_or(DEFAULT_SPECIALIZED_RATING)
    }

    /// Shooting plus finishing, on a 0-198 scale.
    pub fn shooting_ability(&self) -> f32 {
        self.shooting as f32 + self.finishing_or_default() as f32
    }

    pub fn average(&self) -> f32 {
        let sum = self.pace as u32
            + self.shooting as u32
            + self.passing as u32
            + self.dribbling as u32
            + self.defending as u32
            + self.physical as u32;

        sum as f32 / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_finishing_falls_back_to_fifty() {
        let skills = PlayerSkills {
            shooting: 80,
            ..PlayerSkills::default()
        };

        assert_eq!(skills.shooting_ability(), 130.0);
    }

    #[test]
    fn explicit_finishing_is_used() {
        let skills = PlayerSkills {
            shooting: 90,
            finishing: Some(95),
            ..PlayerSkills::default()
        };

        assert_eq!(skills.shooting_ability(), 185.0);
    }

    #[test]
    fn goalkeeping_is_optional() {
        let outfield = PlayerSkills::uniform(70);
        assert_eq!(outfield.goalkeeping, None);
        assert_eq!(outfield.goalkeeping_or_default(), 50);
        assert_eq!(outfield.average(), 70.0);
    }
}
