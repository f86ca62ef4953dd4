use crate::club::{PlayerFieldPositionGroup, PlayerPositionType};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchTacticType {
    T442,
    T433,
    T4231,
    T352,
    T532,
    T451,
    T343,
}

impl MatchTacticType {
    pub const ALL: [MatchTacticType; 7] = [
        MatchTacticType::T442,
        MatchTacticType::T433,
        MatchTacticType::T4231,
        MatchTacticType::T352,
        MatchTacticType::T532,
        MatchTacticType::T451,
        MatchTacticType::T343,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MatchTacticType::T442 => "4-4-2",
            MatchTacticType::T433 => "4-3-3",
            MatchTacticType::T4231 => "4-2-3-1",
            MatchTacticType::T352 => "3-5-2",
            MatchTacticType::T532 => "5-3-2",
            MatchTacticType::T451 => "4-5-1",
            MatchTacticType::T343 => "3-4-3",
        }
    }

    pub fn from_display_name(name: &str) -> Option<MatchTacticType> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }

    #[inline]
    pub fn formation(&self) -> &'static Formation {
        &FORMATIONS[*self as usize]
    }
}

impl Default for MatchTacticType {
    fn default() -> Self {
        MatchTacticType::T442
    }
}

impl Display for MatchTacticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayStyle {
    Attacking,
    Balanced,
    Defensive,
    CounterAttack,
    Possession,
    HighPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TacticalInstructions {
    pub tempo: f32,
    pub width: f32,
    pub pressing: f32,
    pub directness: f32,
    pub risk_taking: f32,
}

impl Default for TacticalInstructions {
    fn default() -> Self {
        TacticalInstructions {
            tempo: 1.0,
            width: 1.0,
            pressing: 1.0,
            directness: 1.0,
            risk_taking: 1.0,
        }
    }
}

/// One of the eleven places in a formation. `x` runs across the pitch,
/// `y` from own goal (0.0) to the opponent's goal (1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub position: PlayerPositionType,
    pub x: f32,
    pub y: f32,
    pub importance: f32,
}

impl FormationSlot {
    const fn new(position: PlayerPositionType, x: f32, y: f32) -> Self {
        FormationSlot {
            position,
            x,
            y,
            importance: 1.0,
        }
    }

    pub fn coordinates(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    pub tactic_type: MatchTacticType,
    pub slots: [FormationSlot; 11],
    pub compatible_styles: &'static [PlayStyle],

    pub attack_modifier: f32,
    pub defense_modifier: f32,
    pub midfield_modifier: f32,

    pub instructions: TacticalInstructions,
}

const HEAVY_MODIFIER_THRESHOLD: f32 = 1.1;

impl Formation {
    pub fn positions(&self) -> [PlayerPositionType; 11] {
        self.slots.map(|slot| slot.position)
    }

    pub fn count_in_group(&self, group: PlayerFieldPositionGroup) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.position.position_group() == group)
            .count()
    }

    /// Outfield shape as "defenders-midfielders-forwards".
    pub fn shape(&self) -> String {
        format!(
            "{}-{}-{}",
            self.count_in_group(PlayerFieldPositionGroup::Defender),
            self.count_in_group(PlayerFieldPositionGroup::Midfielder),
            self.count_in_group(PlayerFieldPositionGroup::Forward)
        )
    }

    pub fn is_attack_heavy(&self) -> bool {
        self.attack_modifier > HEAVY_MODIFIER_THRESHOLD
    }

    pub fn is_defense_heavy(&self) -> bool {
        self.defense_modifier > HEAVY_MODIFIER_THRESHOLD
    }

    pub fn suits(&self, style: PlayStyle) -> bool {
        self.compatible_styles.contains(&style)
    }
}

use PlayerPositionType::*;

// Indexed by `MatchTacticType as usize`.
pub static FORMATIONS: [Formation; 7] = [
    Formation {
        tactic_type: MatchTacticType::T442,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(LeftBack, 0.15, 0.20),
            FormationSlot::new(CentreBack, 0.35, 0.15),
            FormationSlot::new(CentreBack, 0.65, 0.15),
            FormationSlot::new(RightBack, 0.85, 0.20),
            FormationSlot::new(LeftMidfielder, 0.20, 0.50),
            FormationSlot::new(CentralMidfielder, 0.40, 0.45),
            FormationSlot::new(CentralMidfielder, 0.60, 0.45),
            FormationSlot::new(RightMidfielder, 0.80, 0.50),
            FormationSlot::new(Striker, 0.40, 0.80),
            FormationSlot::new(Striker, 0.60, 0.80),
        ],
        compatible_styles: &[PlayStyle::Balanced, PlayStyle::CounterAttack],
        attack_modifier: 1.05,
        defense_modifier: 1.0,
        midfield_modifier: 0.95,
        instructions: TacticalInstructions {
            tempo: 1.0,
            width: 1.1,
            pressing: 0.9,
            directness: 1.1,
            risk_taking: 1.0,
        },
    },
    Formation {
        tactic_type: MatchTacticType::T433,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(LeftBack, 0.15, 0.20),
            FormationSlot::new(CentreBack, 0.35, 0.15),
            FormationSlot::new(CentreBack, 0.65, 0.15),
            FormationSlot::new(RightBack, 0.85, 0.20),
            FormationSlot::new(DefensiveMidfielder, 0.50, 0.35),
            FormationSlot::new(CentralMidfielder, 0.35, 0.50),
            FormationSlot::new(CentralMidfielder, 0.65, 0.50),
            FormationSlot::new(LeftWinger, 0.20, 0.75),
            FormationSlot::new(Striker, 0.50, 0.80),
            FormationSlot::new(RightWinger, 0.80, 0.75),
        ],
        compatible_styles: &[
            PlayStyle::Attacking,
            PlayStyle::HighPress,
            PlayStyle::Possession,
        ],
        attack_modifier: 1.1,
        defense_modifier: 0.95,
        midfield_modifier: 1.05,
        instructions: TacticalInstructions {
            tempo: 1.1,
            width: 1.2,
            pressing: 1.2,
            directness: 0.9,
            risk_taking: 1.2,
        },
    },
    Formation {
        tactic_type: MatchTacticType::T4231,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(LeftBack, 0.15, 0.20),
            FormationSlot::new(CentreBack, 0.35, 0.15),
            FormationSlot::new(CentreBack, 0.65, 0.15),
            FormationSlot::new(RightBack, 0.85, 0.20),
            FormationSlot::new(DefensiveMidfielder, 0.40, 0.35),
            FormationSlot::new(DefensiveMidfielder, 0.60, 0.35),
            FormationSlot::new(LeftWinger, 0.20, 0.65),
            FormationSlot::new(AttackingMidfielder, 0.50, 0.60),
            FormationSlot::new(RightWinger, 0.80, 0.65),
            FormationSlot::new(Striker, 0.50, 0.80),
        ],
        compatible_styles: &[
            PlayStyle::Balanced,
            PlayStyle::Possession,
            PlayStyle::CounterAttack,
        ],
        attack_modifier: 1.0,
        defense_modifier: 1.1,
        midfield_modifier: 1.1,
        instructions: TacticalInstructions {
            tempo: 0.95,
            width: 1.0,
            pressing: 1.0,
            directness: 0.85,
            risk_taking: 0.9,
        },
    },
    Formation {
        tactic_type: MatchTacticType::T352,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(CentreBack, 0.30, 0.20),
            FormationSlot::new(CentreBack, 0.50, 0.15),
            FormationSlot::new(CentreBack, 0.70, 0.20),
            FormationSlot::new(LeftMidfielder, 0.10, 0.50),
            FormationSlot::new(CentralMidfielder, 0.30, 0.45),
            FormationSlot::new(CentralMidfielder, 0.50, 0.40),
            FormationSlot::new(CentralMidfielder, 0.70, 0.45),
            FormationSlot::new(RightMidfielder, 0.90, 0.50),
            FormationSlot::new(Striker, 0.40, 0.75),
            FormationSlot::new(Striker, 0.60, 0.75),
        ],
        compatible_styles: &[
            PlayStyle::Possession,
            PlayStyle::Attacking,
            PlayStyle::Balanced,
        ],
        attack_modifier: 1.0,
        defense_modifier: 0.9,
        midfield_modifier: 1.2,
        instructions: TacticalInstructions {
            tempo: 1.0,
            width: 1.3,
            pressing: 1.1,
            directness: 0.8,
            risk_taking: 1.1,
        },
    },
    Formation {
        tactic_type: MatchTacticType::T532,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(LeftBack, 0.10, 0.25),
            FormationSlot::new(CentreBack, 0.30, 0.15),
            FormationSlot::new(CentreBack, 0.50, 0.10),
            FormationSlot::new(CentreBack, 0.70, 0.15),
            FormationSlot::new(RightBack, 0.90, 0.25),
            FormationSlot::new(CentralMidfielder, 0.30, 0.50),
            FormationSlot::new(CentralMidfielder, 0.50, 0.45),
            FormationSlot::new(CentralMidfielder, 0.70, 0.50),
            FormationSlot::new(Striker, 0.40, 0.75),
            FormationSlot::new(Striker, 0.60, 0.75),
        ],
        compatible_styles: &[PlayStyle::Defensive, PlayStyle::CounterAttack],
        attack_modifier: 0.85,
        defense_modifier: 1.2,
        midfield_modifier: 0.95,
        instructions: TacticalInstructions {
            tempo: 0.8,
            width: 0.9,
            pressing: 0.7,
            directness: 1.3,
            risk_taking: 0.6,
        },
    },
    Formation {
        tactic_type: MatchTacticType::T451,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(LeftBack, 0.15, 0.20),
            FormationSlot::new(CentreBack, 0.35, 0.15),
            FormationSlot::new(CentreBack, 0.65, 0.15),
            FormationSlot::new(RightBack, 0.85, 0.20),
            FormationSlot::new(LeftMidfielder, 0.15, 0.50),
            FormationSlot::new(CentralMidfielder, 0.35, 0.45),
            FormationSlot::new(DefensiveMidfielder, 0.50, 0.35),
            FormationSlot::new(CentralMidfielder, 0.65, 0.45),
            FormationSlot::new(RightMidfielder, 0.85, 0.50),
            FormationSlot::new(Striker, 0.50, 0.80),
        ],
        compatible_styles: &[
            PlayStyle::Defensive,
            PlayStyle::CounterAttack,
            PlayStyle::Possession,
        ],
        attack_modifier: 0.9,
        defense_modifier: 1.1,
        midfield_modifier: 1.15,
        instructions: TacticalInstructions {
            tempo: 0.9,
            width: 1.1,
            pressing: 0.9,
            directness: 1.0,
            risk_taking: 0.8,
        },
    },
    Formation {
        tactic_type: MatchTacticType::T343,
        slots: [
            FormationSlot::new(Goalkeeper, 0.50, 0.05),
            FormationSlot::new(CentreBack, 0.30, 0.20),
            FormationSlot::new(CentreBack, 0.50, 0.15),
            FormationSlot::new(CentreBack, 0.70, 0.20),
            FormationSlot::new(LeftMidfielder, 0.15, 0.50),
            FormationSlot::new(CentralMidfielder, 0.40, 0.45),
            FormationSlot::new(CentralMidfielder, 0.60, 0.45),
            FormationSlot::new(RightMidfielder, 0.85, 0.50),
            FormationSlot::new(LeftWinger, 0.20, 0.75),
            FormationSlot::new(Striker, 0.50, 0.80),
            FormationSlot::new(RightWinger, 0.80, 0.75),
        ],
        compatible_styles: &[PlayStyle::Attacking, PlayStyle::HighPress],
        attack_modifier: 1.15,
        defense_modifier: 0.9,
        midfield_modifier: 1.0,
        instructions: TacticalInstructions {
            tempo: 1.15,
            width: 1.2,
            pressing: 1.2,
            directness: 1.0,
            risk_taking: 1.25,
        },
    },
];
