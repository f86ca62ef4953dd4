use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerPositionType {
    Goalkeeper,
    CentreBack,
    LeftBack,
    RightBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    LeftMidfielder,
    RightMidfielder,
    LeftWinger,
    RightWinger,
    CentreForward,
    Striker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerFieldPositionGroup {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

// Indexed by `PlayerPositionType as usize`.
const POSITION_GROUPS: [PlayerFieldPositionGroup; 13] = [
    PlayerFieldPositionGroup::Goalkeeper,
    PlayerFieldPositionGroup::Defender,
    PlayerFieldPositionGroup::Defender,
    PlayerFieldPositionGroup::Defender,
    PlayerFieldPositionGroup::Midfielder,
    PlayerFieldPositionGroup::Midfielder,
    PlayerFieldPositionGroup::Midfielder,
    PlayerFieldPositionGroup::Midfielder,
    PlayerFieldPositionGroup::Midfielder,
    PlayerFieldPositionGroup::Forward,
    PlayerFieldPositionGroup::Forward,
    PlayerFieldPositionGroup::Forward,
    PlayerFieldPositionGroup::Forward,
];

impl PlayerPositionType {
    pub const ALL: [PlayerPositionType; 13] = [
        PlayerPositionType::Goalkeeper,
        PlayerPositionType::CentreBack,
        PlayerPositionType::LeftBack,
        PlayerPositionType::RightBack,
        PlayerPositionType::DefensiveMidfielder,
        PlayerPositionType::CentralMidfielder,
        PlayerPositionType::AttackingMidfielder,
        PlayerPositionType::LeftMidfielder,
        PlayerPositionType::RightMidfielder,
        PlayerPositionType::LeftWinger,
        PlayerPositionType::RightWinger,
        PlayerPositionType::CentreForward,
        PlayerPositionType::Striker,
    ];

    #[inline]
    pub fn position_group(&self) -> PlayerFieldPositionGroup {
        POSITION_GROUPS[*self as usize]
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position_group() == PlayerFieldPositionGroup::Goalkeeper
    }

    pub fn is_defender(&self) -> bool {
        self.position_group() == PlayerFieldPositionGroup::Defender
    }

    pub fn is_midfielder(&self) -> bool {
        self.position_group() == PlayerFieldPositionGroup::Midfielder
    }

    pub fn is_forward(&self) -> bool {
        self.position_group() == PlayerFieldPositionGroup::Forward
    }

    /// Positions that take shots in the match simulation.
    pub fn is_shooter(&self) -> bool {
        self.is_forward() || *self == PlayerPositionType::AttackingMidfielder
    }

    /// Positions that can be credited with an assist.
    pub fn is_playmaker(&self) -> bool {
        matches!(
            self,
            PlayerPositionType::CentralMidfielder
                | PlayerPositionType::AttackingMidfielder
                | PlayerPositionType::LeftMidfielder
                | PlayerPositionType::RightMidfielder
        )
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            PlayerPositionType::Goalkeeper => "GK",
            PlayerPositionType::CentreBack => "CB",
            PlayerPositionType::LeftBack => "LB",
            PlayerPositionType::RightBack => "RB",
            PlayerPositionType::DefensiveMidfielder => "CDM",
            PlayerPositionType::CentralMidfielder => "CM",
            PlayerPositionType::AttackingMidfielder => "CAM",
            PlayerPositionType::LeftMidfielder => "LM",
            PlayerPositionType::RightMidfielder => "RM",
            PlayerPositionType::LeftWinger => "LW",
            PlayerPositionType::RightWinger => "RW",
            PlayerPositionType::CentreForward => "CF",
            PlayerPositionType::Striker => "ST",
        }
    }
}

impl Display for PlayerPositionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl PlayerFieldPositionGroup {
    /// Rating penalty for playing a position of group `other` when the player's
    /// natural position belongs to `self`.
    pub fn distance_penalty(&self, other: PlayerFieldPositionGroup) -> u8 {
        use PlayerFieldPositionGroup::*;

        match (*self, other) {
            (a, b) if a == b => 8,
            (Midfielder, Forward) | (Forward, Midfielder) => 12,
            _ => 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_position_has_a_group() {
        let goalkeepers = PlayerPositionType::ALL.iter().filter(|p| p.is_goalkeeper()).count();
        let defenders = PlayerPositionType::ALL.iter().filter(|p| p.is_defender()).count();
        let midfielders = PlayerPositionType::ALL.iter().filter(|p| p.is_midfielder()).count();
        let forwards = PlayerPositionType::ALL.iter().filter(|p| p.is_forward()).count();

        assert_eq!(goalkeepers, 1);
        assert_eq!(defenders, 3);
        assert_eq!(midfielders, 5);
        assert_eq!(forwards, 4);
    }

    #[test]
    fn lookup_table_matches_enum_order() {
        assert_eq!(
            PlayerPositionType::AttackingMidfielder.position_group(),
            PlayerFieldPositionGroup::Midfielder
        );
        assert_eq!(
            PlayerPositionType::Striker.position_group(),
            PlayerFieldPositionGroup::Forward
        );
        assert_eq!(
            PlayerPositionType::RightBack.position_group(),
            PlayerFieldPositionGroup::Defender
        );
    }

    #[test]
    fn group_distance_penalties() {
        use PlayerFieldPositionGroup::*;

        assert_eq!(Defender.distance_penalty(Defender), 8);
        assert_eq!(Midfielder.distance_penalty(Forward), 12);
        assert_eq!(Forward.distance_penalty(Midfielder), 12);
        assert_eq!(Goalkeeper.distance_penalty(Forward), 20);
        assert_eq!(Defender.distance_penalty(Midfielder), 20);
    }

    #[test]
    fn shooters_include_attacking_midfielders() {
        assert!(PlayerPositionType::AttackingMidfielder.is_shooter());
        assert!(PlayerPositionType::LeftWinger.is_shooter());
        assert!(!PlayerPositionType::CentralMidfielder.is_shooter());
        assert!(!PlayerPositionType::DefensiveMidfielder.is_playmaker());
    }
}
