use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchEventType {
    Goal,
    Assist,
    ShotOnTarget,
    ShotOffTarget,
    Save,
    YellowCard,
    RedCard,
    Injury,
}

impl MatchEventType {
    /// Contribution of the event to the player's match rating narrative.
    pub fn rating_impact(&self) -> f32 {
        match self {
            MatchEventType::Goal => 1.5,
            MatchEventType::Assist => 1.0,
            MatchEventType::ShotOnTarget => 0.3,
            MatchEventType::ShotOffTarget => -0.1,
            MatchEventType::Save => 0.3,
            MatchEventType::YellowCard => -0.3,
            MatchEventType::RedCard => -2.0,
            MatchEventType::Injury => -0.5,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MatchEventType::Goal => "Goal",
            MatchEventType::Assist => "Assist",
            MatchEventType::ShotOnTarget => "Shot on Target",
            MatchEventType::ShotOffTarget => "Shot off Target",
            MatchEventType::Save => "Save",
            MatchEventType::YellowCard => "Yellow Card",
            MatchEventType::RedCard => "Red Card",
            MatchEventType::Injury => "Injury",
        }
    }
}

impl Display for MatchEventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEvent {
    pub minute: u8,
    pub event_type: MatchEventType,
    pub player_id: u32,
    pub team: String,
    pub description: String,
    pub assisted_by: Option<u32>,
    pub rating_impact: f32,
}

impl MatchEvent {
    pub fn new(
        minute: u8,
        event_type: MatchEventType,
        player_id: u32,
        team: &str,
        description: String,
    ) -> Self {
        MatchEvent {
            minute,
            event_type,
            player_id,
            team: team.to_string(),
            description,
            assisted_by: None,
            rating_impact: event_type.rating_impact(),
        }
    }

    pub fn with_assist(mut self, assisted_by: Option<u32>) -> Self {
        self.assisted_by = assisted_by;
        self
    }
}

impl Display for MatchEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}' [{}] {}", self.minute, self.team, self.description)
    }
}
