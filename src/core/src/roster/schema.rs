use crate::club::{
    MatchTacticType, Player, PlayerCollection, PlayerPositionType, PlayerSkills, TeamLineup,
    STARTERS_COUNT,
};
use crate::error::{SimulationError, SimulationResult};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 99;
const ATTRIBUTE_FLOOR: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    #[serde(alias = "Ataque", alias = "attack")]
    Attack,
    #[serde(alias = "Meio", alias = "midfield")]
    Midfield,
    #[serde(alias = "Defesa", alias = "defense")]
    Defense,
    #[serde(alias = "Goleiro", alias = "goalkeeper")]
    Goalkeeper,
}

impl Sector {
    /// Concrete position for a sector, better players leaning towards central roles.
    pub fn pick_position(&self, overall: u8, rng: &mut StdRng) -> PlayerPositionType {
        use PlayerPositionType::*;

        let candidates: &[PlayerPositionType] = match self {
            Sector::Goalkeeper => &[Goalkeeper],
            Sector::Defense if overall >= 80 => &[CentreBack, CentreBack, LeftBack, RightBack],
            Sector::Defense => &[CentreBack, LeftBack, RightBack],
            Sector::Midfield if overall >= 85 => {
                &[AttackingMidfielder, CentralMidfielder, DefensiveMidfielder]
            }
            Sector::Midfield if overall >= 75 => &[
                CentralMidfielder,
                DefensiveMidfielder,
                LeftMidfielder,
                RightMidfielder,
            ],
            Sector::Midfield => &[CentralMidfielder, DefensiveMidfielder],
            Sector::Attack if overall >= 82 => &[Striker, Striker, LeftWinger, RightWinger],
            Sector::Attack => &[LeftWinger, RightWinger, Striker],
        };

        candidates.choose(rng).copied().unwrap_or(CentralMidfielder)
    }

    /// Ratings profile for a player known only by sector and overall.
    pub fn derive_skills(&self, overall: u8) -> PlayerSkills {
        let up = |delta: u8| overall.saturating_add(delta).min(MAX_RATING);
        let down = |delta: u8| overall.saturating_sub(delta).max(ATTRIBUTE_FLOOR);

        let mut skills = PlayerSkills::default();

        match self {
            Sector::Goalkeeper => {
                skills.goalkeeping = Some(overall);
                skills.pace = down(25);
                skills.shooting = down(35);
                skills.passing = down(10);
                skills.dribbling = down(20);
                skills.defending = down(15);
                skills.physical = down(5);
            }
            Sector::Defense => {
                skills.defending = up(2);
                skills.physical = overall;
                skills.passing = down(8);
                skills.pace = down(10);
                skills.shooting = down(20);
                skills.dribbling = down(12);
            }
            Sector::Midfield => {
                skills.passing = up(3);
                skills.dribbling = overall;
                skills.pace = down(5);
                skills.shooting = down(10);
                skills.defending = down(8);
                skills.physical = down(3);
            }
            Sector::Attack => {
                skills.shooting = up(5);
                skills.pace = up(2);
                skills.dribbling = overall;
                skills.passing = down(5);
                skills.defending = down(20);
                skills.physical = down(8);
            }
        }

        skills
    }
}

/// Ratings supplied by the data source; any field present overrides the derived value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedAttributes {
    pub pace: Option<u8>,
    pub shooting: Option<u8>,
    pub passing: Option<u8>,
    pub dribbling: Option<u8>,
    pub defending: Option<u8>,
    pub physical: Option<u8>,
    pub goalkeeping: Option<u8>,
    pub crossing: Option<u8>,
    pub finishing: Option<u8>,
    pub heading: Option<u8>,
}

impl DetailedAttributes {
    pub fn apply(&self, skills: &mut PlayerSkills) {
        let set = |target: &mut u8, value: Option<u8>| {
            if let Some(value) = value {
                *target = value;
            }
        };

        set(&mut skills.pace, self.pace);
        set(&mut skills.shooting, self.shooting);
        set(&mut skills.passing, self.passing);
        set(&mut skills.dribbling, self.dribbling);
        set(&mut skills.defending, self.defending);
        set(&mut skills.physical, self.physical);

        skills.goalkeeping = self.goalkeeping.or(skills.goalkeeping);
        skills.crossing = self.crossing.or(skills.crossing);
        skills.finishing = self.finishing.or(skills.finishing);
        skills.heading = self.heading.or(skills.heading);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorAverages {
    #[serde(alias = "ataque")]
    pub attack: f32,
    #[serde(alias = "meio")]
    pub midfield: f32,
    #[serde(alias = "defesa")]
    pub defense: f32,
    #[serde(alias = "goleiro")]
    pub goalkeeper: f32,
}

impl SectorAverages {
    pub fn overall(&self) -> f32 {
        (self.attack + self.midfield + self.defense + self.goalkeeper) / 4.0
    }

    /// Starting formation from the mean of the four sector averages.
    pub fn formation(&self) -> MatchTacticType {
        match self.overall() {
            q if q >= 85.0 => MatchTacticType::T433,
            q if q >= 75.0 => MatchTacticType::T442,
            q if q >= 65.0 => MatchTacticType::T433,
            _ => MatchTacticType::T442,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub name: String,
    pub overall: u8,
    pub potential: u8,
    pub sector: Sector,
    #[serde(
        default,
        alias = "optional_detailed_attributes",
        skip_serializing_if = "Option::is_none"
    )]
    pub detailed_attributes: Option<DetailedAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    #[serde(alias = "medias")]
    pub averages: SectorAverages,
    pub players: Vec<RosterPlayer>,
}

/// `team name -> roster` for one league.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueRoster {
    pub teams: BTreeMap<String, TeamRoster>,
}

impl LeagueRoster {
    pub fn new(teams: BTreeMap<String, TeamRoster>) -> Self {
        LeagueRoster { teams }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        for (team_name, team) in &self.teams {
            if team_name.trim().is_empty() {
                return Err(malformed("team with an empty name".to_string()));
            }

            if team.players.len() < STARTERS_COUNT {
                return Err(malformed(format!(
                    "team '{}' has {} players, at least {} required",
                    team_name,
                    team.players.len(),
                    STARTERS_COUNT
                )));
            }

            for player in &team.players {
                if player.name.trim().is_empty() {
                    return Err(malformed(format!(
                        "team '{}' has a player without a name",
                        team_name
                    )));
                }

                let ratings = [("overall", player.overall), ("potential", player.potential)];

                for (label, value) in ratings {
                    if !(MIN_RATING..=MAX_RATING).contains(&value) {
                        return Err(malformed(format!(
                            "{} of '{}' ({}) is {}, expected {}-{}",
                            label, player.name, team_name, value, MIN_RATING, MAX_RATING
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Builds a lineup per team. Player ids run across the whole league in team-name order.
    pub fn into_lineups(self, rng: &mut StdRng) -> SimulationResult<BTreeMap<String, TeamLineup>> {
        self.validate()?;

        let mut next_id = 1u32;
        let mut lineups = BTreeMap::new();

        for (team_name, team) in self.teams {
            let mut roster_players = team.players;
            roster_players.sort_by_key(|p| std::cmp::Reverse(p.overall));

            let players: Vec<Player> = roster_players
                .iter()
                .map(|roster_player| {
                    let id = next_id;
                    next_id += 1;
                    build_player(id, roster_player, rng)
                })
                .collect();

            let tactic = team.averages.formation();

            debug!(
                "{}: {} players, quality {:.1}, {}",
                team_name,
                players.len(),
                team.averages.overall(),
                tactic
            );

            let lineup =
                TeamLineup::new(team_name.clone(), PlayerCollection::new(players), tactic)?;
            lineups.insert(team_name, lineup);
        }

        Ok(lineups)
    }
}

fn build_player(id: u32, roster_player: &RosterPlayer, rng: &mut StdRng) -> Player {
    let position = roster_player.sector.pick_position(roster_player.overall, rng);

    let mut player = Player::new(id, roster_player.name.clone(), position);

    player.age = rng.random_range(18..=35);
    player.skills = roster_player.sector.derive_skills(roster_player.overall);

    if let Some(detailed) = &roster_player.detailed_attributes {
        detailed.apply(&mut player.skills);
    }

    player.attributes.current_ability = roster_player.overall;
    player.attributes.potential_ability = roster_player.potential;
    player.attributes.set_form(rng.random_range(60..=90) as f32);
    player.attributes.set_morale(rng.random_range(70..=95) as f32);
    player.attributes.set_fitness(rng.random_range(90..=100) as f32);

    player
}

fn malformed(message: String) -> SimulationError {
    SimulationError::Configuration(format!("malformed roster: {}", message))
}
