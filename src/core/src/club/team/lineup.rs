use crate::club::team::tactics::{Formation, MatchTacticType, TacticsSelector};
use crate::club::{Player, PlayerCollection, PlayerFieldPositionGroup, PlayerPositionType};
use crate::error::{SimulationError, SimulationResult};
use itertools::Itertools;
use log::debug;
use std::cmp::Reverse;

pub const STARTERS_COUNT: usize = 11;
pub const MAX_SUBSTITUTES: usize = 7;

const DEFAULT_SECTOR_RATING: f32 = 50.0;

/// A team's squad for the season plus the eleven and bench picked for the next match.
#[derive(Debug, Clone)]
pub struct TeamLineup {
    pub team_name: String,
    pub players: PlayerCollection,
    pub tactic_type: MatchTacticType,

    // player ids, starters in formation slot order
    pub starters: Vec<u32>,
    pub substitutes: Vec<u32>,
}

impl TeamLineup {
    pub fn new(
        team_name: impl Into<String>,
        players: PlayerCollection,
        tactic_type: MatchTacticType,
    ) -> SimulationResult<Self> {
        let team_name = team_name.into();

        if players.len() < STARTERS_COUNT {
            return Err(SimulationError::Configuration(format!(
                "team '{}' has {} players, at least {} required",
                team_name,
                players.len(),
                STARTERS_COUNT
            )));
        }

        let mut lineup = TeamLineup {
            team_name,
            players,
            tactic_type,
            starters: Vec::new(),
            substitutes: Vec::new(),
        };

        lineup.select_starters();

        Ok(lineup)
    }

    /// Builds a lineup with an explicit selection, skipping squad validation.
    pub fn with_selection(
        team_name: impl Into<String>,
        players: PlayerCollection,
        tactic_type: MatchTacticType,
        starters: Vec<u32>,
        substitutes: Vec<u32>,
    ) -> Self {
        TeamLineup {
            team_name: team_name.into(),
            players,
            tactic_type,
            starters,
            substitutes,
        }
    }

    #[inline]
    pub fn formation(&self) -> &'static Formation {
        self.tactic_type.formation()
    }

    pub fn set_tactic(&mut self, tactic_type: MatchTacticType) {
        if self.tactic_type != tactic_type {
            debug!(
                "{}: formation {} -> {}",
                self.team_name, self.tactic_type, tactic_type
            );
            self.tactic_type = tactic_type;
        }
    }

    /// Picks the best available player for every formation slot, then the bench.
    pub fn select_starters(&mut self) {
        let formation = self.tactic_type.formation();

        let mut remaining: Vec<&Player> = self.players.iter().collect();
        let mut starters = Vec::with_capacity(STARTERS_COUNT);

        for slot in formation.slots.iter() {
            let best_idx = Self::best_for_slot(&remaining, slot.position, true)
                .or_else(|| Self::best_for_slot(&remaining, slot.position, false));

            match best_idx {
                Some(idx) => starters.push(remaining.remove(idx).id),
                None => break,
            }
        }

        let substitutes = remaining
            .into_iter()
            .sorted_by_key(|p| (Reverse(p.can_play()), Reverse(p.effective_overall())))
            .take(MAX_SUBSTITUTES)
            .map(|p| p.id)
            .collect();

        self.starters = starters;
        self.substitutes = substitutes;
    }

    fn best_for_slot(
        candidates: &[&Player],
        position: PlayerPositionType,
        available_only: bool,
    ) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, player)| !available_only || player.can_play())
            .min_by_key(|(_, player)| Reverse(player.rating_for_position(position)))
            .map(|(idx, _)| idx)
    }

    pub fn recommend_formation(&self) -> MatchTacticType {
        let available: Vec<&Player> = self.players.available().collect();

        if available.len() >= STARTERS_COUNT {
            TacticsSelector::recommend(&available)
        } else {
            let everyone: Vec<&Player> = self.players.iter().collect();
            TacticsSelector::recommend(&everyone)
        }
    }

    pub fn starting_players(&self) -> Vec<&Player> {
        self.starters
            .iter()
            .filter_map(|id| self.players.get(*id))
            .collect()
    }

    pub fn substitute_players(&self) -> Vec<&Player> {
        self.substitutes
            .iter()
            .filter_map(|id| self.players.get(*id))
            .collect()
    }

    pub fn is_starter(&self, player_id: u32) -> bool {
        self.starters.contains(&player_id)
    }

    /// Mean effective overall of the starting eleven.
    pub fn team_rating(&self) -> f32 {
        mean_overall(self.starting_players().into_iter())
    }

    pub fn sector_strength(&self, group: PlayerFieldPositionGroup) -> f32 {
        mean_overall(
            self.starting_players()
                .into_iter()
                .filter(|p| p.position.position_group() == group),
        )
    }

    pub fn goalkeeper(&self) -> Option<&Player> {
        self.starting_players()
            .into_iter()
            .find(|p| p.position.is_goalkeeper())
    }

    pub fn rest(&mut self, days: u16) {
        self.players.rest(days);
    }
}

fn mean_overall<'p>(players: impl Iterator<Item = &'p Player>) -> f32 {
    let (sum, count) = players.fold((0u32, 0u32), |(sum, count), p| {
        (sum + p.effective_overall() as u32, count + 1)
    });

    if count == 0 {
        return DEFAULT_SECTOR_RATING;
    }

    sum as f32 / count as f32
}
