use crate::club::Player;
use crate::club::team::tactics::{Formation, MatchTacticType};
use std::cmp::Reverse;

const MIN_EFFECTIVENESS: f32 = 0.5;
const MAX_EFFECTIVENESS: f32 = 1.5;

const MIN_ADVANTAGE: f32 = 0.8;
const MAX_ADVANTAGE: f32 = 1.2;

const STYLE_CLASH_DAMPING: f32 = 0.9;

pub struct TacticsSelector;

impl TacticsSelector {
    /// How well eleven players, given in slot order, fit a formation.
    pub fn effectiveness(formation: &Formation, players: &[&Player]) -> f32 {
        if players.len() != formation.slots.len() {
            return MIN_EFFECTIVENESS;
        }

        let effectiveness = formation
            .slots
            .iter()
            .zip(players)
            .map(|(slot, player)| {
                let position_rating = player.rating_for_position(slot.position) as f32;
                let overall = player.effective_overall() as f32;

                position_rating / overall * slot.importance
            })
            .product::<f32>();

        effectiveness.clamp(MIN_EFFECTIVENESS, MAX_EFFECTIVENESS)
    }

    /// Fills formation slots in order, each with the best remaining player for it.
    pub fn assign_players<'p>(formation: &Formation, players: &[&'p Player]) -> Vec<&'p Player> {
        let mut remaining: Vec<&'p Player> = players.to_vec();
        let mut assigned = Vec::with_capacity(formation.slots.len());

        for slot in formation.slots.iter() {
            let best = remaining
                .iter()
                .enumerate()
                .min_by_key(|(_, player)| Reverse(player.rating_for_position(slot.position)))
                .map(|(idx, _)| idx);

            match best {
                Some(idx) => assigned.push(remaining.remove(idx)),
                None => break,
            }
        }

        assigned
    }

    /// The catalog formation that best fits the squad; first best in catalog order wins.
    pub fn recommend(players: &[&Player]) -> MatchTacticType {
        if players.len() < 11 {
            return MatchTacticType::default();
        }

        let mut best_tactic = MatchTacticType::default();
        let mut best_effectiveness = f32::MIN;

        for tactic in MatchTacticType::ALL {
            let formation = tactic.formation();
            let lineup = Self::assign_players(formation, players);
            let effectiveness = Self::effectiveness(formation, &lineup);

            if effectiveness > best_effectiveness {
                best_effectiveness = effectiveness;
                best_tactic = tactic;
            }
        }

        best_tactic
    }

    /// Per-side strength multipliers from the formation matchup.
    pub fn tactical_advantage(home: &Formation, away: &Formation) -> (f32, f32) {
        let home_ratio = home.attack_modifier / away.defense_modifier;
        let away_ratio = away.attack_modifier / home.defense_modifier;

        let style_clash = (home.is_defense_heavy() && away.is_attack_heavy())
            || (away.is_defense_heavy() && home.is_attack_heavy());

        let style_factor = if style_clash { STYLE_CLASH_DAMPING } else { 1.0 };

        (
            (home_ratio * style_factor).clamp(MIN_ADVANTAGE, MAX_ADVANTAGE),
            (away_ratio * style_factor).clamp(MIN_ADVANTAGE, MAX_ADVANTAGE),
        )
    }
}
