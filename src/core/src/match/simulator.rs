use crate::club::{
    Player, PlayerFieldPositionGroup, TacticsSelector, TeamLineup, MAX_SUBSTITUTES, STARTERS_COUNT,
};
use crate::error::{invariant, SimulationError, SimulationResult};
use crate::r#match::{
    MatchEvent, MatchEventType, MatchOutcome, MatchResult, MatchSide, PlayerMatchPerformance,
};
use chrono::NaiveDate;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::RngExt;

pub const DEFAULT_HOME_ADVANTAGE: f32 = 1.1;
pub const MATCH_MINUTES: u8 = 90;

const BASE_SHOTS: f32 = 10.0;
const MIN_SHOTS: u8 = 5;
const SHOT_MODIFIER_RANGE: (f32, f32) = (0.7, 1.3);
const JITTER_RANGE: (f32, f32) = (0.8, 1.2);

const SHOT_ACCURACY_RANGE: (f32, f32) = (0.18, 0.42);
const GOAL_PROBABILITY_RANGE: (f32, f32) = (0.08, 0.28);

const ASSIST_PROBABILITY: f64 = 0.6;
const RED_CARD_PROBABILITY: f64 = 0.15;

const WIN_MORALE_BOOST: f32 = 2.0;
const LOSS_MORALE_DROP: f32 = -2.0;

/// Chance that a shot hits the target. `ability` is shooting + finishing (0-198).
pub fn shot_accuracy(ability: f32, jitter: f32) -> f32 {
    (ability / 200.0 * jitter).clamp(SHOT_ACCURACY_RANGE.0, SHOT_ACCURACY_RANGE.1)
}

/// Chance that a shot on target beats a goalkeeper of the given strength.
pub fn goal_probability(ability: f32, goalkeeper_strength: f32) -> f32 {
    let keeper = goalkeeper_strength.max(1.0);
    ((ability / 240.0) / (keeper / 80.0)).clamp(GOAL_PROBABILITY_RANGE.0, GOAL_PROBABILITY_RANGE.1)
}

pub fn shot_modifier(attack_strength: f32, defense_strength: f32) -> f32 {
    (attack_strength / defense_strength.max(1.0))
        .clamp(SHOT_MODIFIER_RANGE.0, SHOT_MODIFIER_RANGE.1)
}

pub fn expected_shots(modifier: f32, jitter: f32) -> u8 {
    ((BASE_SHOTS * modifier * jitter) as u8).max(MIN_SHOTS)
}

/// Stochastic match model driven entirely by the supplied generator.
#[derive(Debug, Clone, Copy)]
pub struct MatchSimulator {
    pub home_advantage: f32,
}

impl Default for MatchSimulator {
    fn default() -> Self {
        MatchSimulator {
            home_advantage: DEFAULT_HOME_ADVANTAGE,
        }
    }
}

impl MatchSimulator {
    pub fn new(home_advantage: f32) -> Self {
        MatchSimulator { home_advantage }
    }

    /// Plays one match and applies its physical and form effects to both squads.
    pub fn simulate(
        &self,
        home: &mut TeamLineup,
        away: &mut TeamLineup,
        date: NaiveDate,
        rng: &mut StdRng,
    ) -> SimulationResult<MatchResult> {
        validate_lineup(home)?;
        validate_lineup(away)?;

        let mut result = self.play(home, away, date, rng)?;

        apply_post_match(home, &mut result, MatchSide::Home, rng);
        apply_post_match(away, &mut result, MatchSide::Away, rng);

        result.events.sort_by_key(|event| event.minute);

        debug!(
            "{} ({} vs {}, possession {:.0}%)",
            result.score_line(),
            result.home_tactic,
            result.away_tactic,
            result.home_possession
        );

        Ok(result)
    }

    fn play(
        &self,
        home: &TeamLineup,
        away: &TeamLineup,
        date: NaiveDate,
        rng: &mut StdRng,
    ) -> SimulationResult<MatchResult> {
        let mut result = MatchResult::new(
            date,
            &home.team_name,
            &away.team_name,
            home.tactic_type,
            away.tactic_type,
        );

        let (home_advantage, away_advantage) =
            TacticsSelector::tactical_advantage(home.formation(), away.formation());
        let home_advantage = home_advantage * self.home_advantage;

        let home_strength = home.team_rating() * home_advantage;
        let away_strength = away.team_rating() * away_advantage;

        result.home_possession = home_strength / (home_strength + away_strength) * 100.0;
        result.away_possession = 100.0 - result.home_possession;

        for (side, lineup) in [(MatchSide::Home, home), (MatchSide::Away, away)] {
            let performances = result.performances_mut(side);

            for player in lineup.starting_players() {
                performances.insert(
                    player.id,
                    PlayerMatchPerformance::new(player.id, &player.name, MATCH_MINUTES),
                );
            }
        }

        simulate_attacks(&mut result, home, away, MatchSide::Home, rng);
        simulate_attacks(&mut result, away, home, MatchSide::Away, rng);

        simulate_discipline(&mut result, home, away, rng);

        for side in [MatchSide::Home, MatchSide::Away] {
            for performance in result.performances_mut(side).values_mut() {
                performance.calculate_rating();
            }
        }

        check_result(&result)?;

        Ok(result)
    }
}

fn validate_lineup(lineup: &TeamLineup) -> SimulationResult<()> {
    if lineup.starters.is_empty() {
        return Err(SimulationError::EmptyLineup {
            team: lineup.team_name.clone(),
        });
    }

    let invalid = |reason: String| SimulationError::InvalidLineup {
        team: lineup.team_name.clone(),
        reason,
    };

    if lineup.starters.len() > STARTERS_COUNT {
        return Err(invalid(format!(
            "{} starters, at most {} allowed",
            lineup.starters.len(),
            STARTERS_COUNT
        )));
    }

    if lineup.substitutes.len() > MAX_SUBSTITUTES {
        return Err(invalid(format!(
            "{} substitutes, at most {} allowed",
            lineup.substitutes.len(),
            MAX_SUBSTITUTES
        )));
    }

    if let Some(unknown) = lineup
        .starters
        .iter()
        .find(|id| !lineup.players.contains(**id))
    {
        return Err(invalid(format!("starter {} is not in the squad", unknown)));
    }

    Ok(())
}

fn simulate_attacks(
    result: &mut MatchResult,
    attacking: &TeamLineup,
    defending: &TeamLineup,
    side: MatchSide,
    rng: &mut StdRng,
) {
    let starters = attacking.starting_players();

    let mut shooters: Vec<&Player> = starters
        .iter()
        .copied()
        .filter(|p| p.position.is_shooter())
        .collect();

    if shooters.is_empty() {
        shooters = starters.clone();
    }

    let modifier = shot_modifier(
        attacking.sector_strength(PlayerFieldPositionGroup::Forward),
        defending.sector_strength(PlayerFieldPositionGroup::Defender),
    );
    let shots = expected_shots(modifier, rng.random_range(JITTER_RANGE.0..=JITTER_RANGE.1));

    let goalkeeper_strength = defending.sector_strength(PlayerFieldPositionGroup::Goalkeeper);
    let goalkeeper = defending.goalkeeper();

    let team = result.team_name(side).to_string();
    let opponent = result.team_name(side.opposite()).to_string();

    let mut shots_taken = 0u8;
    let mut shots_on_target = 0u8;

    for _ in 0..shots {
        let Some(shooter) = shooters.choose(rng).copied() else {
            break;
        };

        let minute = rng.random_range(1..=MATCH_MINUTES);
        let ability = shooter.skills.shooting_ability();
        let accuracy = shot_accuracy(ability, rng.random_range(JITTER_RANGE.0..=JITTER_RANGE.1));

        shots_taken += 1;

        if let Some(performance) = result.performances_mut(side).get_mut(&shooter.id) {
            performance.shots += 1;
        }

        if rng.random::<f32>() >= accuracy {
            result.events.push(MatchEvent::new(
                minute,
                MatchEventType::ShotOffTarget,
                shooter.id,
                &team,
                format!("{} shot off target", shooter.name),
            ));
            continue;
        }

        shots_on_target += 1;

        if let Some(performance) = result.performances_mut(side).get_mut(&shooter.id) {
            performance.shots_on_target += 1;
        }

        result.events.push(MatchEvent::new(
            minute,
            MatchEventType::ShotOnTarget,
            shooter.id,
            &team,
            format!("{} shot on target", shooter.name),
        ));

        if rng.random::<f32>() < goal_probability(ability, goalkeeper_strength) {
            result.add_goal(side);

            let assist = if rng.random_bool(ASSIST_PROBABILITY) {
                let candidates: Vec<&Player> = starters
                    .iter()
                    .copied()
                    .filter(|p| p.position.is_playmaker() && p.id != shooter.id)
                    .collect();

                candidates.choose(rng).copied()
            } else {
                None
            };

            let performances = result.performances_mut(side);

            if let Some(performance) = performances.get_mut(&shooter.id) {
                performance.goals += 1;
            }

            if let Some(assister) = assist
                && let Some(performance) = performances.get_mut(&assister.id)
            {
                performance.assists += 1;
            }

            let description = match assist {
                Some(assister) => {
                    format!("{} scores! (Assisted by {})", shooter.name, assister.name)
                }
                None => format!("{} scores!", shooter.name),
            };

            result.events.push(
                MatchEvent::new(minute, MatchEventType::Goal, shooter.id, &team, description)
                    .with_assist(assist.map(|p| p.id)),
            );

            if let Some(assister) = assist {
                result.events.push(MatchEvent::new(
                    minute,
                    MatchEventType::Assist,
                    assister.id,
                    &team,
                    format!("{} provides assist", assister.name),
                ));
            }
        } else if let Some(keeper) = goalkeeper {
            if let Some(performance) =
                result.performances_mut(side.opposite()).get_mut(&keeper.id)
            {
                performance.saves += 1;
            }

            result.events.push(MatchEvent::new(
                minute,
                MatchEventType::Save,
                keeper.id,
                &opponent,
                format!("{} makes a save", keeper.name),
            ));
        }
    }

    result.set_shots(side, shots_taken, shots_on_target);
}

fn simulate_discipline(
    result: &mut MatchResult,
    home: &TeamLineup,
    away: &TeamLineup,
    rng: &mut StdRng,
) {
    let players: Vec<(MatchSide, &Player)> = home
        .starting_players()
        .into_iter()
        .map(|p| (MatchSide::Home, p))
        .chain(away.starting_players().into_iter().map(|p| (MatchSide::Away, p)))
        .collect();

    let yellow_cards = rng.random_range(2..=6);

    for _ in 0..yellow_cards {
        if let Some(&(side, player)) = players.choose(rng) {
            let minute = rng.random_range(10..=MATCH_MINUTES);
            book_player(result, side, player, minute, MatchEventType::YellowCard);
        }
    }

    if rng.random_bool(RED_CARD_PROBABILITY)
        && let Some(&(side, player)) = players.choose(rng)
    {
        let minute = rng.random_range(20..=85);
        book_player(result, side, player, minute, MatchEventType::RedCard);
    }
}

fn book_player(
    result: &mut MatchResult,
    side: MatchSide,
    player: &Player,
    minute: u8,
    card: MatchEventType,
) {
    if let Some(performance) = result.performances_mut(side).get_mut(&player.id) {
        match card {
            MatchEventType::RedCard => performance.red_cards += 1,
            _ => performance.yellow_cards += 1,
        }
    }

    let description = match card {
        MatchEventType::RedCard => format!("{} receives red card", player.name),
        _ => format!("{} receives yellow card", player.name),
    };

    let team = result.team_name(side).to_string();
    result
        .events
        .push(MatchEvent::new(minute, card, player.id, &team, description));
}

fn check_result(result: &MatchResult) -> SimulationResult<()> {
    for side in [MatchSide::Home, MatchSide::Away] {
        let performances = result.performances(side);

        let scored: u32 = performances.values().map(|p| p.goals as u32).sum();
        invariant(scored == result.goals(side) as u32, || {
            format!(
                "{} scored {} but player goals sum to {}",
                result.team_name(side),
                result.goals(side),
                scored
            )
        })?;

        for performance in performances.values() {
            invariant(performance.shots_on_target <= performance.shots, || {
                format!(
                    "player {} has {} shots on target from {} shots",
                    performance.player_id, performance.shots_on_target, performance.shots
                )
            })?;

            invariant((0.0..=10.0).contains(&performance.rating), || {
                format!(
                    "player {} rated {} outside 0-10",
                    performance.player_id, performance.rating
                )
            })?;
        }
    }

    invariant(
        (result.home_possession + result.away_possession - 100.0).abs() < 0.01,
        || format!("possession sums to {}", result.home_possession + result.away_possession),
    )
}

fn apply_post_match(
    lineup: &mut TeamLineup,
    result: &mut MatchResult,
    side: MatchSide,
    rng: &mut StdRng,
) {
    let morale_delta = match (result.outcome(), side) {
        (MatchOutcome::HomeWin, MatchSide::Home) | (MatchOutcome::AwayWin, MatchSide::Away) => {
            WIN_MORALE_BOOST
        }
        (MatchOutcome::Draw, _) => 0.0,
        _ => LOSS_MORALE_DROP,
    };

    let team = result.team_name(side).to_string();
    let starters = lineup.starters.clone();

    for player_id in starters {
        let Some(player) = lineup.players.get_mut(player_id) else {
            continue;
        };
        let Some(performance) = result.performances_mut(side).get_mut(&player_id) else {
            continue;
        };

        player.apply_fatigue(performance.minutes);
        player.update_form(performance.rating.round(), rng);
        player.update_morale(morale_delta);

        if let Some(injury) = player.check_injury(rng) {
            performance.injured = true;

            let description = format!(
                "{} gets injured ({:?}, {} days)",
                player.name, injury.severity, injury.days_remaining
            );
            let minute = rng.random_range(70..=MATCH_MINUTES);

            player.statistics.record(performance);

            result.events.push(MatchEvent::new(
                minute,
                MatchEventType::Injury,
                player_id,
                &team,
                description,
            ));
        } else {
            player.statistics.record(performance);
        }
    }
}
