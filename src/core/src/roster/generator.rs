use crate::error::SimulationResult;
use crate::roster::{LeagueRoster, RosterPlayer, RosterProvider, Sector, SectorAverages, TeamRoster};
use crate::utils::mix_seed;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngExt, SeedableRng};
use std::collections::BTreeMap;

const TOWNS: [&str; 20] = [
    "Ashford", "Brackley", "Caldwell", "Dunmore", "Eastleigh", "Fairhaven", "Glenrock",
    "Harlow", "Ironbridge", "Kingsport", "Lowmoor", "Millbrook", "Northgate", "Oakham",
    "Portsea", "Redcliff", "Stonebury", "Thornfield", "Westerby", "Yarwick",
];

const CLUB_SUFFIXES: [&str; 6] = ["FC", "United", "City", "Athletic", "Rovers", "Albion"];

const FIRST_NAMES: [&str; 24] = [
    "Adam", "Bruno", "Carlos", "Daniel", "Emil", "Felipe", "Gabriel", "Hugo", "Ivan", "Jonas",
    "Kevin", "Luca", "Marco", "Nico", "Oscar", "Pedro", "Rafael", "Samuel", "Tomas", "Victor",
    "Wesley", "Xavier", "Yuri", "Zeno",
];

const LAST_NAMES: [&str; 24] = [
    "Almeida", "Baker", "Costa", "Dias", "Evans", "Ferreira", "Gomez", "Hughes", "Ilic",
    "Jensen", "Keller", "Lopes", "Moreau", "Novak", "Olsen", "Pereira", "Quinn", "Rossi",
    "Silva", "Torres", "Varga", "Walsh", "Young", "Zielinski",
];

/// Seeded synthetic league: same seed, league name and size give the same roster.
#[derive(Debug, Clone, Copy)]
pub struct RosterGenerator {
    pub seed: u64,
    pub teams: usize,
}

impl RosterGenerator {
    pub fn new(seed: u64, teams: usize) -> Self {
        RosterGenerator { seed, teams }
    }

    pub fn generate(&self, league: &str) -> LeagueRoster {
        let mut rng = StdRng::seed_from_u64(mix_seed(self.seed, league_hash(league)));

        let teams = (0..self.teams)
            .map(|idx| {
                let name = team_name(idx, &mut rng);
                let quality = rng.random_range(58..=86u8);

                (name, generate_team(quality, &mut rng))
            })
            .collect::<BTreeMap<String, TeamRoster>>();

        LeagueRoster::new(teams)
    }
}

impl RosterProvider for RosterGenerator {
    fn load_league(&self, league: &str) -> SimulationResult<LeagueRoster> {
        let roster = self.generate(league);
        roster.validate()?;

        Ok(roster)
    }
}

fn league_hash(league: &str) -> u32 {
    league
        .bytes()
        .fold(17u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(byte as u32))
}

fn team_name(idx: usize, rng: &mut StdRng) -> String {
    let town = TOWNS[idx % TOWNS.len()];
    let suffix = CLUB_SUFFIXES.choose(rng).copied().unwrap_or("FC");

    match idx / TOWNS.len() {
        0 => format!("{} {}", town, suffix),
        round => format!("{} {} {}", town, suffix, round + 1),
    }
}

fn generate_team(quality: u8, rng: &mut StdRng) -> TeamRoster {
    let squad = [
        (Sector::Goalkeeper, rng.random_range(2..=3)),
        (Sector::Defense, rng.random_range(6..=8)),
        (Sector::Midfield, rng.random_range(6..=9)),
        (Sector::Attack, rng.random_range(3..=5)),
    ];

    let mut players = Vec::with_capacity(25);

    for (sector, count) in squad {
        for _ in 0..count {
            players.push(generate_player(sector, quality, rng));
        }
    }

    TeamRoster {
        averages: SectorAverages {
            attack: sector_average(&players, Sector::Attack),
            midfield: sector_average(&players, Sector::Midfield),
            defense: sector_average(&players, Sector::Defense),
            goalkeeper: sector_average(&players, Sector::Goalkeeper),
        },
        players,
    }
}

fn generate_player(sector: Sector, quality: u8, rng: &mut StdRng) -> RosterPlayer {
    let overall = (quality as i16 + rng.random_range(-8..=8i16)).clamp(40, 95) as u8;
    let potential = overall.saturating_add(rng.random_range(0..=8)).min(99);

    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Player");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Unknown");

    RosterPlayer {
        name: format!("{} {}", first, last),
        overall,
        potential,
        sector,
        detailed_attributes: None,
    }
}

fn sector_average(players: &[RosterPlayer], sector: Sector) -> f32 {
    let ratings: Vec<f32> = players
        .iter()
        .filter(|p| p.sector == sector)
        .map(|p| p.overall as f32)
        .collect();

    if ratings.is_empty() {
        return 0.0;
    }

    let mean = ratings.iter().sum::<f32>() / ratings.len() as f32;

    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_teams() {
        let roster = RosterGenerator::new(42, 20).generate("premier_league");

        assert_eq!(roster.teams.len(), 20);
        assert!(roster.validate().is_ok());

        for team in roster.teams.values() {
            assert!((17..=25).contains(&team.players.len()));
            assert!(team.averages.goalkeeper > 0.0);
            assert!(team.players.iter().all(|p| p.potential >= p.overall));
        }
    }

    #[test]
    fn test_same_seed_same_roster() {
        let first = RosterGenerator::new(7, 8).load_league("la_liga").unwrap();
        let second = RosterGenerator::new(7, 8).load_league("la_liga").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_team_names_stay_unique_past_the_town_list() {
        let roster = RosterGenerator::new(1, 24).generate("big_league");

        assert_eq!(roster.teams.len(), 24);
    }

    #[test]
    fn test_generated_roster_builds_lineups() {
        let roster = RosterGenerator::new(3, 4).generate("test");
        let mut rng = StdRng::seed_from_u64(3);

        let lineups = roster.into_lineups(&mut rng).unwrap();

        assert_eq!(lineups.len(), 4);
        assert!(lineups.values().all(|lineup| lineup.starters.len() == 11));
    }
}
