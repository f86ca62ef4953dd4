use crate::error::{SimulationError, SimulationResult};
use crate::roster::LeagueRoster;
use std::collections::BTreeMap;

/// Source of league rosters for the season driver.
pub trait RosterProvider {
    fn load_league(&self, league: &str) -> SimulationResult<LeagueRoster>;

    fn available_leagues(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Rosters already parsed by the caller, keyed by league name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterProvider {
    leagues: BTreeMap<String, LeagueRoster>,
}

impl InMemoryRosterProvider {
    pub fn new() -> Self {
        InMemoryRosterProvider::default()
    }

    pub fn with_league(mut self, league: impl Into<String>, roster: LeagueRoster) -> Self {
        self.insert(league, roster);
        self
    }

    pub fn insert(&mut self, league: impl Into<String>, roster: LeagueRoster) {
        self.leagues.insert(league.into(), roster);
    }
}

impl RosterProvider for InMemoryRosterProvider {
    fn load_league(&self, league: &str) -> SimulationResult<LeagueRoster> {
        let roster = self
            .leagues
            .get(league)
            .cloned()
            .ok_or_else(|| SimulationError::Configuration(format!("unknown league '{}'", league)))?;

        roster.validate()?;

        Ok(roster)
    }

    fn available_leagues(&self) -> Vec<String> {
        self.leagues.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAGUE_JSON: &str = r#"{
        "Benfica": {
            "medias": { "ataque": 80, "meio": 79, "defesa": 78, "goleiro": 81 },
            "players": [
                { "name": "A", "overall": 80, "potential": 82, "sector": "Goleiro" },
                { "name": "B", "overall": 79, "potential": 82, "sector": "Defesa" },
                { "name": "C", "overall": 78, "potential": 82, "sector": "Defesa" },
                { "name": "D", "overall": 77, "potential": 82, "sector": "Defesa" },
                { "name": "E", "overall": 76, "potential": 82, "sector": "Defesa" },
                { "name": "F", "overall": 75, "potential": 82, "sector": "Meio" },
                { "name": "G", "overall": 74, "potential": 82, "sector": "Meio" },
                { "name": "H", "overall": 73, "potential": 82, "sector": "Meio" },
                { "name": "I", "overall": 72, "potential": 82, "sector": "Meio" },
                { "name": "J", "overall": 71, "potential": 82, "sector": "Ataque" },
                { "name": "K", "overall": 70, "potential": 82, "sector": "Ataque",
                  "detailed_attributes": { "finishing": 85 } }
            ]
        }
    }"#;

    #[test]
    fn test_load_known_league() {
        let roster: LeagueRoster = serde_json::from_str(LEAGUE_JSON).unwrap();
        let provider = InMemoryRosterProvider::new().with_league("liga_portugal", roster);

        let loaded = provider.load_league("liga_portugal").unwrap();

        assert_eq!(loaded.teams.len(), 1);
        assert_eq!(loaded.teams["Benfica"].players.len(), 11);
        assert_eq!(
            loaded.teams["Benfica"].players[10]
                .detailed_attributes
                .and_then(|d| d.finishing),
            Some(85)
        );
        assert_eq!(provider.available_leagues(), vec!["liga_portugal".to_string()]);
    }

    #[test]
    fn test_unknown_league() {
        let provider = InMemoryRosterProvider::new();

        assert!(matches!(
            provider.load_league("serie_a"),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_roster_is_rejected_on_load() {
        let mut roster: LeagueRoster = serde_json::from_str(LEAGUE_JSON).unwrap();
        if let Some(team) = roster.teams.get_mut("Benfica") {
            team.players.pop();
        }

        let provider = InMemoryRosterProvider::new().with_league("liga_portugal", roster);

        assert!(provider.load_league("liga_portugal").is_err());
    }
}
