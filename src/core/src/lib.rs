pub mod club;
pub mod error;
pub mod league;
pub mod r#match;
pub mod roster;
pub mod utils;

pub use club::{
    Formation, FormationSlot, MatchTacticType, PlayStyle, Player, PlayerAttributes,
    PlayerCollection, PlayerFieldPositionGroup, PlayerInjury, PlayerPositionType, PlayerSkills,
    PlayerStatistics, TacticalInstructions, TacticsSelector, TeamLineup, FORMATIONS,
    MAX_SUBSTITUTES, STARTERS_COUNT,
};

pub use error::{SimulationError, SimulationResult};

pub use league::{
    CancellationToken, Fixture, FixtureStatus, LeagueTable, LeagueTableEntry, MatchLog,
    MatchweekReport, PlayerSeasonStats, PlayerStatTracker, Season, SeasonCalendar,
    SeasonSettings, SeasonSummary, WinterBreak,
};

pub use r#match::{
    MatchEvent, MatchEventType, MatchOutcome, MatchResult, MatchSimulator,
    PlayerMatchPerformance,
};

pub use roster::{InMemoryRosterProvider, LeagueRoster, RosterGenerator, RosterProvider};

pub use utils::*;
