use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No lineup available for team '{team}' in fixture {fixture_id}")]
    MissingLineup { fixture_id: u32, team: String },

    #[error("Team '{0}' is not registered in the league table")]
    UnknownTeam(String),

    #[error("Lineup for '{team}' has no starters")]
    EmptyLineup { team: String },

    #[error("Invalid lineup for '{team}': {reason}")]
    InvalidLineup { team: String, reason: String },

    #[error("Simulation invariant violated: {0}")]
    Invariant(String),

    #[error("Matchweek {requested} requested out of order, expected {expected}")]
    OutOfOrder { requested: u32, expected: u32 },
}

impl SimulationError {
    /// Only missing lineups can be skipped by the season driver, everything else aborts.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SimulationError::MissingLineup { .. })
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Surfaces a broken invariant: panics in debug builds, returns an error otherwise.
pub(crate) fn invariant(condition: bool, message: impl FnOnce() -> String) -> SimulationResult<()> {
    if condition {
        return Ok(());
    }

    let message = message();
    log::error!("invariant violated: {}", message);
    debug_assert!(condition, "{}", message);

    Err(SimulationError::Invariant(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_lineup_is_recoverable() {
        let missing = SimulationError::MissingLineup {
            fixture_id: 3,
            team: "Arsenal".to_string(),
        };
        assert!(missing.is_recoverable());

        assert!(!SimulationError::Configuration("odd team count".into()).is_recoverable());
        assert!(!SimulationError::Invariant("negative goals".into()).is_recoverable());
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = SimulationError::EmptyLineup {
            team: "Chelsea".to_string(),
        };
        assert_eq!(err.to_string(), "Lineup for 'Chelsea' has no starters");

        let err = SimulationError::OutOfOrder {
            requested: 5,
            expected: 3,
        };
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn satisfied_invariant_is_ok() {
        assert!(invariant(true, || "unused".to_string()).is_ok());
    }
}
